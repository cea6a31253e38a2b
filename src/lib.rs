// Main library file for the hotel reservation system

// Export modules for each part of the system
pub mod customer;
pub mod error;
pub mod hotel;
pub mod reservation;
pub mod store;

// Re-export key types for convenience
pub use customer::{Customer, CustomerRepository, CustomerUpdate};
pub use error::{Error, Result};
pub use hotel::{Hotel, HotelRepository, HotelUpdate};
pub use reservation::{Reservation, ReservationService};
pub use store::{JsonStore, StoreConfig};
