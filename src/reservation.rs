// Reservation workflow tying customer records to hotel room availability

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    customer::CustomerRepository,
    error::{Error, Result},
    hotel::HotelRepository,
    store::{next_id, JsonStore, StoreConfig},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "reservation_id")]
    pub id: u32,
    pub customer_id: u32,
    pub hotel_id: u32,
}

// A reservation either exists or it doesn't: create appends one after both
// foreign keys resolve and a room has been taken; cancel gives the room
// back and removes the record.
#[derive(Debug, Clone)]
pub struct ReservationService {
    customers: CustomerRepository,
    hotels: HotelRepository,
    store: JsonStore<Reservation>,
}

impl ReservationService {
    pub fn new(
        customers: CustomerRepository,
        hotels: HotelRepository,
        reservations_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            customers,
            hotels,
            store: JsonStore::new(reservations_path),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            CustomerRepository::new(&config.customers_path),
            HotelRepository::new(&config.hotels_path),
            &config.reservations_path,
        )
    }

    pub fn create(&self, customer_id: u32, hotel_id: u32) -> Result<Reservation> {
        self.customers.get(customer_id).ok_or(Error::NotFound {
            entity: "customer",
            id: customer_id,
        })?;
        self.hotels.get(hotel_id).ok_or(Error::NotFound {
            entity: "hotel",
            id: hotel_id,
        })?;

        // The room decrement lands before the reservation record does, and
        // a full hotel aborts the whole operation.
        self.hotels.reserve_room(hotel_id)?;

        let mut reservations = self.store.load();
        let reservation = Reservation {
            id: next_id(reservations.iter().map(|r| r.id)),
            customer_id,
            hotel_id,
        };
        reservations.push(reservation.clone());
        self.store.save(&reservations)?;
        debug!(
            reservation_id = reservation.id,
            customer_id, hotel_id, "created reservation"
        );
        Ok(reservation)
    }

    pub fn cancel(&self, id: u32) -> Result<()> {
        let mut reservations = self.store.load();
        let target = reservations
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(Error::NotFound {
                entity: "reservation",
                id,
            })?;

        // Availability is restored before the record goes away. A hotel
        // that was deleted in the meantime has no room count to restore;
        // the dangling reservation is still removed.
        match self.hotels.release_room(target.hotel_id) {
            Ok(()) => {}
            Err(Error::NotFound { .. }) => {
                warn!(
                    reservation_id = id,
                    hotel_id = target.hotel_id,
                    "hotel missing on cancel, no room to restore"
                );
            }
            Err(err) => return Err(err),
        }

        reservations.retain(|r| r.id != id);
        self.store.save(&reservations)?;
        debug!(reservation_id = id, "cancelled reservation");
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<Reservation> {
        self.store.load().into_iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _dir: tempfile::TempDir,
        customers: CustomerRepository,
        hotels: HotelRepository,
        service: ReservationService,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            customers_path: dir.path().join("customers.json"),
            hotels_path: dir.path().join("hotels.json"),
            reservations_path: dir.path().join("reservations.json"),
        };
        Fixture {
            customers: CustomerRepository::new(&config.customers_path),
            hotels: HotelRepository::new(&config.hotels_path),
            service: ReservationService::from_config(&config),
            _dir: dir,
        }
    }

    #[test]
    fn test_create_reservation() {
        let f = fixture();
        f.customers
            .create("Rosalina", "Smith", "rosalina@test.com")
            .unwrap();
        f.hotels.create("Emporio", "Acapulco", 5).unwrap();

        let reservation = f.service.create(1, 1).unwrap();
        assert_eq!(reservation.id, 1);
        assert_eq!(reservation.customer_id, 1);
        assert_eq!(reservation.hotel_id, 1);
        assert_eq!(f.hotels.get(1).unwrap().rooms, 4);
    }

    #[test]
    fn test_cancel_reservation_restores_room() {
        let f = fixture();
        f.customers
            .create("Rosalina", "Smith", "rosalina@test.com")
            .unwrap();
        f.hotels.create("Emporio", "Acapulco", 5).unwrap();

        f.service.create(1, 1).unwrap();
        f.service.cancel(1).unwrap();
        assert_eq!(f.hotels.get(1).unwrap().rooms, 5);
        assert!(f.service.get(1).is_none());
    }

    #[test]
    fn test_create_reservation_nonexistent_customer() {
        let f = fixture();
        f.hotels.create("Emporio", "Acapulco", 5).unwrap();

        let err = f.service.create(999, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                entity: "customer",
                id: 999
            }
        ));
        // No collection was touched
        assert_eq!(f.hotels.get(1).unwrap().rooms, 5);
        assert!(f.service.get(1).is_none());
    }

    #[test]
    fn test_create_reservation_nonexistent_hotel() {
        let f = fixture();
        f.customers
            .create("Rosalina", "Smith", "rosalina@test.com")
            .unwrap();

        let err = f.service.create(1, 999).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                entity: "hotel",
                id: 999
            }
        ));
        assert!(f.service.get(1).is_none());
    }

    #[test]
    fn test_create_reservation_no_rooms_available() {
        let f = fixture();
        f.customers
            .create("Rosalina", "Smith", "rosalina@test.com")
            .unwrap();
        f.hotels.create("Emporio", "Acapulco", 1).unwrap();

        f.service.create(1, 1).unwrap();
        let err = f.service.create(1, 1).unwrap_err();
        assert!(matches!(err, Error::NoRoomsAvailable(1)));

        // The full hotel keeps its count and no second record is written
        assert_eq!(f.hotels.get(1).unwrap().rooms, 0);
        assert!(f.service.get(2).is_none());
    }

    #[test]
    fn test_cancel_nonexistent_reservation() {
        let f = fixture();
        let err = f.service.cancel(999).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                entity: "reservation",
                id: 999
            }
        ));
    }

    #[test]
    fn test_cancel_after_hotel_deleted() {
        let f = fixture();
        f.customers
            .create("Rosalina", "Smith", "rosalina@test.com")
            .unwrap();
        f.hotels.create("Emporio", "Acapulco", 5).unwrap();

        f.service.create(1, 1).unwrap();
        f.hotels.delete(1).unwrap();

        // The dangling reservation still cancels cleanly
        f.service.cancel(1).unwrap();
        assert!(f.service.get(1).is_none());
    }

    #[test]
    fn test_corrupt_store_loads_empty() {
        let f = fixture();
        std::fs::write(f.service.store.path(), "not valid json").unwrap();
        assert!(f.service.get(1).is_none());
    }

    // The end-to-end lifecycle: reserve out of five rooms, then cancel and
    // get the room back.
    #[test]
    fn test_reservation_round_trip() {
        let f = fixture();
        let hotel = f.hotels.create("Emporio", "Acapulco", 5).unwrap();
        assert_eq!(hotel.id, 1);
        assert_eq!(hotel.rooms, 5);
        let customer = f
            .customers
            .create("Rosalina", "Smith", "rosalina@test.com")
            .unwrap();
        assert_eq!(customer.id, 1);

        let reservation = f.service.create(1, 1).unwrap();
        assert_eq!(reservation.id, 1);
        assert_eq!(f.hotels.get(1).unwrap().rooms, 4);

        f.service.cancel(1).unwrap();
        assert_eq!(f.hotels.get(1).unwrap().rooms, 5);
        assert!(f.service.get(1).is_none());
    }
}
