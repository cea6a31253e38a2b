// Error types for the repositories and the reservation workflow

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("No rooms available in hotel {0}")]
    NoRoomsAvailable(u32),

    #[error("Failed to write store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
