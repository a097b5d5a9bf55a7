//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A grid coordinate outside `[0, size)`. Callers are expected to
    /// bounds-check first, so this signals a programming error.
    #[error("Position ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: i32 },

    #[error("Cannot place {requested} organisms on a grid with {capacity} cells")]
    CapacityExceeded { requested: usize, capacity: usize },

    #[error("Cell ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
