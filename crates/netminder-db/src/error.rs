//! Error types for database operations.

use netminder_core::{GameId, ShotId};
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// No game with this ID.
    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    /// No shot with this ID.
    #[error("Shot not found: {0}")]
    ShotNotFound(ShotId),

    /// Shot input rejected by validation.
    #[error("Invalid shot: {0}")]
    InvalidShot(#[from] netminder_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
