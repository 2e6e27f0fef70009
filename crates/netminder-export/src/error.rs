//! Error types for netminder-export

use netminder_core::GameId;
use thiserror::Error;

/// Export error type
#[derive(Debug, Error)]
pub enum Error {
    /// No game with this ID
    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    /// Reading from the session store failed
    #[error("Store error: {0}")]
    Store(#[from] netminder_db::Error),

    /// Export error
    #[error("Export error: {0}")]
    ExportError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, Error>;
