//! Error types for netminder-core

use thiserror::Error;

/// Core error type
///
/// Only raised when building validated values from caller input. The
/// classification and aggregation functions never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Position out of range: ({x}, {y}) must lie within [0, 100]")]
    PositionOutOfRange { x: f64, y: f64 },

    #[error("Invalid power: {0} (expected 1, 2 or 3)")]
    InvalidPower(u8),

    #[error("Invalid half: {0:?} (expected \"first\" or \"second\")")]
    InvalidHalf(String),

    #[error("Invalid half filter: {0:?} (expected \"all\", \"first\" or \"second\")")]
    InvalidHalfFilter(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
