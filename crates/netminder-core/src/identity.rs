//! Identity types for shots and games

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a recorded shot
///
/// Assigned by the session store at creation and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShotId(pub String);

impl ShotId {
    /// Create a new shot ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShotId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ShotId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque identifier of a game (practice or match session)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Create a new game ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GameId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_id() {
        let id = ShotId::new("shot1");
        assert_eq!(id.as_str(), "shot1");
        assert_eq!(format!("{}", id), "shot1");
    }

    #[test]
    fn test_game_id_serializes_as_plain_string() {
        let id = GameId::from("game1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"game1\"");
    }
}
