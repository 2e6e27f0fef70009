//! Shot and game records

use crate::geometry::{self, Zone};
use crate::{Error, GameId, Result, ShotId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the goal diagram, in percent of its width and height
///
/// `(0, 0)` is the top-left corner of the diagram, `(100, 100)` the
/// bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Smallest valid coordinate
    pub const MIN: f64 = 0.0;
    /// Largest valid coordinate
    pub const MAX: f64 = 100.0;

    /// Create a position, rejecting coordinates outside `[0, 100]`
    pub fn new(x: f64, y: f64) -> Result<Self> {
        let position = Self { x, y };
        if position.is_valid() {
            Ok(position)
        } else {
            Err(Error::PositionOutOfRange { x, y })
        }
    }

    /// Create a position without range checks
    ///
    /// Classification is total, so unchecked positions are still usable
    /// with every function in this crate.
    pub fn unchecked(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates lie within `[0, 100]`
    pub fn is_valid(&self) -> bool {
        let range = Self::MIN..=Self::MAX;
        range.contains(&self.x) && range.contains(&self.y)
    }

    /// Euclidean distance to another position, in percent
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Shot power as recorded by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Power {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Power {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Power::Low => "low",
            Power::Medium => "medium",
            Power::High => "high",
        }
    }
}

impl TryFrom<u8> for Power {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Power::Low),
            2 => Ok(Power::Medium),
            3 => Ok(Power::High),
            other => Err(Error::InvalidPower(other)),
        }
    }
}

impl From<Power> for u8 {
    fn from(power: Power) -> Self {
        power as u8
    }
}

/// Two-way time partition of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    First,
    Second,
}

impl Half {
    /// Resolve an optional tag for a two-way split
    ///
    /// Unassigned shots belong to the first half.
    pub fn effective(half: Option<Half>) -> Half {
        half.unwrap_or(Half::First)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Half::First => "first",
            Half::Second => "second",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Half {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Half::First),
            "second" => Ok(Half::Second),
            _ => Err(Error::InvalidHalf(s.to_string())),
        }
    }
}

/// One recorded shot at goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    pub id: ShotId,
    pub game_id: GameId,
    /// True if the goalkeeper stopped the shot
    pub saved: bool,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Power>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<Half>,
}

impl Shot {
    /// Create a shot with no optional metadata
    pub fn new(
        id: ShotId,
        game_id: GameId,
        position: Position,
        saved: bool,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            game_id,
            saved,
            position,
            power: None,
            notes: None,
            timestamp,
            half: None,
        }
    }

    pub fn with_power(mut self, power: Power) -> Self {
        self.power = Some(power);
        self
    }

    pub fn with_half(mut self, half: Half) -> Self {
        self.half = Some(half);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Whether the shot landed inside the goal frame
    pub fn is_inside_goal(&self) -> bool {
        geometry::is_inside_goal(&self.position)
    }

    /// Zone label of the shot position
    pub fn zone(&self) -> Zone {
        geometry::classify_zone(&self.position)
    }

    /// Half used for two-way splits
    pub fn effective_half(&self) -> Half {
        Half::effective(self.half)
    }
}

/// A practice or match session grouping shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub goalkeeper: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_range() {
        assert!(Position::new(0.0, 100.0).is_ok());
        assert_eq!(
            Position::new(-0.5, 50.0),
            Err(Error::PositionOutOfRange { x: -0.5, y: 50.0 })
        );
        assert!(Position::new(50.0, 100.1).is_err());
        assert!(Position::new(f64::NAN, 50.0).is_err());
    }

    #[test]
    fn test_distance() {
        let a = Position::unchecked(10.0, 10.0);
        let b = Position::unchecked(13.0, 14.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_power_conversion() {
        assert_eq!(Power::try_from(2), Ok(Power::Medium));
        assert_eq!(Power::try_from(4), Err(Error::InvalidPower(4)));
        assert_eq!(u8::from(Power::High), 3);
    }

    #[test]
    fn test_half_parsing() {
        assert_eq!("first".parse::<Half>(), Ok(Half::First));
        assert_eq!(" Second ".parse::<Half>(), Ok(Half::Second));
        assert!("third".parse::<Half>().is_err());
        assert_eq!(Half::effective(None), Half::First);
        assert_eq!(Half::effective(Some(Half::Second)), Half::Second);
    }

    #[test]
    fn test_shot_json_matches_export_layout() {
        let shot = Shot::new(
            ShotId::new("shot1"),
            GameId::new("game1"),
            Position::unchecked(30.0, 70.0),
            true,
            1_705_309_500_000,
        )
        .with_power(Power::Medium)
        .with_half(Half::First);

        let json = serde_json::to_value(&shot).unwrap();
        assert_eq!(json["gameId"], "game1");
        assert_eq!(json["power"], 2);
        assert_eq!(json["half"], "first");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_shot_json_rejects_bad_power() {
        let raw = r#"{"id":"s","gameId":"g","saved":false,
            "position":{"x":1.0,"y":2.0},"power":7,"timestamp":0}"#;
        assert!(serde_json::from_str::<Shot>(raw).is_err());
    }
}
