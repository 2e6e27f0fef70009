//! Shot model for database storage.

use native_db::*;
use native_model::{native_model, Model};
use netminder_core::{GameId, Half, Position, Power, Shot, ShotId};
use serde::{Deserialize, Serialize};

/// Stored shot in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredShot {
    /// Primary key - shot ID.
    #[primary_key]
    pub id: String,
    /// Owning game.
    #[secondary_key]
    pub game_id: String,
    pub saved: bool,
    pub x: f64,
    pub y: f64,
    /// Power as 1, 2 or 3.
    pub power: Option<u8>,
    pub notes: Option<String>,
    pub timestamp: i64,
    /// "first" or "second".
    pub half: Option<String>,
}

impl StoredShot {
    /// Create from a Shot.
    pub fn from_shot(shot: &Shot) -> Self {
        Self {
            id: shot.id.as_str().to_string(),
            game_id: shot.game_id.as_str().to_string(),
            saved: shot.saved,
            x: shot.position.x,
            y: shot.position.y,
            power: shot.power.map(u8::from),
            notes: shot.notes.clone(),
            timestamp: shot.timestamp,
            half: shot.half.map(|h| h.as_str().to_string()),
        }
    }

    /// Convert to a Shot.
    ///
    /// Unknown power or half values read back as unassigned.
    pub fn to_shot(&self) -> Shot {
        Shot {
            id: ShotId::new(self.id.clone()),
            game_id: GameId::new(self.game_id.clone()),
            saved: self.saved,
            position: Position::unchecked(self.x, self.y),
            power: self.power.and_then(|p| Power::try_from(p).ok()),
            notes: self.notes.clone(),
            timestamp: self.timestamp,
            half: self.half.as_deref().and_then(|h| h.parse::<Half>().ok()),
        }
    }
}
