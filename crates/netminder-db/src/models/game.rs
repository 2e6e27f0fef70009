//! Game model for database storage.

use chrono::DateTime;
use native_db::*;
use native_model::{native_model, Model};
use netminder_core::{Game, GameId};
use serde::{Deserialize, Serialize};

/// Stored game in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredGame {
    /// Primary key - game ID.
    #[primary_key]
    pub id: String,
    pub name: String,
    pub goalkeeper: String,
    pub opponent: Option<String>,
    pub tournament: Option<String>,
    pub notes: Option<String>,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at_ms: i64,
}

impl StoredGame {
    /// Create from a Game.
    pub fn from_game(game: &Game) -> Self {
        Self {
            id: game.id.as_str().to_string(),
            name: game.name.clone(),
            goalkeeper: game.goalkeeper.clone(),
            opponent: game.opponent.clone(),
            tournament: game.tournament.clone(),
            notes: game.notes.clone(),
            created_at_ms: game.created_at.timestamp_millis(),
        }
    }

    /// Convert to a Game.
    pub fn to_game(&self) -> Game {
        Game {
            id: GameId::new(self.id.clone()),
            name: self.name.clone(),
            goalkeeper: self.goalkeeper.clone(),
            opponent: self.opponent.clone(),
            tournament: self.tournament.clone(),
            created_at: DateTime::from_timestamp_millis(self.created_at_ms).unwrap_or_default(),
            notes: self.notes.clone(),
        }
    }
}
