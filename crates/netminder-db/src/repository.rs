//! Session store interface consumed by the exporter and the CLI.

use crate::error::Result;
use chrono::Utc;
use netminder_core::{Game, GameId, Half, Position, Power, Shot, ShotId};

/// Input for creating a game. ID and creation time are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewGame {
    pub name: String,
    pub goalkeeper: String,
    pub opponent: Option<String>,
    pub tournament: Option<String>,
    pub notes: Option<String>,
}

impl NewGame {
    pub fn new(name: impl Into<String>, goalkeeper: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goalkeeper: goalkeeper.into(),
            ..Self::default()
        }
    }

    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }

    pub fn with_tournament(mut self, tournament: impl Into<String>) -> Self {
        self.tournament = Some(tournament.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Input for recording a shot. ID and game are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewShot {
    pub position: Position,
    pub saved: bool,
    pub power: Option<Power>,
    pub half: Option<Half>,
    pub notes: Option<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl NewShot {
    /// A shot recorded now
    pub fn new(position: Position, saved: bool) -> Self {
        Self {
            position,
            saved,
            power: None,
            half: None,
            notes: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
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
}

/// Create, read, update and delete operations over games and shots.
///
/// Lookups by ID return `Ok(None)` when nothing matches; updates and deletes
/// of a missing record return a not-found error.
pub trait SessionStore {
    /// Create a game.
    fn create_game(&self, game: NewGame) -> Result<Game>;

    /// All games, oldest first.
    fn list_games(&self) -> Result<Vec<Game>>;

    /// Get a game by ID.
    fn get_game(&self, id: &GameId) -> Result<Option<Game>>;

    /// Replace the notes of a game.
    fn update_game_notes(&self, id: &GameId, notes: &str) -> Result<Game>;

    /// Delete a game and all of its shots. Returns the number of shots removed.
    fn delete_game(&self, id: &GameId) -> Result<usize>;

    /// Record a shot against an existing game.
    ///
    /// The position must lie within `[0, 100]`. A shot outside the goal
    /// frame is stored as not saved.
    fn add_shot(&self, game_id: &GameId, shot: NewShot) -> Result<Shot>;

    /// Shots of one game, or of all games, in timestamp order.
    fn list_shots(&self, game_id: Option<&GameId>) -> Result<Vec<Shot>>;

    /// Get a shot by ID.
    fn get_shot(&self, id: &ShotId) -> Result<Option<Shot>>;

    /// Replace the notes of a shot.
    fn update_shot_notes(&self, id: &ShotId, notes: &str) -> Result<Shot>;

    /// Change the save status of a shot, with the same rule as `add_shot`.
    fn update_shot_saved(&self, id: &ShotId, saved: bool) -> Result<Shot>;

    /// Delete a single shot.
    fn delete_shot(&self, id: &ShotId) -> Result<()>;
}
