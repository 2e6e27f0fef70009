//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use crate::repository::{NewGame, NewShot, SessionStore};
use chrono::{SubsecRound, Utc};
use native_db::*;
use netminder_core::{geometry, Game, GameId, Position, Shot, ShotId};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models
        .define::<StoredGame>()
        .expect("StoredGame is a valid native_db model");
    models
        .define::<StoredShot>()
        .expect("StoredShot is a valid native_db model");
    models
});

/// Database store for games and shots.
pub struct Store {
    pub(crate) db: Database<'static>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Builder::new()
            .create(&MODELS, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        info!(path = %path.display(), "opened session store");
        Ok(Self {
            db,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        debug!("opened in-memory session store");
        Ok(Self { db, path: None })
    }

    /// Backing file, `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the store, releasing the database file.
    pub fn close(self) {
        match &self.path {
            Some(path) => info!(path = %path.display(), "closed session store"),
            None => debug!("closed in-memory session store"),
        }
        drop(self.db);
    }

    /// Clear all data.
    pub fn clear(&self) -> Result<()> {
        // First, collect all keys
        let (game_ids, shot_ids) = {
            let r = self.db.r_transaction()?;
            let games: std::result::Result<Vec<StoredGame>, _> =
                r.scan().primary::<StoredGame>()?.all()?.collect();
            let shots: std::result::Result<Vec<StoredShot>, _> =
                r.scan().primary::<StoredShot>()?.all()?.collect();
            let games = games.map_err(|e| Error::Database(e.to_string()))?;
            let shots = shots.map_err(|e| Error::Database(e.to_string()))?;
            (
                games.into_iter().map(|g| g.id).collect::<Vec<_>>(),
                shots.into_iter().map(|s| s.id).collect::<Vec<_>>(),
            )
        };

        // Now delete in a separate transaction
        let rw = self.db.rw_transaction()?;
        for id in &shot_ids {
            if let Some(shot) = rw.get().primary::<StoredShot>(id.clone())? {
                rw.remove(shot)?;
            }
        }
        for id in &game_ids {
            if let Some(game) = rw.get().primary::<StoredGame>(id.clone())? {
                rw.remove(game)?;
            }
        }
        rw.commit()?;

        info!(
            games = game_ids.len(),
            shots = shot_ids.len(),
            "cleared session store"
        );
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A shot outside the goal frame never threatened the goal.
fn normalize_saved(position: &Position, saved: bool) -> bool {
    let normalized = saved && geometry::is_inside_goal(position);
    if normalized != saved {
        debug!(x = position.x, y = position.y, "shot outside goal frame stored as not saved");
    }
    normalized
}

impl SessionStore for Store {
    fn create_game(&self, game: NewGame) -> Result<Game> {
        let game = Game {
            id: GameId::new(new_id()),
            name: game.name,
            goalkeeper: game.goalkeeper,
            opponent: game.opponent,
            tournament: game.tournament,
            // Stored with millisecond precision
            created_at: Utc::now().trunc_subsecs(3),
            notes: game.notes,
        };

        let rw = self.db.rw_transaction()?;
        rw.insert(StoredGame::from_game(&game))?;
        rw.commit()?;

        debug!(game = %game.id, name = %game.name, "created game");
        Ok(game)
    }

    fn list_games(&self) -> Result<Vec<Game>> {
        let mut games = self.load_all_games()?;
        games.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(games)
    }

    fn get_game(&self, id: &GameId) -> Result<Option<Game>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredGame> = r.get().primary(id.as_str().to_string())?;
        Ok(stored.map(|s| s.to_game()))
    }

    fn update_game_notes(&self, id: &GameId, notes: &str) -> Result<Game> {
        let rw = self.db.rw_transaction()?;
        let Some(mut stored) = rw.get().primary::<StoredGame>(id.as_str().to_string())? else {
            warn!(game = %id, "cannot update notes of missing game");
            return Err(Error::GameNotFound(id.clone()));
        };
        stored.notes = Some(notes.to_string());
        rw.upsert(stored.clone())?;
        rw.commit()?;

        debug!(game = %id, "updated game notes");
        Ok(stored.to_game())
    }

    fn delete_game(&self, id: &GameId) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        let Some(game) = rw.get().primary::<StoredGame>(id.as_str().to_string())? else {
            warn!(game = %id, "cannot delete missing game");
            return Err(Error::GameNotFound(id.clone()));
        };

        let shots: Vec<StoredShot> = {
            let scan = rw.scan().secondary::<StoredShot>(StoredShotKey::game_id)?;
            let iter = scan.start_with(id.as_str())?;
            let shots: std::result::Result<Vec<StoredShot>, _> = iter.collect();
            shots.map_err(|e| Error::Database(e.to_string()))?
        };

        // start_with is a prefix match
        let mut removed = 0;
        for shot in shots.into_iter().filter(|s| s.game_id == id.as_str()) {
            rw.remove(shot)?;
            removed += 1;
        }
        rw.remove(game)?;
        rw.commit()?;

        info!(game = %id, shots = removed, "deleted game");
        Ok(removed)
    }

    fn add_shot(&self, game_id: &GameId, shot: NewShot) -> Result<Shot> {
        let position = Position::new(shot.position.x, shot.position.y)?;

        let rw = self.db.rw_transaction()?;
        if rw
            .get()
            .primary::<StoredGame>(game_id.as_str().to_string())?
            .is_none()
        {
            warn!(game = %game_id, "cannot record shot for missing game");
            return Err(Error::GameNotFound(game_id.clone()));
        }

        let shot = Shot {
            id: ShotId::new(new_id()),
            game_id: game_id.clone(),
            saved: normalize_saved(&position, shot.saved),
            position,
            power: shot.power,
            notes: shot.notes,
            timestamp: shot.timestamp,
            half: shot.half,
        };
        rw.insert(StoredShot::from_shot(&shot))?;
        rw.commit()?;

        debug!(
            shot = %shot.id,
            game = %game_id,
            x = shot.position.x,
            y = shot.position.y,
            saved = shot.saved,
            "recorded shot"
        );
        Ok(shot)
    }

    fn list_shots(&self, game_id: Option<&GameId>) -> Result<Vec<Shot>> {
        let mut shots = match game_id {
            Some(id) => self.shots_for_game(id)?,
            None => self.load_all_shots()?,
        };
        shots.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(shots)
    }

    fn get_shot(&self, id: &ShotId) -> Result<Option<Shot>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredShot> = r.get().primary(id.as_str().to_string())?;
        Ok(stored.map(|s| s.to_shot()))
    }

    fn update_shot_notes(&self, id: &ShotId, notes: &str) -> Result<Shot> {
        let rw = self.db.rw_transaction()?;
        let Some(mut stored) = rw.get().primary::<StoredShot>(id.as_str().to_string())? else {
            warn!(shot = %id, "cannot update notes of missing shot");
            return Err(Error::ShotNotFound(id.clone()));
        };
        stored.notes = Some(notes.to_string());
        rw.upsert(stored.clone())?;
        rw.commit()?;

        debug!(shot = %id, "updated shot notes");
        Ok(stored.to_shot())
    }

    fn update_shot_saved(&self, id: &ShotId, saved: bool) -> Result<Shot> {
        let rw = self.db.rw_transaction()?;
        let Some(mut stored) = rw.get().primary::<StoredShot>(id.as_str().to_string())? else {
            warn!(shot = %id, "cannot update save status of missing shot");
            return Err(Error::ShotNotFound(id.clone()));
        };
        stored.saved = normalize_saved(&Position::unchecked(stored.x, stored.y), saved);
        rw.upsert(stored.clone())?;
        rw.commit()?;

        debug!(shot = %id, saved = stored.saved, "updated shot save status");
        Ok(stored.to_shot())
    }

    fn delete_shot(&self, id: &ShotId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let Some(stored) = rw.get().primary::<StoredShot>(id.as_str().to_string())? else {
            warn!(shot = %id, "cannot delete missing shot");
            return Err(Error::ShotNotFound(id.clone()));
        };
        rw.remove(stored)?;
        rw.commit()?;

        debug!(shot = %id, "deleted shot");
        Ok(())
    }
}
