//! Common query patterns for the database.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use netminder_core::{Game, GameId, Shot};

impl Store {
    /// Load all games, unordered.
    pub(crate) fn load_all_games(&self) -> Result<Vec<Game>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredGame>()?;
        let iter = scan.all()?;
        let games: std::result::Result<Vec<StoredGame>, _> = iter.collect();
        let games = games.map_err(|e| Error::Database(e.to_string()))?;
        Ok(games.into_iter().map(|g| g.to_game()).collect())
    }

    /// Load all shots, unordered.
    pub(crate) fn load_all_shots(&self) -> Result<Vec<Shot>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredShot>()?;
        let iter = scan.all()?;
        let shots: std::result::Result<Vec<StoredShot>, _> = iter.collect();
        let shots = shots.map_err(|e| Error::Database(e.to_string()))?;
        Ok(shots.into_iter().map(|s| s.to_shot()).collect())
    }

    /// Get all shots of a game, unordered.
    pub(crate) fn shots_for_game(&self, game_id: &GameId) -> Result<Vec<Shot>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredShot>(StoredShotKey::game_id)?;
        let iter = scan.start_with(game_id.as_str())?;
        let shots: std::result::Result<Vec<StoredShot>, _> = iter.collect();
        let shots = shots.map_err(|e| Error::Database(e.to_string()))?;
        Ok(shots
            .into_iter()
            .filter(|s| s.game_id == game_id.as_str())
            .map(|s| s.to_shot())
            .collect())
    }

    /// Count shots of a game.
    pub fn count_shots_for_game(&self, game_id: &GameId) -> Result<usize> {
        Ok(self.shots_for_game(game_id)?.len())
    }

    /// Count all games.
    pub fn count_games(&self) -> Result<usize> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredGame>()?;
        let iter = scan.all()?;
        Ok(iter.count())
    }

    /// Check whether the store holds no games.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.count_games()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{NewGame, NewShot, SessionStore, Store};
    use netminder_core::Position;

    #[test]
    fn test_counts() {
        let store = Store::in_memory().unwrap();
        assert!(store.is_empty().unwrap());

        let game = store.create_game(NewGame::new("Practice", "Default")).unwrap();
        for _ in 0..4 {
            store
                .add_shot(&game.id, NewShot::new(Position::unchecked(50.0, 50.0), true))
                .unwrap();
        }

        assert!(!store.is_empty().unwrap());
        assert_eq!(store.count_games().unwrap(), 1);
        assert_eq!(store.count_shots_for_game(&game.id).unwrap(), 4);
    }
}
