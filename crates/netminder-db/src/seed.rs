//! Demo data set: three practice sessions with three shots each.

use crate::error::Result;
use crate::models::{StoredGame, StoredShot};
use crate::store::Store;
use chrono::{DateTime, NaiveDate, Utc};
use netminder_core::{Game, GameId, Position, Power, Shot, ShotId};
use tracing::{debug, info};

struct DemoShot {
    id: &'static str,
    game: &'static str,
    saved: bool,
    x: f64,
    y: f64,
    power: Power,
    at: (u32, u32, u32, u32),
    notes: Option<&'static str>,
}

const DEMO_GAMES: [(&str, &str, (u32, u32, u32), &str); 3] = [
    ("game1", "Morning Practice - Jan 15", (15, 9, 0), "Good session, focused on low shots"),
    ("game2", "Evening Training - Jan 15", (15, 18, 0), "Worked on high corner saves"),
    ("game3", "Team Practice - Jan 16", (16, 14, 0), "Full team training session"),
];

#[rustfmt::skip]
const DEMO_SHOTS: [DemoShot; 9] = [
    DemoShot { id: "shot1", game: "game1", saved: true,  x: 30.0, y: 70.0, power: Power::Medium, at: (15, 9, 5, 0),   notes: Some("Good low save") },
    DemoShot { id: "shot2", game: "game1", saved: false, x: 80.0, y: 20.0, power: Power::High,   at: (15, 9, 7, 0),   notes: Some("Top corner shot") },
    DemoShot { id: "shot3", game: "game1", saved: true,  x: 50.0, y: 50.0, power: Power::Medium, at: (15, 9, 10, 0),  notes: None },
    DemoShot { id: "shot4", game: "game2", saved: true,  x: 15.0, y: 25.0, power: Power::High,   at: (15, 18, 5, 0),  notes: Some("Great stretch save") },
    DemoShot { id: "shot5", game: "game2", saved: false, x: 85.0, y: 15.0, power: Power::High,   at: (15, 18, 8, 0),  notes: None },
    DemoShot { id: "shot6", game: "game2", saved: true,  x: 45.0, y: 30.0, power: Power::Medium, at: (15, 18, 12, 0), notes: None },
    DemoShot { id: "shot7", game: "game3", saved: true,  x: 25.0, y: 60.0, power: Power::Low,    at: (16, 14, 5, 0),  notes: None },
    DemoShot { id: "shot8", game: "game3", saved: false, x: 75.0, y: 40.0, power: Power::High,   at: (16, 14, 8, 0),  notes: Some("Powerful strike") },
    DemoShot { id: "shot9", game: "game3", saved: true,  x: 50.0, y: 20.0, power: Power::Medium, at: (16, 14, 12, 0), notes: None },
];

/// 2024-01-`day` at the given UTC time.
fn january_2024(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

impl Store {
    /// Load the demo sessions into an empty store.
    ///
    /// Records are written as-is, including saved flags on shots outside
    /// the goal frame. Returns `false` without writing when the store
    /// already holds games.
    pub fn seed_demo(&self) -> Result<bool> {
        if !self.is_empty()? {
            debug!("store not empty, skipping demo seed");
            return Ok(false);
        }

        let rw = self.db.rw_transaction()?;
        for (id, name, (day, hour, min), notes) in DEMO_GAMES {
            let game = Game {
                id: GameId::new(id),
                name: name.to_string(),
                goalkeeper: "Default".to_string(),
                opponent: None,
                tournament: None,
                created_at: january_2024(day, hour, min, 0),
                notes: Some(notes.to_string()),
            };
            rw.insert(StoredGame::from_game(&game))?;
        }
        for demo in &DEMO_SHOTS {
            let (day, hour, min, sec) = demo.at;
            let mut shot = Shot::new(
                ShotId::new(demo.id),
                GameId::new(demo.game),
                Position::unchecked(demo.x, demo.y),
                demo.saved,
                january_2024(day, hour, min, sec).timestamp_millis(),
            )
            .with_power(demo.power);
            shot.notes = demo.notes.map(str::to_string);
            rw.insert(StoredShot::from_shot(&shot))?;
        }
        rw.commit()?;

        info!(
            games = DEMO_GAMES.len(),
            shots = DEMO_SHOTS.len(),
            "seeded demo sessions"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::{SessionStore, Store};
    use netminder_core::stats::ShotSummary;
    use netminder_core::GameId;

    #[test]
    fn test_seed_demo_once() {
        let store = Store::in_memory().unwrap();
        assert!(store.seed_demo().unwrap());
        assert!(!store.seed_demo().unwrap());

        let games = store.list_games().unwrap();
        let names: Vec<&str> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Morning Practice - Jan 15",
                "Evening Training - Jan 15",
                "Team Practice - Jan 16",
            ]
        );
        assert_eq!(store.list_shots(None).unwrap().len(), 9);
    }

    #[test]
    fn test_seeded_morning_practice() {
        let store = Store::in_memory().unwrap();
        store.seed_demo().unwrap();

        let shots = store.list_shots(Some(&GameId::new("game1"))).unwrap();
        let ids: Vec<&str> = shots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["shot1", "shot2", "shot3"]);

        let summary = ShotSummary::from_shots(&shots);
        assert_eq!(summary.saved_shots, 2);
        assert_eq!(summary.missed_shots, 1);
    }
}
