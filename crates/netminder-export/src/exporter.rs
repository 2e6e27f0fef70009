//! Export game data to various formats

use crate::{Error, Result};
use netminder_core::geometry::classify;
use netminder_core::recommend::{recommend, ENCOURAGEMENT};
use netminder_core::stats::{half_stats, zone_stats, ShotSummary};
use netminder_core::{Game, GameId, Shot};
use netminder_db::SessionStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON format
    #[default]
    Json,
    /// RON format (Rust Object Notation)
    Ron,
    /// CSV format (shots only)
    Csv,
    /// Human-readable text format
    Text,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Ron => "ron",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportFormat::Json => "json",
            ExportFormat::Ron => "ron",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "text",
        };
        f.write_str(s)
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "ron" => Ok(ExportFormat::Ron),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(Error::ExportError(format!("Unknown export format: {}", other))),
        }
    }
}

/// Headline stats of an exported game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStats {
    pub total_shots: usize,
    pub saved_shots: usize,
    pub save_percentage: f64,
}

impl From<ShotSummary> for ExportStats {
    fn from(summary: ShotSummary) -> Self {
        Self {
            total_shots: summary.total_shots,
            saved_shots: summary.saved_shots,
            save_percentage: summary.save_percentage,
        }
    }
}

/// The exported document for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameExport {
    pub game: Game,
    pub shots: Vec<Shot>,
    pub stats: ExportStats,
}

/// Exporter for game data
pub struct Exporter<'a, S: SessionStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SessionStore + ?Sized> Exporter<'a, S> {
    /// Create a new exporter
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Collect the game, its shots and their stats
    pub fn build(&self, game_id: &GameId) -> Result<GameExport> {
        let game = self
            .store
            .get_game(game_id)?
            .ok_or_else(|| Error::GameNotFound(game_id.clone()))?;
        let shots = self.store.list_shots(Some(game_id))?;
        let stats = ShotSummary::from_shots(&shots).into();
        Ok(GameExport { game, shots, stats })
    }

    /// Export one game to a string in the specified format
    pub fn export_game(&self, game_id: &GameId, format: ExportFormat) -> Result<String> {
        let export = self.build(game_id)?;
        debug!(game = %game_id, %format, shots = export.shots.len(), "exporting game");
        match format {
            ExportFormat::Json => to_json(&export),
            ExportFormat::Ron => to_ron(&export),
            ExportFormat::Csv => Ok(to_csv(&export.shots)),
            ExportFormat::Text => Ok(to_text(&export)),
        }
    }

    /// Export one game to a writer
    pub fn export_game_to<W: Write>(
        &self,
        writer: &mut W,
        game_id: &GameId,
        format: ExportFormat,
    ) -> Result<()> {
        let content = self.export_game(game_id, format)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| Error::ExportError(e.to_string()))?;
        Ok(())
    }
}

/// Pretty JSON with two-space indentation
pub fn to_json(export: &GameExport) -> Result<String> {
    serde_json::to_string_pretty(export).map_err(|e| Error::Serialization(e.to_string()))
}

pub fn to_ron(export: &GameExport) -> Result<String> {
    ron::ser::to_string_pretty(export, ron::ser::PrettyConfig::default())
        .map_err(|e| Error::Serialization(e.to_string()))
}

/// One row per shot
pub fn to_csv(shots: &[Shot]) -> String {
    let mut output = String::new();
    output.push_str("id,x,y,saved,inside_goal,zone,half,power,timestamp,notes\n");

    for shot in shots {
        let class = classify(&shot.position);
        let half = shot.half.map(|h| h.to_string()).unwrap_or_default();
        let power = shot
            .power
            .map(|p| u8::from(p).to_string())
            .unwrap_or_default();
        // Escape CSV fields
        let notes = shot.notes.as_deref().unwrap_or("").replace('"', "\"\"");

        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},\"{}\"\n",
            shot.id,
            shot.position.x,
            shot.position.y,
            shot.saved,
            class.inside_goal,
            class.zone,
            half,
            power,
            shot.timestamp,
            notes
        ));
    }

    output
}

/// Human-readable report
pub fn to_text(export: &GameExport) -> String {
    let mut output = String::new();
    let game = &export.game;
    let summary = ShotSummary::from_shots(&export.shots);

    output.push_str("=== Game Export ===\n\n");
    output.push_str(&format!("Game: {}\n", game.name));
    output.push_str(&format!("Goalkeeper: {}\n", game.goalkeeper));
    if let Some(opponent) = &game.opponent {
        output.push_str(&format!("Opponent: {}\n", opponent));
    }
    if let Some(tournament) = &game.tournament {
        output.push_str(&format!("Tournament: {}\n", tournament));
    }
    output.push_str(&format!(
        "Created: {}\n",
        game.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(notes) = &game.notes {
        output.push_str(&format!("Notes: {}\n", notes));
    }

    output.push_str(&format!("\nTotal shots: {}\n", summary.total_shots));
    output.push_str(&format!("Saves: {}\n", summary.saved_shots));
    output.push_str(&format!("Goals: {}\n", summary.goals_scored));
    output.push_str(&format!("Misses: {}\n", summary.missed_shots));
    output.push_str(&format!("Save %: {:.1}%\n", summary.save_percentage));

    output.push_str("\n=== Halves ===\n\n");
    let halves = half_stats(&export.shots);
    for (label, stats) in [("First", halves.first), ("Second", halves.second)] {
        output.push_str(&format!(
            "{} half: {} saves, {} goals, {} misses\n",
            label, stats.saves, stats.goals, stats.misses
        ));
    }

    output.push_str("\n=== Zones ===\n\n");
    for (zone, stats) in zone_stats(&export.shots).iter() {
        let rate = stats
            .save_rate()
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<13} {}/{} saved ({})\n",
            zone.name(),
            stats.saved,
            stats.total,
            rate
        ));
    }

    output.push_str("\n=== Recommendations ===\n\n");
    let recommendations = recommend(&export.shots);
    if recommendations.is_empty() {
        output.push_str(ENCOURAGEMENT);
        output.push('\n');
    }
    for rec in recommendations {
        output.push_str(&format!("{} Side: {}\n", rec.area, rec.improvement));
        for drill in &rec.drills {
            output.push_str(&format!("  - {}\n", drill));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use netminder_db::{NewGame, NewShot, Store};
    use netminder_core::Position;

    fn seeded_store() -> Store {
        let store = Store::in_memory().unwrap();
        store.seed_demo().unwrap();
        store
    }

    #[test]
    fn test_export_json_layout() {
        let store = seeded_store();
        let exporter = Exporter::new(&store);
        let json = exporter
            .export_game(&GameId::new("game1"), ExportFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["game"]["name"], "Morning Practice - Jan 15");
        assert_eq!(value["shots"].as_array().unwrap().len(), 3);
        assert_eq!(value["shots"][0]["gameId"], "game1");
        assert_eq!(value["stats"]["totalShots"], 3);
        assert_eq!(value["stats"]["savedShots"], 2);
        let pct = value["stats"]["savePercentage"].as_f64().unwrap();
        assert!((pct - 66.67).abs() < 0.01);
        assert!(json.contains("\n  \"game\""));
    }

    #[test]
    fn test_export_empty_game_has_zero_percentage() {
        let store = Store::in_memory().unwrap();
        let game = store.create_game(NewGame::new("Empty", "Default")).unwrap();

        let export = Exporter::new(&store).build(&game.id).unwrap();
        assert_eq!(export.stats.total_shots, 0);
        assert_eq!(export.stats.save_percentage, 0.0);

        let json = to_json(&export).unwrap();
        let back: GameExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn test_export_missing_game() {
        let store = Store::in_memory().unwrap();
        let err = Exporter::new(&store)
            .export_game(&GameId::new("nope"), ExportFormat::Json)
            .unwrap_err();
        assert!(matches!(err, Error::GameNotFound(_)));
    }

    #[test]
    fn test_export_ron() {
        let store = seeded_store();
        let ron = Exporter::new(&store)
            .export_game(&GameId::new("game2"), ExportFormat::Ron)
            .unwrap();

        assert!(ron.contains("stats"));
        assert!(ron.contains("Evening Training - Jan 15"));
    }

    #[test]
    fn test_export_csv() {
        let store = Store::in_memory().unwrap();
        let game = store.create_game(NewGame::new("Match", "Default")).unwrap();
        store
            .add_shot(
                &game.id,
                NewShot::new(Position::unchecked(10.0, 10.0), false)
                    .at(5)
                    .with_notes("wide \"left\""),
            )
            .unwrap();

        let csv = Exporter::new(&store)
            .export_game(&game.id, ExportFormat::Csv)
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,x,y,saved,inside_goal,zone,half,power,timestamp,notes");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(",10,10,false,false,upper left,,,5,\"wide \"\"left\"\"\""));
    }

    #[test]
    fn test_export_text() {
        let store = seeded_store();
        let text = Exporter::new(&store)
            .export_game(&GameId::new("game1"), ExportFormat::Text)
            .unwrap();

        assert!(text.contains("Game Export"));
        assert!(text.contains("Save %: 66.7%"));
        assert!(text.contains("First half: 2 saves, 0 goals, 1 misses"));
        assert!(text.contains("center        1/1 saved (100.0%)"));
        assert!(text.contains("Right Side: Improve right side saves"));
    }

    #[test]
    fn test_export_to_writer() {
        let store = seeded_store();
        let mut buffer = Vec::new();
        Exporter::new(&store)
            .export_game_to(&mut buffer, &GameId::new("game3"), ExportFormat::Csv)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 4);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Text.extension(), "txt");
    }
}
