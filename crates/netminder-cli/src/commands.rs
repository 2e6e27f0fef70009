//! Command execution
//!
//! Every command writes its report to `out`, either as plain text or as
//! pretty JSON when `--json` is set.

use std::fs;
use std::io::Write;

use anyhow::{anyhow, Context};
use chrono::Utc;
use netminder_core::geometry::{find_near, HIT_RADIUS};
use netminder_core::recommend::ENCOURAGEMENT;
use netminder_core::stats::{
    compare_sessions, daily_stats, daily_stats_local, filter_by_half, half_stats,
    outcome_distribution, zone_stats, ShotSummary,
};
use netminder_core::{recommend, GameId, Power, Position, Shot};
use netminder_db::{NewGame, NewShot, SessionStore, Store};
use netminder_export::{ExportFormat, Exporter};
use serde::Serialize;
use tracing::info;

use crate::cli::{Command, GameCommand, Selection, ShotCommand};
use crate::config::TrackerConfig;

/// Runs one command against an open store
pub fn run<W: Write>(
    command: Command,
    store: &Store,
    config: &TrackerConfig,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Game(cmd) => run_game(cmd, store, config, json, out),
        Command::Shot(cmd) => run_shot(cmd, store, json, out),
        Command::Stats(selection) => {
            let summary = ShotSummary::from_shots(&select(store, &selection)?);
            emit(out, json, &summary, |out| {
                writeln!(out, "Total shots: {}", summary.total_shots)?;
                writeln!(out, "Saves:       {}", summary.saved_shots)?;
                writeln!(out, "Goals:       {}", summary.goals_scored)?;
                writeln!(out, "Misses:      {}", summary.missed_shots)?;
                writeln!(out, "Save %:      {:.1}%", summary.save_percentage)
            })
        }
        Command::Zones(selection) => {
            let zones = zone_stats(&select(store, &selection)?);
            emit(out, json, &zones, |out| {
                for (zone, stats) in zones.iter() {
                    match stats.save_rate() {
                        Some(rate) => writeln!(
                            out,
                            "{:<13} {}/{} saved ({:.1}%)",
                            zone.name(),
                            stats.saved,
                            stats.total,
                            rate
                        )?,
                        None => writeln!(out, "{:<13} no shots", zone.name())?,
                    }
                }
                Ok(())
            })
        }
        Command::Halves { game } => {
            let shots = shots_of(store, game.as_ref())?;
            let halves = half_stats(&shots);
            emit(out, json, &halves, |out| {
                let rows = [("First half", halves.first), ("Second half", halves.second)];
                for (label, stats) in rows {
                    writeln!(
                        out,
                        "{:<12} {} saves, {} goals, {} misses",
                        label, stats.saves, stats.goals, stats.misses
                    )?;
                }
                Ok(())
            })
        }
        Command::Trend { game, utc } => {
            let shots = shots_of(store, game.as_ref())?;
            let days = if utc {
                daily_stats(&shots, &Utc)
            } else {
                daily_stats_local(&shots)
            };
            emit(out, json, &days, |out| {
                for day in &days {
                    writeln!(
                        out,
                        "{}  {}/{} saved  {}%",
                        day.date, day.saved, day.total, day.percentage
                    )?;
                }
                Ok(())
            })
        }
        Command::Compare => {
            let sessions = compare_sessions(&store.list_games()?, &store.list_shots(None)?);
            emit(out, json, &sessions, |out| {
                for session in &sessions {
                    writeln!(
                        out,
                        "{:<32} {}/{}  {:.1}%",
                        session.name, session.saves, session.total, session.percentage
                    )?;
                }
                Ok(())
            })
        }
        Command::Outcomes(selection) => {
            let outcomes = outcome_distribution(&select(store, &selection)?);
            emit(out, json, &outcomes, |out| {
                writeln!(out, "Saves: {}", outcomes.saves)?;
                writeln!(out, "Goals: {}", outcomes.goals)
            })
        }
        Command::Recommend(selection) => {
            let recommendations = recommend(&select(store, &selection)?);
            emit(out, json, &recommendations, |out| {
                if recommendations.is_empty() {
                    return writeln!(out, "{}", ENCOURAGEMENT);
                }
                for rec in &recommendations {
                    writeln!(out, "{}", rec.improvement)?;
                    for drill in &rec.drills {
                        writeln!(out, "  - {}", drill)?;
                    }
                }
                Ok(())
            })
        }
        Command::Export {
            game,
            format,
            output,
        } => {
            let format = format.unwrap_or(config.export_format);
            let content = Exporter::new(store)
                .export_game(&game, format)
                .with_context(|| format!("failed to export game {}", game))?;
            match output {
                Some(path) => {
                    fs::write(&path, content)
                        .with_context(|| format!("failed to write: {}", path.display()))?;
                    info!(game = %game, %format, path = %path.display(), "exported game");
                }
                None => {
                    out.write_all(content.as_bytes())?;
                    if format != ExportFormat::Csv && format != ExportFormat::Text {
                        writeln!(out)?;
                    }
                }
            }
            Ok(())
        }
        Command::Seed => {
            let seeded = store.seed_demo()?;
            if seeded {
                writeln!(out, "Seeded demo sessions")?;
            } else {
                writeln!(out, "Store already has games, nothing seeded")?;
            }
            Ok(())
        }
        Command::Clear => {
            store.clear()?;
            writeln!(out, "Cleared all games and shots")?;
            Ok(())
        }
    }
}

fn run_game<W: Write>(
    cmd: GameCommand,
    store: &Store,
    config: &TrackerConfig,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    match cmd {
        GameCommand::Create {
            name,
            goalkeeper,
            opponent,
            tournament,
            notes,
        } => {
            let mut new_game =
                NewGame::new(name, goalkeeper.unwrap_or_else(|| config.goalkeeper.clone()));
            new_game.opponent = opponent;
            new_game.tournament = tournament;
            new_game.notes = notes;
            let game = store.create_game(new_game)?;
            emit(out, json, &game, |out| writeln!(out, "{}", game.id))
        }
        GameCommand::List => {
            let games = store.list_games()?;
            emit(out, json, &games, |out| {
                for game in &games {
                    writeln!(
                        out,
                        "{}  {}  {}  {}",
                        game.id,
                        game.created_at.format("%Y-%m-%d %H:%M"),
                        game.name,
                        game.goalkeeper
                    )?;
                }
                Ok(())
            })
        }
        GameCommand::Show { id } => {
            let game = store
                .get_game(&id)?
                .ok_or_else(|| anyhow!("game not found: {}", id))?;
            let shots = store.count_shots_for_game(&id)?;
            emit(out, json, &game, |out| {
                writeln!(out, "Name:       {}", game.name)?;
                writeln!(out, "Goalkeeper: {}", game.goalkeeper)?;
                if let Some(opponent) = &game.opponent {
                    writeln!(out, "Opponent:   {}", opponent)?;
                }
                if let Some(tournament) = &game.tournament {
                    writeln!(out, "Tournament: {}", tournament)?;
                }
                writeln!(out, "Created:    {}", game.created_at.to_rfc3339())?;
                writeln!(out, "Shots:      {}", shots)?;
                if let Some(notes) = &game.notes {
                    writeln!(out, "Notes:      {}", notes)?;
                }
                Ok(())
            })
        }
        GameCommand::Notes { id, notes } => {
            let game = store.update_game_notes(&id, &notes)?;
            emit(out, json, &game, |out| writeln!(out, "Updated notes for {}", game.id))
        }
        GameCommand::Delete { id } => {
            let removed = store.delete_game(&id)?;
            writeln!(out, "Deleted game {} and {} shots", id, removed)?;
            Ok(())
        }
    }
}

fn run_shot<W: Write>(
    cmd: ShotCommand,
    store: &Store,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    match cmd {
        ShotCommand::Add {
            game,
            x,
            y,
            saved,
            power,
            half,
            notes,
            timestamp,
        } => {
            let position = Position::new(x, y)?;
            let mut new_shot = NewShot::new(position, saved);
            if let Some(ts) = timestamp {
                new_shot = new_shot.at(ts);
            }
            if let Some(power) = power {
                new_shot = new_shot.with_power(Power::try_from(power)?);
            }
            if let Some(half) = half {
                new_shot = new_shot.with_half(half);
            }
            if let Some(notes) = notes {
                new_shot = new_shot.with_notes(notes);
            }
            let shot = store.add_shot(&game, new_shot)?;
            emit(out, json, &shot, |out| writeln!(out, "{}", shot.id))
        }
        ShotCommand::List(selection) => {
            let shots = select(store, &selection)?;
            emit(out, json, &shots, |out| {
                for shot in &shots {
                    write_shot_line(out, shot)?;
                }
                Ok(())
            })
        }
        ShotCommand::Find { game, x, y } => {
            let shots = shots_of(store, Some(&game))?;
            let target = Position::unchecked(x, y);
            let shot = find_near(&shots, &target, HIT_RADIUS)
                .ok_or_else(|| anyhow!("no shot within {} of ({}, {})", HIT_RADIUS, x, y))?;
            emit(out, json, shot, |out| write_shot_line(out, shot))
        }
        ShotCommand::Notes { id, notes } => {
            let shot = store.update_shot_notes(&id, &notes)?;
            emit(out, json, &shot, |out| writeln!(out, "Updated notes for {}", shot.id))
        }
        ShotCommand::Saved { id, saved } => {
            let shot = store.update_shot_saved(&id, saved)?;
            emit(out, json, &shot, |out| {
                writeln!(out, "{} saved: {}", shot.id, shot.saved)
            })
        }
        ShotCommand::Delete { id } => {
            store.delete_shot(&id)?;
            writeln!(out, "Deleted shot {}", id)?;
            Ok(())
        }
    }
}

/// Shots of one game, or of every game when `game` is `None`
fn shots_of(store: &Store, game: Option<&GameId>) -> anyhow::Result<Vec<Shot>> {
    if let Some(game) = game {
        if store.get_game(game)?.is_none() {
            return Err(anyhow!("game not found: {}", game));
        }
    }
    Ok(store.list_shots(game)?)
}

/// `shots_of`, narrowed to a half
fn select(store: &Store, selection: &Selection) -> anyhow::Result<Vec<Shot>> {
    let shots = shots_of(store, selection.game.as_ref())?;
    Ok(filter_by_half(&shots, selection.half))
}

fn write_shot_line<W: Write>(out: &mut W, shot: &Shot) -> std::io::Result<()> {
    let outcome = match (shot.is_inside_goal(), shot.saved) {
        (false, _) => "miss",
        (true, true) => "save",
        (true, false) => "goal",
    };
    let zone = if shot.is_inside_goal() {
        shot.zone().name()
    } else {
        "-"
    };
    write!(
        out,
        "{}  {}  ({:.1}, {:.1})  {:<4}  {:<13} {:<6}",
        shot.id,
        shot.game_id,
        shot.position.x,
        shot.position.y,
        outcome,
        zone,
        shot.effective_half(),
    )?;
    if let Some(power) = shot.power {
        write!(out, "  {}", power.label())?;
    }
    if let Some(notes) = &shot.notes {
        write!(out, "  {}", notes)?;
    }
    writeln!(out)
}

fn emit<W, T, F>(out: &mut W, json: bool, value: &T, text: F) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
    F: FnOnce(&mut W) -> std::io::Result<()>,
{
    if json {
        let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
        writeln!(out, "{}", rendered)?;
    } else {
        text(out)?;
    }
    Ok(())
}
