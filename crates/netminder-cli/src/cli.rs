use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use netminder_core::stats::HalfFilter;
use netminder_core::{GameId, Half, ShotId};
use netminder_export::ExportFormat;

#[derive(Debug, Parser)]
#[command(name = "netminder")]
#[command(about = "Goalkeeper shot tracker", long_about = None)]
pub struct Cli {
    /// RON config file (defaults to ./netminder.ron when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true, conflicts_with = "memory")]
    pub db: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, global = true)]
    pub memory: bool,

    /// Load the demo sessions into an empty store before running
    #[arg(long, global = true)]
    pub seed: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage games
    #[command(subcommand)]
    Game(GameCommand),

    /// Manage shots
    #[command(subcommand)]
    Shot(ShotCommand),

    /// Totals, saves, goals, misses and save percentage
    Stats(Selection),

    /// Per-zone breakdown of shots inside the goal frame
    Zones(Selection),

    /// Saves, goals and misses per half
    Halves {
        #[arg(short, long)]
        game: Option<GameId>,
    },

    /// Save percentage per calendar date
    Trend {
        #[arg(short, long)]
        game: Option<GameId>,
        /// Group dates in UTC instead of local time
        #[arg(long)]
        utc: bool,
    },

    /// Compare every game side by side
    Compare,

    /// Saves versus goals by recorded outcome
    Outcomes(Selection),

    /// Training recommendations for weak regions
    Recommend(Selection),

    /// Export one game
    Export {
        game: GameId,
        /// json, ron, csv or text (defaults to the configured format)
        #[arg(short, long)]
        format: Option<ExportFormat>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the demo sessions into an empty store
    Seed,

    /// Delete every game and shot
    Clear,
}

/// Which shots a report looks at
#[derive(Debug, Clone, Args)]
pub struct Selection {
    #[arg(short, long)]
    pub game: Option<GameId>,
    /// all, first or second
    #[arg(long, default_value = "all")]
    pub half: HalfFilter,
}

#[derive(Debug, Subcommand)]
pub enum GameCommand {
    /// Start a new game
    Create {
        name: String,
        /// Defaults to the configured goalkeeper
        #[arg(long)]
        goalkeeper: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
        #[arg(long)]
        tournament: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List games, oldest first
    List,
    /// Show one game
    Show { id: GameId },
    /// Replace a game's notes
    Notes { id: GameId, notes: String },
    /// Delete a game and all of its shots
    Delete { id: GameId },
}

#[derive(Debug, Subcommand)]
pub enum ShotCommand {
    /// Record a shot
    Add {
        game: GameId,
        x: f64,
        y: f64,
        /// The goalkeeper saved it
        #[arg(long)]
        saved: bool,
        /// 1 (low) to 3 (high)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        power: Option<u8>,
        /// first or second
        #[arg(long)]
        half: Option<Half>,
        #[arg(long)]
        notes: Option<String>,
        /// Milliseconds since the Unix epoch, defaults to now
        #[arg(long)]
        timestamp: Option<i64>,
    },
    /// List shots, oldest first
    List(Selection),
    /// Find the recorded shot within the hit radius of a point
    Find { game: GameId, x: f64, y: f64 },
    /// Replace a shot's notes
    Notes { id: ShotId, notes: String },
    /// Change a shot's outcome
    Saved {
        id: ShotId,
        #[arg(action = ArgAction::Set)]
        saved: bool,
    },
    /// Delete a shot
    Delete { id: ShotId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_shot_add() {
        let cli = Cli::try_parse_from([
            "netminder", "shot", "add", "game1", "40", "60", "--saved", "--power", "3", "--half",
            "second",
        ])
        .unwrap();

        match cli.command {
            Command::Shot(ShotCommand::Add {
                game,
                x,
                y,
                saved,
                power,
                half,
                ..
            }) => {
                assert_eq!(game, GameId::new("game1"));
                assert_eq!((x, y), (40.0, 60.0));
                assert!(saved);
                assert_eq!(power, Some(3));
                assert_eq!(half, Some(Half::Second));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let bad_power = ["netminder", "shot", "add", "g", "1", "2", "--power", "4"];
        assert!(Cli::try_parse_from(bad_power).is_err());
        assert!(Cli::try_parse_from(["netminder", "stats", "--half", "third"]).is_err());
        assert!(Cli::try_parse_from(["netminder", "export", "g", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["netminder", "stats", "--memory", "--seed", "--json"]).unwrap();
        assert!(cli.memory && cli.seed && cli.json);
        match cli.command {
            Command::Stats(selection) => assert_eq!(selection.half, HalfFilter::All),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
