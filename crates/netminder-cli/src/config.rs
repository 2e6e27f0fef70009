//! Tracker configuration - database location, demo data and defaults
//!
//! Loaded from a RON file. Every field is optional; missing fields take
//! their default value.
//!
//! ```ron
//! (
//!     database: Some("sessions/netminder.db"),
//!     seed_demo: true,
//!     export_format: json,
//!     log_filter: "netminder_db=debug",
//!     goalkeeper: "Alex",
//! )
//! ```

use netminder_export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "netminder.ron";

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Settings for the tracker binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Database file; `None` keeps everything in memory
    pub database: Option<PathBuf>,
    /// Load the demo sessions into an empty store on startup
    pub seed_demo: bool,
    /// Format used by `export` when `--format` is not given
    pub export_format: ExportFormat,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Goalkeeper name for new games
    pub goalkeeper: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database: Some(PathBuf::from("netminder.db")),
            seed_demo: false,
            export_format: ExportFormat::Json,
            log_filter: "warn".to_string(),
            goalkeeper: "Default".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Parse a RON string
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// Load a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Load an explicit file, or `netminder.ron` if present, or defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
