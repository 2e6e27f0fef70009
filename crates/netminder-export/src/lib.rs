//! Netminder Export - Game data export
//!
//! Builds the `{game, shots, stats}` document for one game from any
//! [`SessionStore`](netminder_db::SessionStore) and renders it as:
//!
//! - **JSON**: the interchange layout, camelCase field names
//! - **RON**: the same document in Rust Object Notation
//! - **CSV**: one row per shot with its geometry labels
//! - **Text**: a human-readable report with halves, zones and recommendations
//!
//! # Example
//!
//! ```rust,ignore
//! use netminder_db::Store;
//! use netminder_export::{ExportFormat, Exporter};
//!
//! let store = Store::in_memory()?;
//! store.seed_demo()?;
//!
//! let exporter = Exporter::new(&store);
//! let json = exporter.export_game(&"game1".into(), ExportFormat::Json)?;
//! ```

mod error;
mod exporter;

pub use error::{Error, Result};
pub use exporter::{ExportFormat, ExportStats, Exporter, GameExport};
