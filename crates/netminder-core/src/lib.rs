//! Netminder Core - Shot classification and aggregation engine
//!
//! This crate provides the pure, in-memory half of the goalkeeper tracker:
//! - Shot and game records (`Shot`, `Game`, `Position`, `Half`, `Power`)
//! - Geometry classification (goal frame, 9 named zones, hit testing)
//! - Aggregation (save percentage, zone, half, date and session stats)
//! - Training recommendations derived from per-region save rates
//!
//! Every function here is a total function over a borrowed snapshot of
//! shots. Storage lives in `netminder-db`.
//!
//! ## Example
//!
//! ```
//! use netminder_core::{stats::ShotSummary, GameId, Position, Shot, ShotId};
//!
//! let shot = Shot::new(
//!     ShotId::new("s1"),
//!     GameId::new("g1"),
//!     Position::new(50.0, 50.0).unwrap(),
//!     true,
//!     0,
//! );
//! let summary = ShotSummary::from_shots(&[shot]);
//! assert_eq!(summary.saved_shots, 1);
//! assert_eq!(summary.save_percentage, 100.0);
//! ```

mod error;
pub mod geometry;
mod identity;
mod model;
pub mod recommend;
pub mod stats;

pub use error::{Error, Result};
pub use geometry::{classify, classify_zone, is_inside_goal, Classification, Zone};
pub use identity::{GameId, ShotId};
pub use model::{Game, Half, Position, Power, Shot};
pub use recommend::{recommend, Region, TrainingRecommendation};
