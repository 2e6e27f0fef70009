//! Database models for persistent storage.

mod game;
mod shot;

pub use game::*;
pub use shot::*;
