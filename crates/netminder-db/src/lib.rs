//! Netminder DB - Session store using native_db
//!
//! Provides persistent storage for:
//! - Games (practice and match sessions)
//! - Shots recorded against a game
//!
//! The store is opened and closed explicitly. Every write runs in its own
//! read-write transaction, so deleting a game removes its shots in the same
//! commit.

mod error;
mod models;
mod queries;
mod repository;
mod seed;
mod store;

pub use error::{Error, Result};
pub use repository::{NewGame, NewShot, SessionStore};
pub use store::Store;
