//! Embedded SQLite persistence for the QuikClips backend.
//!
//! All SQL runs on a dedicated database thread fed by a command channel;
//! async callers get their results back over oneshot channels. Repository
//! methods live in `videos` and `clips`.

mod clips;
mod connection;
mod error;
mod helpers;
mod migrations;
mod videos;

pub use connection::Database;
pub use error::{DbError, DbResult};
