//! SQLite-backed store for computed analytics payloads.
//!
//! One row per normalized query, holding the serialized payload verbatim.
//! Async access via tokio-rusqlite with:
//!
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Upsert semantics (last write wins; racing writers are tolerated)
//!
//! Entries never expire; only an explicit clear empties the table.

pub mod connection;
pub mod migrations;
pub mod results;

pub use crate::Error;

pub use connection::CacheDb;
