//! SQLite backend for the Cadence habit store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Schema migrations are not run
//! implicitly: the caller owns the open → migrate → use lifecycle.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod migrate;

pub use error::{Error, Result};
pub use migrate::{MigrationStatus, Migrator, SchemaVersion};
pub use store::SqliteStore;
