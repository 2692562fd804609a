//! Error type for `cadence-store-sqlite`.

use cadence_core::habit::HabitId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] cadence_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("habit not found: {0}")]
  HabitNotFound(HabitId),

  /// A schema migration step failed. Fatal: the store must not be used.
  #[error("schema migration failed: {0}")]
  Migration(#[source] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
