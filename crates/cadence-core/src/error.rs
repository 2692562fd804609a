//! Error types for `cadence-core`.

use thiserror::Error;

use crate::habit::HabitId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("day count must be non-negative, got {0}")]
  InvalidDayCount(i64),

  #[error("habit not found: {0}")]
  HabitNotFound(HabitId),

  #[error("no summary recorded for habit {0}")]
  SummaryNotFound(HabitId),

  /// A name-based lookup matched zero or more than one active habit.
  #[error("habit name {query:?} matched {} habits", matches.len())]
  AmbiguousHabit {
    query:   String,
    /// Names of every habit that matched; empty when nothing matched.
    matches: Vec<String>,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
