//! Activity — one recorded contribution of progress toward a habit's goal.
//!
//! Activities are append-only: created by a check-in, never updated, and
//! deleted only when their owning habit is hard-deleted. Several activities
//! may land on the same calendar day; they are additive.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::habit::HabitId;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ActivityId(pub i64);

impl fmt::Display for ActivityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// A timestamped quantity contributed toward a habit. The quantum may be
/// negative (a correction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
  pub id:          ActivityId,
  pub habit_id:    HabitId,
  pub quantum:     f64,
  /// Local wall-clock time of the check-in; day bucketing uses its date.
  pub update_date: NaiveDateTime,
}
