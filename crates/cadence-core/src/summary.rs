//! Summary — continuous metrics for a habit.
//!
//! One summary row exists per active habit. Only the streak calculator (and
//! the migration backfill) writes to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::HabitId;

/// Derived metrics for a habit. `target` and `target_date` are bookkeeping
/// fields the streak algorithm never reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
  pub habit_id:    HabitId,
  pub target:      Option<f64>,
  pub target_date: Option<NaiveDate>,
  /// Consecutive qualifying activity days, per the streak walk.
  pub streak:      u32,
}

impl Summary {
  pub fn new(habit_id: HabitId) -> Self {
    Self { habit_id, target: None, target_date: None, streak: 0 }
  }

  /// Human-readable streak, e.g. `"1 day"` or `"12 days"`.
  pub fn streak_display(&self) -> String {
    if self.streak == 1 {
      "1 day".to_owned()
    } else {
      format!("{} days", self.streak)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn streak_display_pluralizes() {
    let mut summary = Summary::new(HabitId(1));
    assert_eq!(summary.streak_display(), "0 days");
    summary.streak = 1;
    assert_eq!(summary.streak_display(), "1 day");
    summary.streak = 20;
    assert_eq!(summary.streak_display(), "20 days");
  }
}
