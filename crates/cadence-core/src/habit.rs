//! Habit — the tracked recurring commitment.
//!
//! A habit records what the user committed to (a quantum of some unit per
//! day) and a few presentation fields. Progress lives in activity rows; the
//! habit itself is only mutated by the add/edit/delete operations.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier for a habit. Small enough to type on the command line.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HabitId(pub i64);

impl fmt::Display for HabitId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// A tracked recurring commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
  pub id:           HabitId,
  pub name:         String,
  pub created_date: NaiveDate,
  pub start_date:   NaiveDate,
  /// Check-in interval in days. Carried for display only; the streak walk
  /// always uses a one-day gap bound.
  pub frequency:    u32,
  /// The daily goal amount (or ceiling, when `minimize` is set).
  pub quantum:      f64,
  pub units:        String,
  /// Free-text rationale — why this habit matters to the user.
  pub motivation:   String,
  /// If true, success means staying at or under `quantum`.
  pub minimize:     bool,
  pub active:       bool,
}

impl Habit {
  /// Whether a day's summed activity meets this habit's goal.
  pub fn goal_met(&self, total: f64) -> bool {
    if self.minimize {
      total <= self.quantum
    } else {
      total >= self.quantum
    }
  }
}

/// Parameters for creating a habit. The store assigns id and creation date.
#[derive(Debug, Clone)]
pub struct NewHabit {
  pub name:       String,
  pub quantum:    f64,
  pub units:      String,
  pub motivation: String,
  pub frequency:  u32,
  pub minimize:   bool,
  /// Defaults to the creation date when `None`.
  pub start_date: Option<NaiveDate>,
}

impl NewHabit {
  pub fn new(name: impl Into<String>, quantum: f64) -> Self {
    Self {
      name: name.into(),
      quantum,
      units: "units".to_owned(),
      motivation: String::new(),
      frequency: 1,
      minimize: false,
      start_date: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn habit(quantum: f64, minimize: bool) -> Habit {
    Habit {
      id: HabitId(1),
      name: "writing".into(),
      created_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
      start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
      frequency: 1,
      quantum,
      units: "words".into(),
      motivation: String::new(),
      minimize,
      active: true,
    }
  }

  #[test]
  fn goal_met_requires_quantum() {
    let h = habit(750.0, false);
    assert!(h.goal_met(750.0));
    assert!(h.goal_met(800.0));
    assert!(!h.goal_met(749.9));
  }

  #[test]
  fn minimize_inverts_the_comparison() {
    let h = habit(2.0, true);
    assert!(h.goal_met(1.0));
    assert!(h.goal_met(2.0));
    assert!(!h.goal_met(3.0));
  }
}
