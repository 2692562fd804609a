//! The `HabitStore` trait — the narrow read/write contract the engines
//! operate through.
//!
//! The trait is implemented by storage backends (e.g.
//! `cadence-store-sqlite`) and by the in-memory fake used in tests. The
//! aggregation engine, streak calculator and check-in flow are generic over
//! it, so none of them ever see a database handle.

use std::future::Future;

use chrono::NaiveDateTime;

use crate::{
  activity::Activity,
  habit::{Habit, HabitId, NewHabit},
  summary::Summary,
};

/// Abstraction over a Cadence habit store backend.
///
/// All methods return `Send` futures so the trait can be driven from
/// multi-threaded async runtimes. The store itself assumes single-process,
/// single-writer access; it performs no locking of its own.
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Habits ────────────────────────────────────────────────────────────

  /// Create and persist a new habit along with its (empty) summary row.
  fn add_habit(
    &self,
    input: NewHabit,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Retrieve a habit by id. Returns `None` if not found.
  fn get_habit(
    &self,
    id: HabitId,
  ) -> impl Future<Output = Result<Option<Habit>, Self::Error>> + Send + '_;

  /// List all habits with `active = true`, in creation order.
  fn list_active_habits(
    &self,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  /// Patch a habit's name and/or quantum. `None` leaves a field unchanged.
  /// Errors if the habit does not exist.
  fn edit_habit(
    &self,
    id: HabitId,
    name: Option<String>,
    quantum: Option<f64>,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Delete a habit. With `keep_logs` the habit is only deactivated and its
  /// history retained; otherwise the habit, its activities and its summary
  /// are removed. Errors if the habit does not exist.
  fn delete_habit(
    &self,
    id: HabitId,
    keep_logs: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Activities ────────────────────────────────────────────────────────

  /// Append one activity row for a habit. Errors if the habit does not
  /// exist.
  fn record_activity(
    &self,
    habit_id: HabitId,
    quantum: f64,
    update_date: NaiveDateTime,
  ) -> impl Future<Output = Result<Activity, Self::Error>> + Send + '_;

  /// All activities for a habit, newest first. With `since`, only rows
  /// strictly after that instant are returned.
  fn list_activities(
    &self,
    habit_id: HabitId,
    since: Option<NaiveDateTime>,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  // ── Summaries ─────────────────────────────────────────────────────────

  /// The summary row for a habit, or `None` if it was never created.
  fn get_summary(
    &self,
    habit_id: HabitId,
  ) -> impl Future<Output = Result<Option<Summary>, Self::Error>> + Send + '_;

  /// Persist a summary, keyed by its habit id.
  fn save_summary<'a>(
    &'a self,
    summary: &'a Summary,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
