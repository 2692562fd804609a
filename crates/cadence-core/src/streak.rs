//! The streak calculator.
//!
//! The goal is evaluated once per calendar day against the summed total of
//! that day's check-ins, so activities are grouped by date before the walk.
//! The walk itself never consults the wall clock: it seeds from the newest
//! activity day and extends backwards while days stay contiguous and the
//! goal stays met. Recomputation happens right after a check-in, when the
//! newest group is the check-in day itself.

use chrono::NaiveDate;

use crate::{
  activity::Activity,
  error::{Error, Result},
  habit::Habit,
  store::HabitStore,
  summary::Summary,
};

/// Collapse a newest-first activity list into per-day totals, newest first.
///
/// Relies on the same sort invariant as the aggregation engine: rows for
/// one calendar day are consecutive in a timestamp-sorted list.
pub fn day_totals(activities: &[Activity]) -> Vec<(NaiveDate, f64)> {
  let mut totals: Vec<(NaiveDate, f64)> = Vec::new();
  for a in activities {
    let date = a.update_date.date();
    match totals.last_mut() {
      Some((day, total)) if *day == date => *total += a.quantum,
      _ => totals.push((date, a.quantum)),
    }
  }
  totals
}

/// The current streak for a habit, from newest-first per-day totals.
///
/// Seeds at 1 with the newest group, then walks older groups until the day
/// gap exceeds one day or a group's total fails the habit's goal.
pub fn current_streak(habit: &Habit, totals: &[(NaiveDate, f64)]) -> u32 {
  let Some(&(newest, _)) = totals.first() else {
    return 0;
  };

  let mut streak = 1;
  let mut last_counted = newest;
  for &(date, total) in &totals[1..] {
    let gap = last_counted.signed_duration_since(date).num_days();
    if gap > 1 || !habit.goal_met(total) {
      break;
    }
    streak += 1;
    last_counted = date;
  }
  streak
}

/// Streak for pre-existing rows during migration backfill: the length of
/// the trailing run of activity days with no gap over one day. Only the
/// contiguity rule applies — legacy rows predate reliable goal semantics.
pub fn historical_streak(totals_oldest_first: &[(NaiveDate, f64)]) -> u32 {
  let mut streak = 0;
  let mut last: Option<NaiveDate> = None;
  for &(date, _) in totals_oldest_first {
    if let Some(prev) = last {
      if date.signed_duration_since(prev).num_days() > 1 {
        streak = 0;
      }
    }
    streak += 1;
    last = Some(date);
  }
  streak
}

/// Recompute and persist the streak for one habit from its full activity
/// history. Invoked after every check-in and on demand.
pub async fn update_streak<S>(store: &S, habit: &Habit) -> Result<Summary, S::Error>
where
  S: HabitStore + ?Sized,
  S::Error: From<Error>,
{
  let activities = store.list_activities(habit.id, None).await?;
  let totals = day_totals(&activities);

  let mut summary = store
    .get_summary(habit.id)
    .await?
    .ok_or(Error::SummaryNotFound(habit.id))?;
  summary.streak = current_streak(habit, &totals);
  store.save_summary(&summary).await?;

  Ok(summary)
}
