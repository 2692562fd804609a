//! The daily aggregation engine.
//!
//! Converts an irregular, possibly multiple-per-day activity log into a
//! fixed-length, day-indexed series: entry `d` covers calendar day
//! `today − d` and holds the sum of every activity recorded that day, or
//! `None` when nothing was recorded.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  activity::Activity,
  error::{Error, Result},
  habit::Habit,
  store::HabitStore,
  summary::Summary,
};

/// One day of a habit's series. `offset` counts back from today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
  pub offset:  i64,
  pub quantum: Option<f64>,
}

/// A habit bundled with its summary and per-day series — the read model the
/// listing report is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitReport {
  pub habit:   Habit,
  pub summary: Summary,
  pub series:  Vec<DayEntry>,
}

/// Build the per-day series for one habit.
///
/// `activities` must be sorted by `update_date` descending — the walk
/// depends on that invariant and performs no sort of its own. Entries for
/// the same calendar day are consecutive in such a list, so each day's sum
/// is accumulated in a single cursor advance.
pub fn daily_series(
  today: NaiveDate,
  activities: &[Activity],
  days: i64,
) -> Result<Vec<DayEntry>> {
  if days < 0 {
    return Err(Error::InvalidDayCount(days));
  }

  let mut series = Vec::with_capacity(days as usize);
  let mut cursor = activities.iter().peekable();

  for offset in 0..days {
    let for_date = today - Duration::days(offset);
    let mut quantum = None;

    while let Some(a) = cursor.peek() {
      if a.update_date.date() != for_date {
        break;
      }
      *quantum.get_or_insert(0.0) += a.quantum;
      cursor.next();
    }

    series.push(DayEntry { offset, quantum });
  }

  Ok(series)
}

/// Batched aggregation over every active habit: `days` entries per habit,
/// newest day first. Habits without a summary row are skipped.
pub async fn get_daily_activities<S>(
  store: &S,
  days: i64,
) -> Result<Vec<HabitReport>, S::Error>
where
  S: HabitStore + ?Sized,
  S::Error: From<Error>,
{
  if days < 0 {
    return Err(Error::InvalidDayCount(days).into());
  }

  let now = Local::now().naive_local();
  let today = now.date();
  let since = now - Duration::days(days);

  let mut reports = Vec::new();
  for habit in store.list_active_habits().await? {
    let Some(summary) = store.get_summary(habit.id).await? else {
      continue;
    };
    let activities = store.list_activities(habit.id, Some(since)).await?;
    let series = daily_series(today, &activities, days)?;
    reports.push(HabitReport { habit, summary, series });
  }

  Ok(reports)
}
