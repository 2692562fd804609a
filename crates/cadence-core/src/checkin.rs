//! The check-in flow: resolve a habit, append an activity, recompute the
//! streak.

use chrono::{Local, NaiveDateTime};

use crate::{
  activity::Activity,
  error::{Error, Result},
  habit::{Habit, HabitId},
  store::HabitStore,
  streak::update_streak,
  summary::Summary,
};

/// Record progress for a habit and recompute its streak.
///
/// `update_date` defaults to now; a past timestamp backdates the check-in.
pub async fn checkin<S>(
  store: &S,
  habit_id: HabitId,
  quantum: f64,
  update_date: Option<NaiveDateTime>,
) -> Result<(Activity, Summary), S::Error>
where
  S: HabitStore + ?Sized,
  S::Error: From<Error>,
{
  let habit = store
    .get_habit(habit_id)
    .await?
    .ok_or(Error::HabitNotFound(habit_id))?;

  let when = update_date.unwrap_or_else(|| Local::now().naive_local());
  let activity = store.record_activity(habit.id, quantum, when).await?;
  let summary = update_streak(store, &habit).await?;

  Ok((activity, summary))
}

/// Resolve a habit by (partial) name among the active habits.
///
/// The match is a case-insensitive substring. Anything other than exactly
/// one hit is rejected — the caller decides whether to re-prompt or report.
pub async fn find_habit<S>(store: &S, query: &str) -> Result<Habit, S::Error>
where
  S: HabitStore + ?Sized,
  S::Error: From<Error>,
{
  let needle = query.trim().to_lowercase();
  let mut matches: Vec<Habit> = store
    .list_active_habits()
    .await?
    .into_iter()
    .filter(|h| h.name.to_lowercase().contains(&needle))
    .collect();

  if matches.len() == 1 {
    return Ok(matches.remove(0));
  }

  Err(
    Error::AmbiguousHabit {
      query:   query.to_owned(),
      matches: matches.into_iter().map(|h| h.name).collect(),
    }
    .into(),
  )
}
