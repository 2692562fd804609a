//! In-memory [`HabitStore`] fake for exercising the service functions
//! without a database.

use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};

use crate::{
  activity::{Activity, ActivityId},
  error::{Error, Result},
  habit::{Habit, HabitId, NewHabit},
  store::HabitStore,
  summary::Summary,
};

#[derive(Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
  habits:     Vec<Habit>,
  activities: Vec<Activity>,
  summaries:  Vec<Summary>,
  next_id:    i64,
}

impl Inner {
  fn next_id(&mut self) -> i64 {
    self.next_id += 1;
    self.next_id
  }
}

impl MemoryStore {
  /// Remove a habit's summary row to simulate a corrupted store.
  pub fn drop_summary(&self, habit_id: HabitId) {
    let mut inner = self.inner.lock().unwrap();
    inner.summaries.retain(|s| s.habit_id != habit_id);
  }
}

impl HabitStore for MemoryStore {
  type Error = Error;

  async fn add_habit(&self, input: NewHabit) -> Result<Habit> {
    let mut inner = self.inner.lock().unwrap();
    let today = Local::now().date_naive();
    let habit = Habit {
      id: HabitId(inner.next_id()),
      name: input.name,
      created_date: today,
      start_date: input.start_date.unwrap_or(today),
      frequency: input.frequency,
      quantum: input.quantum,
      units: input.units,
      motivation: input.motivation,
      minimize: input.minimize,
      active: true,
    };
    inner.habits.push(habit.clone());
    inner.summaries.push(Summary::new(habit.id));
    Ok(habit)
  }

  async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>> {
    let inner = self.inner.lock().unwrap();
    Ok(inner.habits.iter().find(|h| h.id == id).cloned())
  }

  async fn list_active_habits(&self) -> Result<Vec<Habit>> {
    let inner = self.inner.lock().unwrap();
    Ok(inner.habits.iter().filter(|h| h.active).cloned().collect())
  }

  async fn edit_habit(
    &self,
    id: HabitId,
    name: Option<String>,
    quantum: Option<f64>,
  ) -> Result<Habit> {
    let mut inner = self.inner.lock().unwrap();
    let habit = inner
      .habits
      .iter_mut()
      .find(|h| h.id == id)
      .ok_or(Error::HabitNotFound(id))?;
    if let Some(name) = name {
      habit.name = name;
    }
    if let Some(quantum) = quantum {
      habit.quantum = quantum;
    }
    Ok(habit.clone())
  }

  async fn delete_habit(&self, id: HabitId, keep_logs: bool) -> Result<()> {
    let mut inner = self.inner.lock().unwrap();
    if !inner.habits.iter().any(|h| h.id == id) {
      return Err(Error::HabitNotFound(id));
    }
    if keep_logs {
      if let Some(habit) = inner.habits.iter_mut().find(|h| h.id == id) {
        habit.active = false;
      }
    } else {
      inner.activities.retain(|a| a.habit_id != id);
      inner.summaries.retain(|s| s.habit_id != id);
      inner.habits.retain(|h| h.id != id);
    }
    Ok(())
  }

  async fn record_activity(
    &self,
    habit_id: HabitId,
    quantum: f64,
    update_date: NaiveDateTime,
  ) -> Result<Activity> {
    let mut inner = self.inner.lock().unwrap();
    if !inner.habits.iter().any(|h| h.id == habit_id) {
      return Err(Error::HabitNotFound(habit_id));
    }
    let activity = Activity {
      id: ActivityId(inner.next_id()),
      habit_id,
      quantum,
      update_date,
    };
    inner.activities.push(activity.clone());
    Ok(activity)
  }

  async fn list_activities(
    &self,
    habit_id: HabitId,
    since: Option<NaiveDateTime>,
  ) -> Result<Vec<Activity>> {
    let inner = self.inner.lock().unwrap();
    let mut rows: Vec<Activity> = inner
      .activities
      .iter()
      .filter(|a| a.habit_id == habit_id)
      .filter(|a| since.is_none_or(|s| a.update_date > s))
      .cloned()
      .collect();
    rows.sort_by(|a, b| b.update_date.cmp(&a.update_date));
    Ok(rows)
  }

  async fn get_summary(&self, habit_id: HabitId) -> Result<Option<Summary>> {
    let inner = self.inner.lock().unwrap();
    Ok(inner.summaries.iter().find(|s| s.habit_id == habit_id).cloned())
  }

  async fn save_summary(&self, summary: &Summary) -> Result<()> {
    let mut inner = self.inner.lock().unwrap();
    match inner.summaries.iter_mut().find(|s| s.habit_id == summary.habit_id) {
      Some(slot) => *slot = summary.clone(),
      None => inner.summaries.push(summary.clone()),
    }
    Ok(())
  }
}
