//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::{collections::BTreeMap, path::Path};

use chrono::{Local, NaiveDateTime};
use rusqlite::OptionalExtension as _;

use cadence_core::{
  activity::{Activity, ActivityId},
  habit::{Habit, HabitId, NewHabit},
  store::HabitStore,
  summary::Summary,
};

use crate::{
  encode::{encode_date, encode_datetime, RawActivity, RawHabit, RawSummary},
  migrate::{MigrationStatus, Migrator},
  Error, Result,
};

const HABIT_COLS: &str =
  "id, name, created_date, start_date, frequency, quantum, units, motivation, minimize, active";

fn read_habit(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawHabit> {
  Ok(RawHabit {
    id:           row.get(0)?,
    name:         row.get(1)?,
    created_date: row.get(2)?,
    start_date:   row.get(3)?,
    frequency:    row.get(4)?,
    quantum:      row.get(5)?,
    units:        row.get(6)?,
    motivation:   row.get(7)?,
    minimize:     row.get(8)?,
    active:       row.get(9)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Cadence habit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Opening
/// performs no DDL; run [`SqliteStore::migrate`] before any other operation.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path.as_ref().to_owned()).await?;
    Ok(Self { conn })
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Ok(Self { conn })
  }

  /// Apply (or, with `list_only`, report) pending schema migrations.
  /// See [`Migrator::execute`].
  pub async fn migrate(
    &self,
    list_only: bool,
  ) -> Result<BTreeMap<u32, MigrationStatus>> {
    Migrator::new(self).execute(list_only).await
  }

  async fn habit_exists(&self, id: HabitId) -> Result<bool> {
    let raw_id = id.0;
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM habits WHERE id = ?1",
              rusqlite::params![raw_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn add_habit(&self, input: NewHabit) -> Result<Habit> {
    let today = Local::now().date_naive();
    let start_date = input.start_date.unwrap_or(today);

    let name = input.name.clone();
    let units = input.units.clone();
    let motivation = input.motivation.clone();
    let created_str = encode_date(today);
    let start_str = encode_date(start_date);
    let frequency = input.frequency;
    let quantum = input.quantum;
    let minimize = input.minimize;

    // Habit and summary are created together so the one-summary-per-habit
    // invariant can never be observed broken.
    let id: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO habits
             (name, created_date, start_date, frequency, quantum, units, motivation, minimize, active)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)",
          rusqlite::params![
            name,
            created_str,
            start_str,
            frequency,
            quantum,
            units,
            motivation,
            minimize,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
          "INSERT INTO summaries (for_habit, target, target_date, streak)
           VALUES (?1, NULL, NULL, 0)",
          rusqlite::params![id],
        )?;
        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(Habit {
      id: HabitId(id),
      name: input.name,
      created_date: today,
      start_date,
      frequency: input.frequency,
      quantum: input.quantum,
      units: input.units,
      motivation: input.motivation,
      minimize: input.minimize,
      active: true,
    })
  }

  async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>> {
    let raw_id = id.0;

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {HABIT_COLS} FROM habits WHERE id = ?1"),
              rusqlite::params![raw_id],
              read_habit,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawHabit::into_habit).transpose()
  }

  async fn list_active_habits(&self) -> Result<Vec<Habit>> {
    let raws: Vec<RawHabit> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {HABIT_COLS} FROM habits WHERE active = 1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], read_habit)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  async fn edit_habit(
    &self,
    id: HabitId,
    name: Option<String>,
    quantum: Option<f64>,
  ) -> Result<Habit> {
    let raw_id = id.0;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE habits
           SET name = COALESCE(?2, name), quantum = COALESCE(?3, quantum)
           WHERE id = ?1",
          rusqlite::params![raw_id, name, quantum],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::HabitNotFound(id));
    }
    self.get_habit(id).await?.ok_or(Error::HabitNotFound(id))
  }

  async fn delete_habit(&self, id: HabitId, keep_logs: bool) -> Result<()> {
    let raw_id = id.0;

    let found = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists: bool = tx
          .query_row(
            "SELECT 1 FROM habits WHERE id = ?1",
            rusqlite::params![raw_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if exists {
          if keep_logs {
            tx.execute(
              "UPDATE habits SET active = 0 WHERE id = ?1",
              rusqlite::params![raw_id],
            )?;
          } else {
            tx.execute(
              "DELETE FROM activities WHERE for_habit = ?1",
              rusqlite::params![raw_id],
            )?;
            tx.execute(
              "DELETE FROM summaries WHERE for_habit = ?1",
              rusqlite::params![raw_id],
            )?;
            tx.execute("DELETE FROM habits WHERE id = ?1", rusqlite::params![raw_id])?;
          }
        }
        tx.commit()?;
        Ok(exists)
      })
      .await?;

    if !found {
      return Err(Error::HabitNotFound(id));
    }
    Ok(())
  }

  // ── Activities ────────────────────────────────────────────────────────────

  async fn record_activity(
    &self,
    habit_id: HabitId,
    quantum: f64,
    update_date: NaiveDateTime,
  ) -> Result<Activity> {
    if !self.habit_exists(habit_id).await? {
      return Err(Error::HabitNotFound(habit_id));
    }

    let raw_id = habit_id.0;
    let date_str = encode_datetime(update_date);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO activities (for_habit, quantum, update_date)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![raw_id, quantum, date_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Activity { id: ActivityId(id), habit_id, quantum, update_date })
  }

  async fn list_activities(
    &self,
    habit_id: HabitId,
    since: Option<NaiveDateTime>,
  ) -> Result<Vec<Activity>> {
    let raw_id = habit_id.0;
    let since_str = since.map(encode_datetime);

    let raws: Vec<RawActivity> = self
      .conn
      .call(move |conn| {
        let read = |row: &rusqlite::Row<'_>| -> rusqlite::Result<RawActivity> {
          Ok(RawActivity {
            id:          row.get(0)?,
            for_habit:   row.get(1)?,
            quantum:     row.get(2)?,
            update_date: row.get(3)?,
          })
        };

        let rows = if let Some(since) = since_str {
          let mut stmt = conn.prepare(
            "SELECT id, for_habit, quantum, update_date FROM activities
             WHERE for_habit = ?1 AND update_date > ?2
             ORDER BY update_date DESC",
          )?;
          stmt
            .query_map(rusqlite::params![raw_id, since], read)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT id, for_habit, quantum, update_date FROM activities
             WHERE for_habit = ?1
             ORDER BY update_date DESC",
          )?;
          stmt
            .query_map(rusqlite::params![raw_id], read)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawActivity::into_activity).collect()
  }

  // ── Summaries ─────────────────────────────────────────────────────────────

  async fn get_summary(&self, habit_id: HabitId) -> Result<Option<Summary>> {
    let raw_id = habit_id.0;

    let raw: Option<RawSummary> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT for_habit, target, target_date, streak
               FROM summaries WHERE for_habit = ?1",
              rusqlite::params![raw_id],
              |row| {
                Ok(RawSummary {
                  for_habit:   row.get(0)?,
                  target:      row.get(1)?,
                  target_date: row.get(2)?,
                  streak:      row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSummary::into_summary).transpose()
  }

  async fn save_summary(&self, summary: &Summary) -> Result<()> {
    let raw_id = summary.habit_id.0;
    let target = summary.target;
    let target_date = summary.target_date.map(encode_date);
    let streak = summary.streak;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO summaries (for_habit, target, target_date, streak)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(for_habit) DO UPDATE SET
             target = excluded.target,
             target_date = excluded.target_date,
             streak = excluded.streak",
          rusqlite::params![raw_id, target, target_date, streak],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
