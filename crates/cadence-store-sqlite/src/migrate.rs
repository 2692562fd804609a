//! The schema migration manager.
//!
//! Runs at startup, before any other store operation. The detected on-disk
//! version selects which of the ordered steps still need to run; each step
//! executes inside its own transaction and bumps the version marker in the
//! `config` table as it commits. A fresh database skips the steps entirely
//! and bootstraps straight to the latest schema.
//!
//! Every step is written to be re-runnable: renames and column additions are
//! guarded by catalog probes, and the streak backfill upserts. Resetting the
//! version marker backward and re-running converges to the same state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;

use crate::{schema::SCHEMA, store::SqliteStore, Error, Result};

/// The schema version a fresh database bootstraps to.
pub const LATEST_VERSION: u32 = 3;

// ─── Version probe ───────────────────────────────────────────────────────────

/// What the version probe found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
  /// No tables at all: a fresh database.
  Absent,
  /// Tables exist but no readable version marker: a pre-versioning install.
  LegacyUnversioned,
  /// A `config` table with a parseable `version` row.
  Versioned(u32),
}

impl SchemaVersion {
  /// The version number steps are selected against.
  pub fn ordinal(self) -> u32 {
    match self {
      Self::Absent => 0,
      Self::LegacyUnversioned => 1,
      Self::Versioned(n) => n,
    }
  }
}

fn table_exists(conn: &rusqlite::Connection, name: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        rusqlite::params![name],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn column_exists(
  conn: &rusqlite::Connection,
  table: &str,
  column: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2",
        rusqlite::params![table, column],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

/// Determine the on-disk schema version without mutating anything.
pub(crate) fn probe_version(
  conn: &rusqlite::Connection,
) -> rusqlite::Result<SchemaVersion> {
  let table_count: u32 = conn.query_row(
    "SELECT COUNT(*) FROM sqlite_master
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    [],
    |row| row.get(0),
  )?;
  if table_count == 0 {
    return Ok(SchemaVersion::Absent);
  }
  if !table_exists(conn, "config")? {
    return Ok(SchemaVersion::LegacyUnversioned);
  }

  let marker: Option<String> = conn
    .query_row(
      "SELECT value FROM config WHERE name = 'version'",
      [],
      |row| row.get(0),
    )
    .optional()?;

  match marker.and_then(|v| v.parse::<u32>().ok()) {
    Some(n) => Ok(SchemaVersion::Versioned(n)),
    None => Ok(SchemaVersion::LegacyUnversioned),
  }
}

fn set_version(conn: &rusqlite::Connection, version: u32) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO config (name, value) VALUES ('version', ?1)
     ON CONFLICT(name) DO UPDATE SET value = excluded.value",
    rusqlite::params![version.to_string()],
  )?;
  Ok(())
}

// ─── Steps ───────────────────────────────────────────────────────────────────

struct Step {
  version: u32,
  run:     fn(&rusqlite::Connection) -> rusqlite::Result<()>,
}

/// Ordered migration steps. Version 1 is the unversioned legacy schema, so
/// the table starts at 2.
const STEPS: &[Step] = &[
  Step { version: 2, run: to_version_2 },
  Step { version: 3, run: to_version_3 },
];

/// Legacy → versioned: canonical plural table names, the `config` and
/// `summaries` tables, the `minimize` and `start_date` columns, and a
/// summary backfill for rows that predate streak tracking.
fn to_version_2(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  for (old, new) in [
    ("habit", "habits"),
    ("activity", "activities"),
    ("summary", "summaries"),
  ] {
    if table_exists(conn, old)? && !table_exists(conn, new)? {
      conn.execute(&format!("ALTER TABLE {old} RENAME TO {new}"), [])?;
    }
  }

  conn.execute_batch(
    "CREATE TABLE IF NOT EXISTS summaries (
         id          INTEGER PRIMARY KEY,
         for_habit   INTEGER NOT NULL REFERENCES habits(id),
         target      REAL,
         target_date TEXT,
         streak      INTEGER NOT NULL DEFAULT 0
     );
     CREATE TABLE IF NOT EXISTS config (
         name  TEXT PRIMARY KEY,
         value TEXT NOT NULL
     );
     CREATE UNIQUE INDEX IF NOT EXISTS summaries_habit_idx ON summaries(for_habit);
     CREATE INDEX IF NOT EXISTS activities_habit_idx ON activities(for_habit);
     CREATE INDEX IF NOT EXISTS activities_date_idx  ON activities(update_date);",
  )?;

  if !column_exists(conn, "habits", "minimize")? {
    conn.execute(
      "ALTER TABLE habits ADD COLUMN minimize INTEGER NOT NULL DEFAULT 0",
      [],
    )?;
  }
  if !column_exists(conn, "habits", "start_date")? {
    conn.execute("ALTER TABLE habits ADD COLUMN start_date TEXT", [])?;
  }
  conn.execute(
    "UPDATE habits SET start_date = created_date WHERE start_date IS NULL",
    [],
  )?;

  backfill_summaries(conn)
}

/// Marks the switch to day-grouped streak evaluation. Stored rows are
/// already compatible, so only the version marker moves.
fn to_version_3(_conn: &rusqlite::Connection) -> rusqlite::Result<()> { Ok(()) }

/// One summary per habit, streak seeded from the trailing run of activity
/// days with no gap over one day.
fn backfill_summaries(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  let habit_ids: Vec<i64> = conn
    .prepare("SELECT id FROM habits")?
    .query_map([], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  for id in habit_ids {
    let days: Vec<(String, f64)> = conn
      .prepare(
        "SELECT substr(update_date, 1, 10) AS day, SUM(quantum)
         FROM activities WHERE for_habit = ?1
         GROUP BY day ORDER BY day ASC",
      )?
      .query_map(rusqlite::params![id], |row| {
        Ok((row.get(0)?, row.get(1)?))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut totals: Vec<(NaiveDate, f64)> = Vec::with_capacity(days.len());
    for (day, total) in days {
      let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
          0,
          rusqlite::types::Type::Text,
          Box::new(e),
        )
      })?;
      totals.push((date, total));
    }
    let streak = cadence_core::streak::historical_streak(&totals);

    conn.execute(
      "INSERT INTO summaries (for_habit, target, target_date, streak)
       VALUES (?1, NULL, NULL, ?2)
       ON CONFLICT(for_habit) DO UPDATE SET streak = excluded.streak",
      rusqlite::params![id, streak],
    )?;
  }
  Ok(())
}

// ─── Runner ──────────────────────────────────────────────────────────────────

/// Whether a pending step was applied or merely reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
  Applied,
  NotRun,
}

pub(crate) fn run_pending(
  conn: &mut rusqlite::Connection,
  list_only: bool,
) -> rusqlite::Result<BTreeMap<u32, MigrationStatus>> {
  let detected = probe_version(conn)?;
  let from = detected.ordinal();
  let mut report = BTreeMap::new();

  if from == 0 {
    // Fresh database: no legacy shape to step through.
    if list_only {
      report.insert(LATEST_VERSION, MigrationStatus::NotRun);
    } else {
      // The WAL pragma in the schema cannot run inside a transaction.
      conn.execute_batch(SCHEMA)?;
      set_version(conn, LATEST_VERSION)?;
      report.insert(LATEST_VERSION, MigrationStatus::Applied);
    }
    return Ok(report);
  }

  for step in STEPS {
    if step.version <= from || step.version > LATEST_VERSION {
      continue;
    }
    if list_only {
      report.insert(step.version, MigrationStatus::NotRun);
      continue;
    }
    let tx = conn.transaction()?;
    (step.run)(&tx)?;
    set_version(&tx, step.version)?;
    tx.commit()?;
    report.insert(step.version, MigrationStatus::Applied);
  }
  Ok(report)
}

/// Drives [`run_pending`] over a store's connection.
pub struct Migrator {
  conn: tokio_rusqlite::Connection,
}

impl Migrator {
  pub fn new(store: &SqliteStore) -> Self {
    Self { conn: store.conn.clone() }
  }

  /// Apply every pending step in order, or with `list_only` report which
  /// steps would run without touching the database. Any failure is fatal
  /// for the store.
  pub async fn execute(
    &self,
    list_only: bool,
  ) -> Result<BTreeMap<u32, MigrationStatus>> {
    self
      .conn
      .call(move |conn| {
        run_pending(conn, list_only).map_err(tokio_rusqlite::Error::Rusqlite)
      })
      .await
      .map_err(Error::Migration)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ordinals_order_the_probe_results() {
    assert_eq!(SchemaVersion::Absent.ordinal(), 0);
    assert_eq!(SchemaVersion::LegacyUnversioned.ordinal(), 1);
    assert_eq!(SchemaVersion::Versioned(3).ordinal(), 3);
    assert!(SchemaVersion::LegacyUnversioned.ordinal() < LATEST_VERSION);
  }

  #[test]
  fn steps_are_ordered_and_end_at_latest() {
    let versions: Vec<u32> = STEPS.iter().map(|s| s.version).collect();
    assert!(versions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(versions.last(), Some(&LATEST_VERSION));
  }
}
