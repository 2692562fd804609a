//! SQL schema for the Cadence SQLite store, at the latest version.
//!
//! Executed in full only by the migration bootstrap on a fresh database;
//! existing databases reach this shape through the ordered steps in
//! [`crate::migrate`]. The version marker lives in the `config` table, not
//! here — the migrator writes it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    id           INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    created_date TEXT NOT NULL,       -- YYYY-MM-DD
    start_date   TEXT NOT NULL,
    frequency    INTEGER NOT NULL DEFAULT 1,
    quantum      REAL NOT NULL,
    units        TEXT NOT NULL,
    motivation   TEXT NOT NULL DEFAULT '',
    minimize     INTEGER NOT NULL DEFAULT 0,
    active       INTEGER NOT NULL DEFAULT 1
);

-- Activities are append-only: created by check-ins, never updated, removed
-- only when the owning habit is hard-deleted.
CREATE TABLE IF NOT EXISTS activities (
    id          INTEGER PRIMARY KEY,
    for_habit   INTEGER NOT NULL REFERENCES habits(id),
    quantum     REAL NOT NULL,
    update_date TEXT NOT NULL        -- local wall clock, sortable text
);

CREATE TABLE IF NOT EXISTS summaries (
    id          INTEGER PRIMARY KEY,
    for_habit   INTEGER NOT NULL UNIQUE REFERENCES habits(id),
    target      REAL,
    target_date TEXT,
    streak      INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS config (
    name  TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS activities_habit_idx ON activities(for_habit);
CREATE INDEX IF NOT EXISTS activities_date_idx  ON activities(update_date);
";
