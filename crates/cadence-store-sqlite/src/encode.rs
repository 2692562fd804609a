//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Dates are `YYYY-MM-DD`; timestamps are `YYYY-MM-DD HH:MM:SS[.fff]`.
//! Both orders lexicographically the same as chronologically, which the
//! `update_date > ?` window filter and `ORDER BY update_date` rely on.

use cadence_core::{
  activity::{Activity, ActivityId},
  habit::{Habit, HabitId},
  summary::Summary,
};
use chrono::{NaiveDate, NaiveDateTime};

use crate::{Error, Result};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FMT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FMT).map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_datetime(dt: NaiveDateTime) -> String {
  dt.format(DATETIME_FMT).to_string()
}

pub fn decode_datetime(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, DATETIME_FMT)
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `habits` row.
pub struct RawHabit {
  pub id:           i64,
  pub name:         String,
  pub created_date: String,
  pub start_date:   String,
  pub frequency:    u32,
  pub quantum:      f64,
  pub units:        String,
  pub motivation:   String,
  pub minimize:     bool,
  pub active:       bool,
}

impl RawHabit {
  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      id:           HabitId(self.id),
      name:         self.name,
      created_date: decode_date(&self.created_date)?,
      start_date:   decode_date(&self.start_date)?,
      frequency:    self.frequency,
      quantum:      self.quantum,
      units:        self.units,
      motivation:   self.motivation,
      minimize:     self.minimize,
      active:       self.active,
    })
  }
}

/// Raw values read directly from an `activities` row.
pub struct RawActivity {
  pub id:          i64,
  pub for_habit:   i64,
  pub quantum:     f64,
  pub update_date: String,
}

impl RawActivity {
  pub fn into_activity(self) -> Result<Activity> {
    Ok(Activity {
      id:          ActivityId(self.id),
      habit_id:    HabitId(self.for_habit),
      quantum:     self.quantum,
      update_date: decode_datetime(&self.update_date)?,
    })
  }
}

/// Raw values read directly from a `summaries` row.
pub struct RawSummary {
  pub for_habit:   i64,
  pub target:      Option<f64>,
  pub target_date: Option<String>,
  pub streak:      u32,
}

impl RawSummary {
  pub fn into_summary(self) -> Result<Summary> {
    Ok(Summary {
      habit_id:    HabitId(self.for_habit),
      target:      self.target,
      target_date: self.target_date.as_deref().map(decode_date).transpose()?,
      streak:      self.streak,
    })
  }
}
