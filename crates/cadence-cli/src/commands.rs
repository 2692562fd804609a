//! Subcommand implementations. Each one is thin glue: parse arguments,
//! call a core service over the store, print plain lines.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;

use cadence_core::{
  checkin::{checkin as record_checkin, find_habit},
  habit::{HabitId, NewHabit},
  report::get_daily_activities,
  store::HabitStore,
};
use cadence_store_sqlite::{MigrationStatus, SqliteStore};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M";

fn parse_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FMT)
    .with_context(|| format!("expected YYYY-MM-DD, got {s:?}"))
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, DATETIME_FMT)
    .with_context(|| format!("expected YYYY-MM-DD HH:MM, got {s:?}"))
}

// ─── add ─────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AddArgs {
  /// Habit name.
  name:       String,
  /// Daily goal amount (or ceiling, with --minimize).
  quantum:    f64,
  /// Unit the goal is measured in.
  #[arg(long, default_value = "units")]
  units:      String,
  /// Why this habit matters to you.
  #[arg(long, default_value = "")]
  motivation: String,
  /// Check-in interval in days.
  #[arg(long, default_value_t = 1)]
  frequency:  u32,
  /// Success means staying at or under the goal.
  #[arg(long)]
  minimize:   bool,
  /// Start counting from this date instead of today (YYYY-MM-DD).
  #[arg(long, value_parser = parse_date)]
  start_date: Option<NaiveDate>,
}

pub async fn add(store: &SqliteStore, args: AddArgs) -> Result<()> {
  let habit = store
    .add_habit(NewHabit {
      name:       args.name,
      quantum:    args.quantum,
      units:      args.units,
      motivation: args.motivation,
      frequency:  args.frequency,
      minimize:   args.minimize,
      start_date: args.start_date,
    })
    .await?;

  println!(
    "added habit #{}: {} ({} {}/day)",
    habit.id, habit.name, habit.quantum, habit.units
  );
  Ok(())
}

// ─── checkin ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct CheckinArgs {
  /// Habit name, or enough of it to match exactly one habit.
  name:    String,
  /// Amount to record.
  #[arg(short, long)]
  quantum: f64,
  /// Backdate the check-in (YYYY-MM-DD HH:MM; default: now).
  #[arg(long, value_parser = parse_datetime)]
  at:      Option<NaiveDateTime>,
}

pub async fn checkin(store: &SqliteStore, args: CheckinArgs) -> Result<()> {
  let habit = find_habit(store, &args.name).await?;
  let (activity, summary) =
    record_checkin(store, habit.id, args.quantum, args.at).await?;

  tracing::debug!(habit = %habit.id, quantum = activity.quantum, "recorded check-in");
  println!(
    "recorded {} {} for {} — streak: {}",
    activity.quantum,
    habit.units,
    habit.name,
    summary.streak_display()
  );
  Ok(())
}

// ─── edit ────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct EditArgs {
  /// Habit id (shown by `list`).
  id:      i64,
  /// New name.
  #[arg(long)]
  name:    Option<String>,
  /// New daily goal amount.
  #[arg(long)]
  quantum: Option<f64>,
}

pub async fn edit(store: &SqliteStore, args: EditArgs) -> Result<()> {
  let habit = store
    .edit_habit(HabitId(args.id), args.name, args.quantum)
    .await?;
  println!(
    "habit #{} is now: {} ({} {}/day)",
    habit.id, habit.name, habit.quantum, habit.units
  );
  Ok(())
}

// ─── delete ──────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct DeleteArgs {
  /// Habit id (shown by `list`).
  id:        i64,
  /// Deactivate instead of deleting, keeping past check-ins.
  #[arg(long)]
  keep_logs: bool,
}

pub async fn delete(store: &SqliteStore, args: DeleteArgs) -> Result<()> {
  store.delete_habit(HabitId(args.id), args.keep_logs).await?;
  if args.keep_logs {
    println!("deactivated habit #{} (logs kept)", args.id);
  } else {
    println!("deleted habit #{} and its logs", args.id);
  }
  Ok(())
}

// ─── list ────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ListArgs {
  /// How many days of history to show, today included.
  #[arg(long, default_value_t = 7)]
  days: i64,
  /// Emit the report as JSON instead of plain lines.
  #[arg(long)]
  json: bool,
}

pub async fn list(store: &SqliteStore, args: ListArgs) -> Result<()> {
  let reports = get_daily_activities(store, args.days).await?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&reports)?);
    return Ok(());
  }

  if reports.is_empty() {
    println!("no habits yet — try `cadence add`");
    return Ok(());
  }

  for report in reports {
    println!(
      "#{} {} — streak: {} (goal: {} {}/day)",
      report.habit.id,
      report.habit.name,
      report.summary.streak_display(),
      report.habit.quantum,
      report.habit.units,
    );
    // Oldest day first, today last.
    let days: Vec<String> = report
      .series
      .iter()
      .rev()
      .map(|entry| match entry.quantum {
        Some(q) => format!("{q}"),
        None => "·".to_owned(),
      })
      .collect();
    println!("    {}", days.join("  "));
  }
  Ok(())
}

// ─── migrate ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct MigrateArgs {
  /// Report pending migrations without applying them.
  #[arg(long)]
  list: bool,
}

pub async fn migrate(store: &SqliteStore, args: &MigrateArgs) -> Result<()> {
  let report = store.migrate(args.list).await?;

  if report.is_empty() {
    println!("schema is up to date");
    return Ok(());
  }
  for (version, status) in report {
    match status {
      MigrationStatus::Applied => println!("migrated to version {version}"),
      MigrationStatus::NotRun => println!("pending: version {version}"),
    }
  }
  Ok(())
}
