//! `cadence` — track habits from the command line.
//!
//! # Usage
//!
//! ```
//! cadence add "reading" 30 --units pages
//! cadence checkin read -q 25
//! cadence list --days 7
//! cadence migrate --list
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cadence_store_sqlite::SqliteStore;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cadence", about = "Track habits from the command line")]
struct Args {
  /// Path to the habit database (default: under the user data dir).
  #[arg(long, value_name = "FILE", env = "CADENCE_DB")]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Commit to a new habit.
  Add(commands::AddArgs),
  /// Record progress for a habit, by (partial) name.
  Checkin(commands::CheckinArgs),
  /// Change a habit's name or goal.
  Edit(commands::EditArgs),
  /// Remove a habit, keeping its logs unless told otherwise.
  Delete(commands::DeleteArgs),
  /// Show every active habit with its streak and recent days.
  List(commands::ListArgs),
  /// Apply (or list) pending schema migrations.
  Migrate(commands::MigrateArgs),
}

fn default_db_path() -> Result<PathBuf> {
  let dir = dirs::data_dir()
    .context("no user data directory")?
    .join("cadence");
  std::fs::create_dir_all(&dir)
    .with_context(|| format!("creating {}", dir.display()))?;
  Ok(dir.join("cadence.db"))
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let db_path = match args.db {
    Some(path) => path,
    None => default_db_path()?,
  };
  tracing::debug!(db = %db_path.display(), "opening store");

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("opening {}", db_path.display()))?;

  // `migrate` owns its list/apply choice; everything else migrates first.
  if let Command::Migrate(margs) = &args.command {
    return commands::migrate(&store, margs).await;
  }
  store.migrate(false).await.context("running migrations")?;

  match args.command {
    Command::Add(a) => commands::add(&store, a).await,
    Command::Checkin(a) => commands::checkin(&store, a).await,
    Command::Edit(a) => commands::edit(&store, a).await,
    Command::Delete(a) => commands::delete(&store, a).await,
    Command::List(a) => commands::list(&store, a).await,
    Command::Migrate(_) => unreachable!("handled above"),
  }
}
