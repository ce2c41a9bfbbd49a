//! lodge-admin: maintenance commands for a Lodge housing store.
//!
//! Reads `lodge.toml` (or the path given with `--config`), opens the store
//! kept under `data_dir`, and runs one command against it.
//!
//! ```text
//! lodge-admin status
//! echo admin | lodge-admin login admin
//! lodge-admin restore backup-lodge-housing.sqlite-2026-10-16T09:30:00.000000000Z
//! ```

mod settings;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lodge_core::{
  activity::ActivityLog,
  employee::Employee,
  maintenance::MaintenanceRequest,
  occupancy::{Assignment, Hosting, Reservation},
  property::{Building, Floor, Room},
  user::User,
};
use lodge_store::{DirBlockStore, Record, Store, backup_time};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::AdminConfig;

#[derive(Parser)]
#[command(author, version, about = "Lodge housing store administration")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lodge.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Show the schema version, row counts and retained backups.
  Status,
  /// Check a user's credentials. The password is read from stdin.
  Login { username: String },
  /// List retained backups, newest first.
  Backups,
  /// Replace the database with the backup stored under KEY.
  Restore { key: String },
  /// Delete the database and re-create it from seed data.
  Reset {
    /// Required; there is no undo beyond restoring a backup.
    #[arg(long)]
    yes: bool,
  },
  /// Print the argon2 hash for a password entered on stdin.
  HashPassword,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Status => status(&open_store(&cli.config).await?).await?,
    Command::Login { username } => {
      let store = open_store(&cli.config).await?;
      let password = read_password()?;
      match store.auth().login(&username, &password).await {
        Ok(session) => {
          println!("logged in as {} ({:?})", session.user.username, session.user.roles);
          println!("token: {}", session.token);
        }
        Err(e) => match e.auth() {
          Some(reason) => anyhow::bail!("{reason}"),
          None => return Err(e).context("login failed"),
        },
      }
    }
    Command::Backups => {
      for key in open_store(&cli.config).await?.list_backups().await? {
        println!("{key}");
      }
    }
    Command::Restore { key } => {
      open_store(&cli.config)
        .await?
        .restore_backup(&key)
        .await
        .with_context(|| format!("failed to restore {key}"))?;
      println!("restored {key}");
    }
    Command::Reset { yes } => {
      anyhow::ensure!(yes, "refusing to reset without --yes");
      open_store(&cli.config).await?.reset().await.context("reset failed")?;
      println!("store reset to seed data");
    }
    Command::HashPassword => {
      let password = read_password()?;
      println!("{}", lodge_store::hash_password(&password)?);
    }
  }

  Ok(())
}

async fn open_store(config: &Path) -> anyhow::Result<Store<DirBlockStore>> {
  let cfg = AdminConfig::load(config)?;
  let data_dir = cfg.data_dir();
  let blocks = DirBlockStore::open(&data_dir)
    .await
    .with_context(|| format!("failed to open data directory {data_dir:?}"))?;
  Ok(Store::open(blocks, cfg.store))
}

async fn status(store: &Store<DirBlockStore>) -> anyhow::Result<()> {
  store.initialize().await.context("failed to open store")?;
  println!("data dir:       {}", store.blocks().root().display());
  println!("schema version: {}", store.schema_version().await?);
  if let Some(at) = store.variable("last_backup_time").await? {
    println!("last backup:    {at}");
  }

  println!();
  for table in [
    User::TABLE,
    Building::TABLE,
    Floor::TABLE,
    Room::TABLE,
    Employee::TABLE,
    Assignment::TABLE,
    MaintenanceRequest::TABLE,
    Reservation::TABLE,
    Hosting::TABLE,
    ActivityLog::TABLE,
  ] {
    let rows = store.execute(&format!("SELECT COUNT(*) AS n FROM {table}"), vec![]).await?;
    let n = rows.first().and_then(|r| r.get("n")).and_then(|n| n.as_i64()).unwrap_or(0);
    println!("{table:<20} {n:>6}");
  }

  let primary = &store.config().primary_key;
  let backups = store.list_backups().await?;
  println!();
  println!("{} backup(s)", backups.len());
  for key in backups {
    if let Some(at) = backup_time(primary, &key) {
      println!("  {at}  {key}");
    }
  }
  Ok(())
}

/// Read one line from stdin, without its line ending.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  eprint!("Password: ");
  io::stderr().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
