//! The schema migrator.
//!
//! The stored schema version lives in `SystemVariables.version`. On open, the
//! store applies every registered [`Migration`] above that version in order.
//! Each step runs inside one transaction together with the version bump, and
//! the store persists a snapshot after each step, so an interrupted chain
//! resumes from the last completed version.

mod seed;
mod steps;

use rusqlite::{Connection, OptionalExtension as _};
use tracing::warn;

use crate::{Engine, Error, Result};

pub use steps::{
  EmployeeCodes, GuestLists, HostingGuestLists, InitialSchema, JobTitles, ReservationDepartment,
  SplitEmployeeNames, SplitReservationNames,
};

/// One versioned transformation of schema and/or data.
pub trait Migration: Send + Sync {
  /// The version the store is at once this migration has run.
  fn version(&self) -> u32;

  fn name(&self) -> &'static str;

  /// Alter structure, backfill rows, or seed tables. Must tolerate being run
  /// against a database where its structural change is already present.
  fn apply(&self, conn: &Connection) -> rusqlite::Result<()>;
}

/// Every migration, in version order. Version `n` is at index `n - 1`.
pub const MIGRATIONS: &[&dyn Migration] = &[
  &InitialSchema,
  &JobTitles,
  &ReservationDepartment,
  &SplitEmployeeNames,
  &EmployeeCodes,
  &SplitReservationNames,
  &GuestLists,
  &HostingGuestLists,
];

pub const LATEST_VERSION: u32 = MIGRATIONS.len() as u32;

/// Migrations still to run for a store at `version`, in order.
pub fn pending(version: u32) -> impl Iterator<Item = &'static dyn Migration> {
  MIGRATIONS.iter().copied().filter(move |m| m.version() > version)
}

/// Read the stored schema version; `0` for a database with no schema yet.
pub async fn current_version(engine: &Engine) -> Result<u32> {
  let raw: Option<String> = engine
    .call(|conn| {
      let has_variables = conn
        .query_row(
          "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'SystemVariables'",
          [],
          |_| Ok(()),
        )
        .optional()?
        .is_some();
      if !has_variables {
        return Ok(None);
      }
      Ok(
        conn
          .query_row("SELECT value FROM SystemVariables WHERE key = 'version'", [], |r| r.get(0))
          .optional()?,
      )
    })
    .await?;

  match raw {
    None => Ok(0),
    Some(v) => v.trim().parse().map_err(|_| Error::BadVersion(v)),
  }
}

/// Run one migration and record its version, atomically.
pub async fn apply(engine: &Engine, migration: &'static dyn Migration) -> Result<()> {
  let version = migration.version();
  engine
    .call(move |conn| {
      let tx = conn.transaction()?;
      migration.apply(&tx)?;
      tx.execute(
        "INSERT OR REPLACE INTO SystemVariables (key, value) VALUES ('version', ?1)",
        [version.to_string()],
      )?;
      tx.commit()?;
      Ok(())
    })
    .await
    .map_err(|source| Error::Migration { version, name: migration.name(), source: Box::new(source) })
}

// ─── Helpers for steps ───────────────────────────────────────────────────────

fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
  let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
  let names = stmt
    .query_map([], |r| r.get::<_, String>(1))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(names.iter().any(|n| n == column))
}

/// `ALTER TABLE … ADD COLUMN`, skipped if the column exists.
fn add_column(conn: &Connection, table: &str, column: &str, decl: &str) -> rusqlite::Result<()> {
  if has_column(conn, table, column)? {
    warn!(table, column, "column already exists; skipping");
    return Ok(());
  }
  conn.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} {decl}"))
}

/// `ALTER TABLE … RENAME COLUMN`, skipped if `from` is gone.
fn rename_column(conn: &Connection, table: &str, from: &str, to: &str) -> rusqlite::Result<()> {
  if !has_column(conn, table, from)? {
    warn!(table, from, to, "column already renamed; skipping");
    return Ok(());
  }
  conn.execute_batch(&format!("ALTER TABLE {table} RENAME COLUMN {from} TO {to}"))
}

/// Split `first` on its first space, moving the remainder into `last`.
fn split_name(conn: &Connection, table: &str, first: &str, last: &str) -> rusqlite::Result<()> {
  conn.execute_batch(&format!(
    "UPDATE {table}
        SET {last}  = SUBSTR({first}, INSTR({first}, ' ') + 1),
            {first} = SUBSTR({first}, 1, INSTR({first}, ' ') - 1)
      WHERE INSTR({first}, ' ') > 0"
  ))
}

fn json_error(e: serde_json::Error) -> rusqlite::Error {
  rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}
