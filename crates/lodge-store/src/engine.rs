//! [`Engine`]: an in-memory SQLite database that round-trips through
//! snapshots.
//!
//! The database lives entirely in memory on a dedicated thread (via
//! [`tokio_rusqlite`]). Its durable form is a snapshot: the SQLite file image,
//! produced and consumed through SQLite's online-backup API.

use std::path::{Path, PathBuf};

use rusqlite::{
  DatabaseName,
  backup::Progress,
  types::{Value, ValueRef},
};
use serde_json::{Map, Value as Json};

use crate::Result;

/// One result row: column name → value.
pub type Row = Map<String, Json>;

const MUTATING_PREFIXES: [&str; 6] = ["INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER"];

/// Whether `sql` changes the database, judged by its leading keyword.
///
/// Mutating statements must be followed by a snapshot write; everything else
/// (`SELECT`, `PRAGMA` reads) never is.
pub fn is_mutating(sql: &str) -> bool {
  let head = sql.trim_start();
  MUTATING_PREFIXES
    .iter()
    .any(|p| head.get(..p.len()).is_some_and(|h| h.eq_ignore_ascii_case(p)))
}

pub struct Engine {
  conn: tokio_rusqlite::Connection,
}

impl Engine {
  /// Create an engine, restoring `snapshot` if given, otherwise empty.
  pub async fn open(snapshot: Option<Vec<u8>>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;

    if let Some(image) = snapshot {
      conn
        .call(move |conn| {
          let scratch = ScratchFile::new();
          std::fs::write(scratch.path(), &image).map_err(other)?;
          conn.restore(DatabaseName::Main, scratch.path(), None::<fn(Progress)>)?;
          Ok(())
        })
        .await?;
    }

    Ok(Self { conn })
  }

  /// Run one statement with positional parameters and collect its rows.
  ///
  /// Statements that produce no rows return an empty `Vec`.
  pub async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
    let sql = sql.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt
          .column_names()
          .into_iter()
          .map(str::to_owned)
          .collect();

        let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
          let mut map = Row::new();
          for (i, name) in names.iter().enumerate() {
            map.insert(name.clone(), to_json(row.get_ref(i)?));
          }
          out.push(map);
        }
        Ok(out)
      })
      .await?;

    Ok(rows)
  }

  /// Serialise the whole database to its file image.
  pub async fn export_snapshot(&self) -> Result<Vec<u8>> {
    let image = self
      .conn
      .call(|conn| {
        let scratch = ScratchFile::new();
        conn.backup(DatabaseName::Main, scratch.path(), None)?;
        std::fs::read(scratch.path()).map_err(other)
      })
      .await?;
    Ok(image)
  }

  /// Run `f` against the raw connection on the engine thread.
  ///
  /// Used by the migrator, which needs transactions and multi-statement
  /// scripts.
  pub async fn call<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R> + Send + 'static,
    R: Send + 'static,
  {
    Ok(self.conn.call(f).await?)
  }

  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }
}

fn to_json(value: ValueRef<'_>) -> Json {
  match value {
    ValueRef::Null => Json::Null,
    ValueRef::Integer(i) => Json::from(i),
    ValueRef::Real(f) => serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number),
    ValueRef::Text(t) => Json::String(String::from_utf8_lossy(t).into_owned()),
    ValueRef::Blob(b) => Json::String(hex::encode(b)),
  }
}

fn other(e: std::io::Error) -> tokio_rusqlite::Error { tokio_rusqlite::Error::Other(Box::new(e)) }

/// A uniquely-named file in the temp dir, removed on drop.
struct ScratchFile(PathBuf);

impl ScratchFile {
  fn new() -> Self {
    Self(std::env::temp_dir().join(format!("lodge-snapshot-{}.sqlite", uuid::Uuid::new_v4())))
  }

  fn path(&self) -> &Path { &self.0 }
}

impl Drop for ScratchFile {
  fn drop(&mut self) { let _ = std::fs::remove_file(&self.0); }
}
