//! Error type for `lodge-store`.

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("storage error: {0}")]
  Storage(#[from] lodge_core::StorageError),

  #[error("database error: {0}")]
  Engine(#[from] tokio_rusqlite::Error),

  /// A migration step failed. Fatal: the store never becomes ready.
  #[error("migration to version {version} ({name}) failed: {source}")]
  Migration {
    version: u32,
    name:    &'static str,
    source:  Box<Error>,
  },

  #[error(transparent)]
  Auth(#[from] AuthError),

  /// Only ever logged; a failed backup never fails the write that caused it.
  #[error("backup failed: {0}")]
  Backup(#[source] Box<Error>),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("unknown column {column:?} for table {table}")]
  UnknownColumn { table: &'static str, column: String },

  #[error("{table} row {id} not found")]
  NotFound { table: &'static str, id: i64 },

  #[error("{table}: statement returned no row")]
  NoRowReturned { table: &'static str },

  #[error("stored schema version {0:?} is not a number")]
  BadVersion(String),

  #[error("credential error: {0}")]
  Credential(String),

  #[error("backup {0:?} not found")]
  MissingBackup(String),

  #[error("store is closed")]
  Closed,

  /// Initialization failed; every caller that awaited it receives the same
  /// underlying error.
  #[error("store initialization failed: {0}")]
  Init(Arc<Error>),
}

/// Rejections from [`AuthGateway::login`](crate::AuthGateway::login). The
/// messages are safe to show to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
  /// Unknown username or wrong password; the two are indistinguishable.
  #[error("Invalid username or password")]
  InvalidCredentials,

  #[error("Account is inactive")]
  AccountInactive,
}

impl Error {
  /// The authentication rejection inside this error, if any.
  pub fn auth(&self) -> Option<AuthError> {
    match self {
      Error::Auth(e) => Some(*e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
