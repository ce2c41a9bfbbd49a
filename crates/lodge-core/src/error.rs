//! Error types for `lodge-core`.

use thiserror::Error;

/// A failure of the durable medium behind a [`BlockStore`](crate::BlockStore).
///
/// These are surfaced to the caller unchanged; nothing retries them.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("block store i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("block store quota exceeded: {needed} bytes needed, quota is {quota}")]
  QuotaExceeded { needed: usize, quota: usize },

  #[error("block {key:?} is corrupt: {reason}")]
  Corrupt { key: String, reason: String },
}

pub type Result<T, E = StorageError> = std::result::Result<T, E>;
