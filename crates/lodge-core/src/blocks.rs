//! The `BlockStore` trait.
//!
//! A block store is a durable key → binary-blob map. The store crate keeps
//! its full database image under one key and periodic backups under
//! timestamped keys; the block store itself knows nothing about either.

use std::future::Future;

use crate::error::StorageError;

/// Durable, async key → bytes storage.
///
/// Implementations must survive process restarts. Failures of the medium are
/// returned as [`StorageError`] and never retried.
pub trait BlockStore: Send + Sync + 'static {
  /// Read the blob under `key`, or `None` if absent.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<Vec<u8>>, StorageError>> + Send + 'a;

  /// Write `bytes` under `key`, replacing any previous blob.
  fn put<'a>(
    &'a self,
    key: &'a str,
    bytes: Vec<u8>,
  ) -> impl Future<Output = Result<(), StorageError>> + Send + 'a;

  /// Remove `key`. Removing an absent key is not an error.
  fn delete<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), StorageError>> + Send + 'a;

  /// All keys starting with `prefix`, sorted ascending.
  fn list_keys<'a>(
    &'a self,
    prefix: &'a str,
  ) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send + 'a;
}
