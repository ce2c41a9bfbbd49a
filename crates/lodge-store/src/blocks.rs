//! [`BlockStore`] implementations: an in-memory map and a directory on disk.

use std::{
  collections::BTreeMap,
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::Arc,
};

use lodge_core::{BlockStore, StorageError};
use tokio::{io::AsyncWriteExt as _, sync::RwLock};

// ─── Memory ──────────────────────────────────────────────────────────────────

/// A block store held in memory, for tests and throwaway stores.
///
/// Cloning is cheap and clones share the same blocks, so two stores opened on
/// clones behave like two processes sharing one medium.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockStore {
  inner: Arc<RwLock<MemoryBlocks>>,
}

#[derive(Debug, Default)]
struct MemoryBlocks {
  blocks: BTreeMap<String, Vec<u8>>,
  quota:  Option<usize>,
}

impl MemoryBlockStore {
  pub fn new() -> Self { Self::default() }

  /// Cap the total size of all blocks. A `put` that would exceed it fails
  /// with [`StorageError::QuotaExceeded`].
  pub async fn set_quota(&self, quota: Option<usize>) {
    self.inner.write().await.quota = quota;
  }

  /// Total bytes currently stored.
  pub async fn used_bytes(&self) -> usize {
    self.inner.read().await.blocks.values().map(Vec::len).sum()
  }
}

impl BlockStore for MemoryBlockStore {
  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
    Ok(self.inner.read().await.blocks.get(key).cloned())
  }

  async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
    let mut inner = self.inner.write().await;
    if let Some(quota) = inner.quota {
      let used: usize = inner.blocks.values().map(Vec::len).sum();
      let replaced = inner.blocks.get(key).map_or(0, Vec::len);
      let needed = used - replaced + bytes.len();
      if needed > quota {
        return Err(StorageError::QuotaExceeded { needed, quota });
      }
    }
    inner.blocks.insert(key.to_owned(), bytes);
    Ok(())
  }

  async fn delete(&self, key: &str) -> Result<(), StorageError> {
    self.inner.write().await.blocks.remove(key);
    Ok(())
  }

  async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
    Ok(
      self
        .inner
        .read()
        .await
        .blocks
        .range(prefix.to_owned()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, _)| k.clone())
        .collect(),
    )
  }
}

// ─── Directory ───────────────────────────────────────────────────────────────

const BLOCK_EXT: &str = "block";

/// A block store keeping one file per key inside a directory.
///
/// File names are the hex-encoded key, so keys may contain characters (such
/// as the `:` in timestamps) that are not portable in file names. Writes go
/// to a temporary file that is synced and then renamed over the old block,
/// after which the directory itself is synced.
#[derive(Debug, Clone)]
pub struct DirBlockStore {
  root: PathBuf,
}

impl DirBlockStore {
  /// Open (or create) the directory at `root`.
  pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
    let root = root.into();
    tokio::fs::create_dir_all(&root).await?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path { &self.root }

  fn path_for(&self, key: &str) -> PathBuf {
    self.root.join(format!("{}.{BLOCK_EXT}", hex::encode(key)))
  }

  /// Flush the directory entry so a completed rename or removal survives a
  /// crash.
  #[cfg(unix)]
  async fn sync_dir(&self) -> Result<(), StorageError> {
    tokio::fs::File::open(&self.root).await?.sync_all().await?;
    Ok(())
  }

  #[cfg(not(unix))]
  async fn sync_dir(&self) -> Result<(), StorageError> { Ok(()) }
}

fn decode_file_name(name: &str) -> Option<String> {
  let stem = name.strip_suffix(BLOCK_EXT)?.strip_suffix('.')?;
  String::from_utf8(hex::decode(stem).ok()?).ok()
}

impl BlockStore for DirBlockStore {
  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
    match tokio::fs::read(self.path_for(key)).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
    let path = self.path_for(key);
    let tmp = path.with_extension("tmp");

    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(&bytes).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&tmp, &path).await?;
    self.sync_dir().await
  }

  async fn delete(&self, key: &str) -> Result<(), StorageError> {
    match tokio::fs::remove_file(self.path_for(key)).await {
      Ok(()) => self.sync_dir().await,
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }

  async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
    let mut entries = tokio::fs::read_dir(&self.root).await?;
    let mut keys = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
      let Some(key) = entry.file_name().to_str().and_then(decode_file_name) else {
        continue;
      };
      if key.starts_with(prefix) {
        keys.push(key);
      }
    }
    keys.sort();
    Ok(keys)
  }
}
