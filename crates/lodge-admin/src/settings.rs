//! Configuration for `lodge-admin`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use lodge_store::StoreConfig;
use serde::Deserialize;

/// Everything `lodge-admin` reads from `lodge.toml` and `LODGE_*` variables.
///
/// Nested store settings use a double underscore in the environment, e.g.
/// `LODGE_STORE__BACKUP_THRESHOLD=100`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
  /// Directory holding the database blocks and their backups.
  pub data_dir: PathBuf,
  pub store:    StoreConfig,
}

impl Default for AdminConfig {
  fn default() -> Self {
    Self { data_dir: PathBuf::from("~/.local/share/lodge"), store: StoreConfig::default() }
  }
}

impl AdminConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("LODGE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config file {path:?}"))?;

    settings.try_deserialize().context("failed to deserialise AdminConfig")
  }

  pub fn data_dir(&self) -> PathBuf { expand_tilde(&self.data_dir) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
