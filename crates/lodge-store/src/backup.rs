//! Periodic snapshot backups with bounded retention.
//!
//! Backups live in the same block store as the primary image, under
//! `backup-<primary key>-<RFC 3339 timestamp>`.

use chrono::{DateTime, SecondsFormat, Utc};
use lodge_core::BlockStore;
use rusqlite::types::Value;
use tracing::{info, warn};

use crate::{Engine, Error, Result, StoreConfig, store::persist};

pub fn backup_prefix(primary_key: &str) -> String { format!("backup-{primary_key}-") }

pub fn backup_key(primary_key: &str, at: DateTime<Utc>) -> String {
  format!(
    "{}{}",
    backup_prefix(primary_key),
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
  )
}

/// The timestamp embedded in a backup key, if it is one of ours.
pub fn backup_time(primary_key: &str, key: &str) -> Option<DateTime<Utc>> {
  let stamp = key.strip_prefix(&backup_prefix(primary_key))?;
  DateTime::parse_from_rfc3339(stamp).ok().map(|t| t.with_timezone(&Utc))
}

/// Take a backup, note its time, then prune old ones.
///
/// Pruning runs whatever happened to the new backup, so the retained count
/// never grows past the limit. Failures are logged and swallowed.
pub(crate) async fn run<B: BlockStore>(blocks: &B, config: &StoreConfig, engine: &Engine) {
  let now = Utc::now();
  let key = backup_key(&config.primary_key, now);

  match snapshot(blocks, &key, engine).await {
    Ok(()) => {
      info!(%key, "backup created");
      if let Err(e) = mark(blocks, config, engine, now).await {
        warn!(error = %Error::Backup(Box::new(e)), "could not record backup time");
      }
    }
    Err(e) => warn!(error = %Error::Backup(Box::new(e)), "backup skipped"),
  }

  if let Err(e) = rotate(blocks, config).await {
    warn!(error = %Error::Backup(Box::new(e)), "could not prune old backups");
  }
}

async fn snapshot<B: BlockStore>(blocks: &B, key: &str, engine: &Engine) -> Result<()> {
  let image = engine.export_snapshot().await?;
  blocks.put(key, image).await?;
  Ok(())
}

async fn mark<B: BlockStore>(
  blocks: &B,
  config: &StoreConfig,
  engine: &Engine,
  at: DateTime<Utc>,
) -> Result<()> {
  engine
    .execute(
      "INSERT OR REPLACE INTO SystemVariables (key, value) VALUES ('last_backup_time', ?1)",
      vec![Value::Text(at.to_rfc3339_opts(SecondsFormat::Millis, true))],
    )
    .await?;
  persist(blocks, &config.primary_key, engine).await
}

async fn rotate<B: BlockStore>(blocks: &B, config: &StoreConfig) -> Result<()> {
  let retained = list(blocks, &config.primary_key).await?;
  for stale in retained.iter().skip(config.backup_retention) {
    info!(key = %stale, "deleting old backup");
    blocks.delete(stale).await?;
  }
  Ok(())
}

/// Backup keys for `primary_key`, newest first.
pub(crate) async fn list<B: BlockStore>(blocks: &B, primary_key: &str) -> Result<Vec<String>> {
  let mut dated: Vec<(DateTime<Utc>, String)> = blocks
    .list_keys(&backup_prefix(primary_key))
    .await?
    .into_iter()
    .filter_map(|key| backup_time(primary_key, &key).map(|t| (t, key)))
    .collect();
  dated.sort_by(|a, b| b.cmp(a));
  Ok(dated.into_iter().map(|(_, key)| key).collect())
}
