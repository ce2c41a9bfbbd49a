//! [`Store`]: the shared handle over one database image.

use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use lodge_core::{
  BlockStore, StorageError,
  employee::Employee,
  maintenance::MaintenanceRequest,
  occupancy::{Assignment, Hosting, Reservation},
  property::{Building, Floor, Room},
  user::User,
};
use rusqlite::types::Value;
use serde::Deserialize;
use serde_json::Value as Json;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::{
  ActivityRecorder, AuthGateway, Engine, Error, Repository, Result,
  backup,
  engine::{Row, is_mutating},
  migrate::{self, LATEST_VERSION},
  record::Record,
};

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
  /// Block key holding the current database image.
  pub primary_key:      String,
  /// A backup is taken once more than this many writes have happened since
  /// the last one.
  pub backup_threshold: u32,
  /// How many backups to keep.
  pub backup_retention: usize,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      primary_key:      "lodge-housing.sqlite".to_owned(),
      backup_threshold: 50,
      backup_retention: 5,
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The persistent store.
///
/// Cloning is cheap; every clone shares one engine. All statement execution
/// is serialised behind a single lock, and each mutating statement writes a
/// fresh snapshot to the block store before returning.
pub struct Store<B> {
  shared: Arc<Shared<B>>,
}

impl<B> Clone for Store<B> {
  fn clone(&self) -> Self { Self { shared: Arc::clone(&self.shared) } }
}

struct Shared<B> {
  blocks: B,
  config: StoreConfig,
  state:  Mutex<State>,
  ready:  Mutex<Arc<Ready>>,
  loads:  AtomicUsize,
}

type Ready = OnceCell<Result<(), Arc<Error>>>;

struct State {
  engine: Option<Engine>,
  writes: u32,
}

impl<B: BlockStore> Store<B> {
  /// Create a handle. Nothing is loaded until the first call that needs the
  /// database, or an explicit [`initialize`](Self::initialize).
  pub fn open(blocks: B, config: StoreConfig) -> Self {
    Self {
      shared: Arc::new(Shared {
        blocks,
        config,
        state: Mutex::new(State { engine: None, writes: 0 }),
        ready: Mutex::new(Arc::new(OnceCell::new())),
        loads: AtomicUsize::new(0),
      }),
    }
  }

  pub fn blocks(&self) -> &B { &self.shared.blocks }

  pub fn config(&self) -> &StoreConfig { &self.shared.config }

  /// Load the stored image and bring its schema up to date.
  ///
  /// Runs at most once per handle (until [`reset`](Self::reset)); concurrent
  /// callers all wait on the same load and see the same result, including a
  /// failure.
  pub async fn initialize(&self) -> Result<()> {
    let ready = Arc::clone(&*self.shared.ready.lock().await);
    ready
      .get_or_init(|| async { self.load().await.map_err(Arc::new) })
      .await
      .clone()
      .map_err(Error::Init)
  }

  /// How many load sequences have run on this handle.
  pub fn load_count(&self) -> usize { self.shared.loads.load(Ordering::SeqCst) }

  async fn load(&self) -> Result<()> {
    self.shared.loads.fetch_add(1, Ordering::SeqCst);
    let key = &self.shared.config.primary_key;
    let mut state = self.shared.state.lock().await;

    let engine = match self.shared.blocks.get(key).await? {
      Some(image) => {
        info!(%key, bytes = image.len(), "loading stored database");
        Engine::open(Some(image)).await.map_err(|e| StorageError::Corrupt {
          key:    key.clone(),
          reason: e.to_string(),
        })?
      }
      None => {
        info!(%key, "no stored database; starting empty");
        Engine::open(None).await?
      }
    };

    let version = migrate::current_version(&engine).await?;
    if version > LATEST_VERSION {
      warn!(version, latest = LATEST_VERSION, "stored schema is newer than this build");
    }
    for migration in migrate::pending(version) {
      info!(version = migration.version(), name = migration.name(), "applying migration");
      migrate::apply(&engine, migration).await?;
      persist(&self.shared.blocks, key, &engine).await?;
    }

    state.engine = Some(engine);
    state.writes = 0;
    info!(version = version.max(LATEST_VERSION), "store ready");
    Ok(())
  }

  /// Run one statement. Mutating statements are durable once this returns.
  pub async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
    self.initialize().await?;
    let mut state = self.shared.state.lock().await;
    let State { engine, writes } = &mut *state;
    let engine = engine.as_ref().ok_or(Error::Closed)?;

    let rows = engine.execute(sql, params).await?;

    if is_mutating(sql) {
      let config = &self.shared.config;
      persist(&self.shared.blocks, &config.primary_key, engine).await?;
      *writes += 1;
      if *writes > config.backup_threshold {
        *writes = 0;
        backup::run(&self.shared.blocks, config, engine).await;
      }
    }
    Ok(rows)
  }

  // ─── System variables ──────────────────────────────────────────────────────

  pub async fn variable(&self, key: &str) -> Result<Option<String>> {
    let rows = self
      .execute("SELECT value FROM SystemVariables WHERE key = ?1", vec![Value::Text(
        key.to_owned(),
      )])
      .await?;
    Ok(
      rows
        .into_iter()
        .next()
        .and_then(|mut row| row.remove("value"))
        .and_then(|v| match v {
          Json::String(s) => Some(s),
          Json::Null => None,
          other => Some(other.to_string()),
        }),
    )
  }

  pub async fn set_variable(&self, key: &str, value: &str) -> Result<()> {
    self
      .execute("INSERT OR REPLACE INTO SystemVariables (key, value) VALUES (?1, ?2)", vec![
        Value::Text(key.to_owned()),
        Value::Text(value.to_owned()),
      ])
      .await?;
    Ok(())
  }

  pub async fn schema_version(&self) -> Result<u32> {
    match self.variable("version").await? {
      None => Ok(0),
      Some(v) => v.trim().parse().map_err(|_| Error::BadVersion(v)),
    }
  }

  // ─── Maintenance ───────────────────────────────────────────────────────────

  /// Throw away the stored database and start again from an empty one.
  /// Backups are kept.
  pub async fn reset(&self) -> Result<()> {
    {
      let mut ready = self.shared.ready.lock().await;
      let mut state = self.shared.state.lock().await;
      if let Some(engine) = state.engine.take() {
        engine.close().await?;
      }
      state.writes = 0;
      self.shared.blocks.delete(&self.shared.config.primary_key).await?;
      *ready = Arc::new(OnceCell::new());
    }
    warn!(key = %self.shared.config.primary_key, "store reset");
    self.initialize().await
  }

  /// The current database image.
  pub async fn snapshot(&self) -> Result<Vec<u8>> {
    self.initialize().await?;
    let state = self.shared.state.lock().await;
    state.engine.as_ref().ok_or(Error::Closed)?.export_snapshot().await
  }

  /// Retained backup keys, newest first.
  pub async fn list_backups(&self) -> Result<Vec<String>> {
    backup::list(&self.shared.blocks, &self.shared.config.primary_key).await
  }

  /// Make the backup at `key` the primary image and reload from it.
  pub async fn restore_backup(&self, key: &str) -> Result<()> {
    let primary = &self.shared.config.primary_key;
    if backup::backup_time(primary, key).is_none() {
      return Err(Error::MissingBackup(key.to_owned()));
    }
    {
      let mut ready = self.shared.ready.lock().await;
      let mut state = self.shared.state.lock().await;
      let image = self
        .shared
        .blocks
        .get(key)
        .await?
        .ok_or_else(|| Error::MissingBackup(key.to_owned()))?;

      if let Some(engine) = state.engine.take() {
        engine.close().await?;
      }
      state.writes = 0;
      self.shared.blocks.put(primary, image).await?;
      *ready = Arc::new(OnceCell::new());
    }
    info!(key, "restored backup");
    self.initialize().await
  }

  // ─── Accessors ─────────────────────────────────────────────────────────────

  pub fn repository<R: Record>(&self) -> Repository<R, B> { Repository::new(self.clone()) }

  pub fn users(&self) -> Repository<User, B> { self.repository() }

  pub fn buildings(&self) -> Repository<Building, B> { self.repository() }

  pub fn floors(&self) -> Repository<Floor, B> { self.repository() }

  pub fn rooms(&self) -> Repository<Room, B> { self.repository() }

  pub fn employees(&self) -> Repository<Employee, B> { self.repository() }

  pub fn assignments(&self) -> Repository<Assignment, B> { self.repository() }

  pub fn maintenance_requests(&self) -> Repository<MaintenanceRequest, B> { self.repository() }

  pub fn reservations(&self) -> Repository<Reservation, B> { self.repository() }

  pub fn hostings(&self) -> Repository<Hosting, B> { self.repository() }

  pub fn activity(&self) -> ActivityRecorder<B> { ActivityRecorder::new(self.clone()) }

  pub fn auth(&self) -> AuthGateway<B> { AuthGateway::new(self.clone()) }
}

/// Write the engine's current image to the primary block.
pub(crate) async fn persist<B: BlockStore>(blocks: &B, key: &str, engine: &Engine) -> Result<()> {
  let image = engine.export_snapshot().await?;
  debug!(key, bytes = image.len(), "persisting snapshot");
  blocks.put(key, image).await?;
  Ok(())
}
