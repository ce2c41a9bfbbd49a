//! Store-level tests against an in-memory block store.

use std::{
  collections::BTreeSet,
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use chrono::{TimeZone as _, Utc};
use lodge_core::{
  BlockStore, StorageError,
  employee::{EmployeeStatus, NewEmployee},
  occupancy::{AssignmentPatch, Guest, NewAssignment, NewReservation},
  property::{BuildingStatus, NewBuilding, NewRoom, RoomPatch, RoomStatus},
  user::{NewUser, Role, UserPatch, UserStatus},
};
use rusqlite::types::Value;
use serde_json::Value as Json;

use crate::{
  AuthError, DirBlockStore, Engine, Error, LATEST_VERSION, MIGRATIONS, MemoryBlockStore, Store,
  StoreConfig, backup_time, migrate,
};

fn store_on(blocks: MemoryBlockStore, config: StoreConfig) -> Store<MemoryBlockStore> {
  Store::open(blocks, config)
}

async fn store() -> Store<MemoryBlockStore> {
  let s = store_on(MemoryBlockStore::new(), StoreConfig::default());
  s.initialize().await.expect("store initializes");
  s
}

async fn count(s: &Store<impl lodge_core::BlockStore>, table: &str) -> i64 {
  let rows = s.execute(&format!("SELECT COUNT(*) AS n FROM {table}"), vec![]).await.unwrap();
  rows[0]["n"].as_i64().unwrap()
}

async fn stored_password(s: &Store<MemoryBlockStore>, username: &str) -> String {
  let rows = s
    .execute("SELECT password FROM Users WHERE username = ?1", vec![Value::Text(
      username.to_owned(),
    )])
    .await
    .unwrap();
  rows[0]["password"].as_str().unwrap().to_owned()
}

fn spare_room() -> NewRoom {
  NewRoom {
    floor_id:          2,
    room_number:       "A-102".into(),
    capacity:          2,
    current_occupancy: 0,
    status:            RoomStatus::Available,
  }
}

/// Rejects the primary write that directly follows a backup write, so the
/// backup lands but recording its time does not.
#[derive(Clone, Default)]
struct PrimaryFailsAfterBackup {
  inner: MemoryBlockStore,
  armed: Arc<AtomicBool>,
}

impl BlockStore for PrimaryFailsAfterBackup {
  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
    self.inner.get(key).await
  }

  async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
    if key.starts_with("backup-") {
      self.armed.store(true, Ordering::SeqCst);
    } else if self.armed.swap(false, Ordering::SeqCst) {
      return Err(StorageError::QuotaExceeded { needed: bytes.len(), quota: 0 });
    }
    self.inner.put(key, bytes).await
  }

  async fn delete(&self, key: &str) -> Result<(), StorageError> { self.inner.delete(key).await }

  async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
    self.inner.list_keys(prefix).await
  }
}

const TABLES: [&str; 11] = [
  "SystemVariables",
  "Users",
  "Buildings",
  "Floors",
  "Rooms",
  "Employees",
  "Assignments",
  "MaintenanceRequests",
  "Reservations",
  "Hostings",
  "ActivityLog",
];

// ─── Initialization ──────────────────────────────────────────────────────────

#[tokio::test]
async fn cold_store_reaches_latest_with_seeded_admin() {
  let s = store().await;
  assert_eq!(s.schema_version().await.unwrap(), LATEST_VERSION);

  let users = s.users().get_all().await.unwrap();
  let admin = users.iter().find(|u| u.username == "admin").expect("seeded admin");
  assert!(admin.has_role(Role::Admin));
  assert_eq!(admin.status, UserStatus::Active);

  assert_eq!(s.variable("default_language").await.unwrap().as_deref(), Some("en"));
  assert_eq!(s.variable("no_such_variable").await.unwrap(), None);
}

#[tokio::test]
async fn concurrent_initialize_loads_once() {
  let s = store_on(MemoryBlockStore::new(), StoreConfig::default());
  assert_eq!(s.load_count(), 0);

  let (a, b) = tokio::join!(s.initialize(), s.initialize());
  a.unwrap();
  b.unwrap();
  assert_eq!(s.load_count(), 1);

  s.rooms().get_all().await.unwrap();
  s.initialize().await.unwrap();
  assert_eq!(s.load_count(), 1);
}

#[tokio::test]
async fn first_query_initializes_implicitly() {
  let s = store_on(MemoryBlockStore::new(), StoreConfig::default());
  assert_eq!(s.buildings().get_all().await.unwrap().len(), 2);
  assert_eq!(s.load_count(), 1);
}

#[tokio::test]
async fn reopen_keeps_counts_and_version() {
  let blocks = MemoryBlockStore::new();
  let first = store_on(blocks.clone(), StoreConfig::default());
  first.rooms().create(spare_room()).await.unwrap();
  first.activity().record("admin", "Added a room").await.unwrap();

  let mut before = Vec::new();
  for table in TABLES {
    before.push(count(&first, table).await);
  }

  let second = store_on(blocks, StoreConfig::default());
  let mut after = Vec::new();
  for table in TABLES {
    after.push(count(&second, table).await);
  }

  assert_eq!(before, after);
  assert_eq!(second.schema_version().await.unwrap(), LATEST_VERSION);
}

#[tokio::test]
async fn created_rows_survive_reopen() {
  let blocks = MemoryBlockStore::new();
  let first = store_on(blocks.clone(), StoreConfig::default());
  let created = first
    .employees()
    .create(NewEmployee {
      employee_id:       Some("EMP042".into()),
      first_name:        "Ines".into(),
      last_name:         "Moreau".into(),
      national_id:       Some("556677889".into()),
      job_title:         "Electrician".into(),
      phone:             "555-0142".into(),
      department:        "maintenance".into(),
      status:            EmployeeStatus::Active,
      contract_end_date: Some(Utc.with_ymd_and_hms(2027, 6, 30, 0, 0, 0).unwrap()),
    })
    .await
    .unwrap();

  let second = store_on(blocks, StoreConfig::default());
  let reloaded = second.employees().get_by_id(created.id).await.unwrap();
  assert_eq!(reloaded, Some(created));
}

#[tokio::test]
async fn corrupt_primary_block_fails_initialization() {
  let blocks = MemoryBlockStore::new();
  let config = StoreConfig::default();
  blocks.put(&config.primary_key, b"definitely not sqlite".to_vec()).await.unwrap();

  let s = store_on(blocks, config);
  let err = s.initialize().await.unwrap_err();
  let Error::Init(inner) = err else { panic!("expected Init") };
  assert!(matches!(*inner, Error::Storage(StorageError::Corrupt { .. })), "{inner:?}");
}

#[tokio::test]
async fn failed_migration_is_fatal_and_sticky() {
  let blocks = MemoryBlockStore::new();
  let config = StoreConfig::default();

  // A version-1 image that version 7 cannot migrate.
  let engine = Engine::open(None).await.unwrap();
  migrate::apply(&engine, MIGRATIONS[0]).await.unwrap();
  engine.execute("ALTER TABLE Reservations DROP COLUMN guestPhone", vec![]).await.unwrap();
  blocks.put(&config.primary_key, engine.export_snapshot().await.unwrap()).await.unwrap();

  let s = store_on(blocks.clone(), config.clone());
  for _ in 0..2 {
    let err = s.initialize().await.unwrap_err();
    let Error::Init(inner) = err else { panic!("expected Init") };
    assert!(matches!(*inner, Error::Migration { version: 7, .. }), "{inner:?}");
  }
  assert!(matches!(s.users().get_all().await, Err(Error::Init(_))));
  assert_eq!(s.load_count(), 1);

  // Steps before the failure were persisted.
  let stored = blocks.get(&config.primary_key).await.unwrap().unwrap();
  let stored = Engine::open(Some(stored)).await.unwrap();
  assert_eq!(migrate::current_version(&stored).await.unwrap(), 6);
}

#[tokio::test]
async fn reset_starts_over_from_seed() {
  let s = store().await;
  s.rooms().create(spare_room()).await.unwrap();
  s.set_variable("marker", "x").await.unwrap();
  assert_eq!(count(&s, "Rooms").await, 5);

  s.reset().await.unwrap();

  assert_eq!(count(&s, "Rooms").await, 4);
  assert_eq!(s.variable("marker").await.unwrap(), None);
  assert_eq!(s.schema_version().await.unwrap(), LATEST_VERSION);
  assert_eq!(s.load_count(), 2);
}

#[tokio::test]
async fn dir_store_persists_between_handles() {
  let root = std::env::temp_dir().join(format!("lodge-store-{}", uuid::Uuid::new_v4()));

  let first = Store::open(DirBlockStore::open(&root).await.unwrap(), StoreConfig::default());
  let building = first
    .buildings()
    .create(NewBuilding {
      name:     "C-Block".into(),
      location: "East Wing".into(),
      capacity: 80,
      status:   BuildingStatus::Active,
    })
    .await
    .unwrap();

  let second = Store::open(DirBlockStore::open(&root).await.unwrap(), StoreConfig::default());
  assert_eq!(second.buildings().get_by_id(building.id).await.unwrap(), Some(building));

  std::fs::remove_dir_all(&root).unwrap();
}

// ─── Repositories ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_a_fresh_id() {
  let s = store().await;
  let rooms = s.rooms();
  let existing: BTreeSet<_> = rooms.get_all().await.unwrap().into_iter().map(|r| r.id).collect();

  let room = rooms.create(spare_room()).await.unwrap();
  assert!(!existing.contains(&room.id));
  assert_eq!(room.room_number, "A-102");
  assert_eq!(room.vacancies(), 2);

  let all = rooms.get_all().await.unwrap();
  assert!(all.contains(&room));
}

#[tokio::test]
async fn update_writes_only_supplied_fields() {
  let s = store().await;
  let rooms = s.rooms();
  let before = rooms.get_by_id(2).await.unwrap().unwrap();

  let after = rooms
    .update(2, RoomPatch { status: Some(RoomStatus::Maintenance), ..Default::default() })
    .await
    .unwrap();

  assert_eq!(after.status, RoomStatus::Maintenance);
  assert_eq!(after.floor_id, before.floor_id);
  assert_eq!(after.room_number, before.room_number);
  assert_eq!(after.capacity, before.capacity);
  assert_eq!(after.current_occupancy, before.current_occupancy);
  assert_eq!(rooms.get_by_id(2).await.unwrap(), Some(after));
}

#[tokio::test]
async fn update_missing_row_is_not_found() {
  let s = store().await;
  let err = s
    .rooms()
    .update(999, RoomPatch { capacity: Some(3), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { table: "Rooms", id: 999 }), "{err:?}");

  let err = s.rooms().update(999, RoomPatch::default()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn empty_patch_returns_row_unchanged() {
  let s = store().await;
  let before = s.rooms().get_by_id(1).await.unwrap().unwrap();
  let after = s.rooms().update(1, RoomPatch::default()).await.unwrap();
  assert_eq!(before, after);
}

#[tokio::test]
async fn patch_can_clear_a_nullable_column() {
  let s = store().await;
  let assignments = s.assignments();
  let before = assignments.get_by_id(1).await.unwrap().unwrap();
  let out = Utc.with_ymd_and_hms(2024, 11, 30, 10, 0, 0).unwrap();

  let closed = assignments
    .update(1, AssignmentPatch { check_out_date: Some(Some(out)), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(closed.check_out_date, Some(out));

  let reopened = assignments
    .update(1, AssignmentPatch { check_out_date: Some(None), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(reopened.check_out_date, None);
  assert_eq!(reopened.expected_check_out_date, before.expected_check_out_date);

  let raw = s
    .execute("SELECT checkOutDate FROM Assignments WHERE id = 1", vec![])
    .await
    .unwrap();
  assert_eq!(raw[0]["checkOutDate"], Json::Null);
}

#[tokio::test]
async fn delete_does_not_cascade() {
  let s = store().await;
  s.rooms().delete(1).await.unwrap();
  s.rooms().delete(1).await.unwrap();

  assert_eq!(s.rooms().get_by_id(1).await.unwrap(), None);
  // The seeded assignment still points at room 1.
  let assignment = s.assignments().get_by_id(1).await.unwrap().unwrap();
  assert_eq!(assignment.room_id, 1);
}

#[tokio::test]
async fn reservation_guest_lists_round_trip() {
  let s = store().await;
  let guests = vec![
    Guest {
      first_name:           "Lena".into(),
      last_name:            "Park".into(),
      guest_id_card_number: "P-1".into(),
      guest_phone:          "555-0301".into(),
    },
    Guest { first_name: "Kai".into(), last_name: "Park".into(), ..Default::default() },
  ];
  let created = s
    .reservations()
    .create(NewReservation {
      room_id:              2,
      first_name:           "Lena".into(),
      last_name:            "Park".into(),
      check_in_date:        Utc.with_ymd_and_hms(2026, 11, 2, 14, 0, 0).unwrap(),
      check_out_date:       None,
      notes:                String::new(),
      guest_id_card_number: "P-1".into(),
      guest_phone:          "555-0301".into(),
      job_title:            "Auditor".into(),
      department:           "finance".into(),
      guests:               guests.clone(),
    })
    .await
    .unwrap();
  assert_eq!(created.guests, guests);

  let seeded = s.reservations().get_by_id(1).await.unwrap().unwrap();
  assert_eq!(seeded.first_name, "Guest");
  assert_eq!(seeded.guests.len(), 1);
}

#[tokio::test]
async fn capacity_is_not_enforced_by_the_store() {
  let s = store().await;
  s.rooms()
    .update(4, RoomPatch { current_occupancy: Some(1), ..Default::default() })
    .await
    .unwrap();

  let claim = |employee_id| NewAssignment {
    employee_id,
    room_id: 4,
    check_in_date: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
    expected_check_out_date: None,
    check_out_date: None,
  };
  let assignments = s.assignments();
  let (a, b) = tokio::join!(assignments.create(claim(2)), assignments.create(claim(3)));
  let (a, b) = (a.unwrap(), b.unwrap());

  assert_ne!(a.id, b.id);
  assert!(a.is_open() && b.is_open());
  let room = s.rooms().get_by_id(4).await.unwrap().unwrap();
  assert_eq!(room.current_occupancy, 1);
}

#[tokio::test]
async fn failed_durable_write_surfaces_as_storage_error() {
  let blocks = MemoryBlockStore::new();
  let config = StoreConfig { backup_threshold: 1, ..Default::default() };
  let s = store_on(blocks.clone(), config);
  s.initialize().await.unwrap();

  blocks.set_quota(Some(blocks.used_bytes().await - 1)).await;
  let err = s.rooms().create(spare_room()).await.unwrap_err();
  assert!(
    matches!(err, Error::Storage(StorageError::QuotaExceeded { .. })),
    "{err:?}"
  );

  // The failed write did not count towards the next backup: one more write
  // reaches the threshold, the second one passes it.
  blocks.set_quota(None).await;
  s.set_variable("counter", "1").await.unwrap();
  assert!(s.list_backups().await.unwrap().is_empty());
  s.set_variable("counter", "2").await.unwrap();
  assert_eq!(s.list_backups().await.unwrap().len(), 1);
}

// ─── Users & auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn new_users_get_hashed_credentials() {
  let s = store().await;
  let user = s
    .users()
    .create(NewUser {
      username: "night_porter".into(),
      password: "lantern".into(),
      roles:    vec![Role::Viewer, Role::Maintenance],
      status:   UserStatus::Active,
    })
    .await
    .unwrap();

  assert_eq!(user.roles, vec![Role::Viewer, Role::Maintenance]);
  let json = serde_json::to_value(&user).unwrap();
  assert!(json.get("password").is_none());
  assert!(stored_password(&s, "night_porter").await.starts_with("$argon2"));

  let session = s.auth().login("night_porter", "lantern").await.unwrap();
  assert_eq!(session.user, user);
}

#[tokio::test]
async fn empty_password_is_rejected() {
  let s = store().await;
  let err = s
    .users()
    .update(1, UserPatch { password: Some(String::new()), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Credential(_)), "{err:?}");
  assert_eq!(stored_password(&s, "admin").await, "admin");
}

#[tokio::test]
async fn login_succeeds_for_seeded_admin() {
  let s = store().await;
  let session = s.auth().login("admin", "admin").await.unwrap();

  assert_eq!(session.user.username, "admin");
  assert_eq!(session.token.len(), 64);
  let json = serde_json::to_value(&session).unwrap();
  assert!(json["user"].get("password").is_none());

  assert_eq!(s.variable("last_login_user").await.unwrap().as_deref(), Some("admin"));
  let log = s.activity().get_all().await.unwrap();
  let last = log.last().unwrap();
  assert_eq!((last.username.as_str(), last.action.as_str()), ("admin", "Logged in"));
}

#[tokio::test]
async fn wrong_password_is_logged_once() {
  let s = store().await;
  let before = s.activity().get_all().await.unwrap().len();

  let err = s.auth().login("admin", "wrongpass").await.unwrap_err();
  assert_eq!(err.auth(), Some(AuthError::InvalidCredentials));
  assert_eq!(err.to_string(), "Invalid username or password");

  let log = s.activity().get_all().await.unwrap();
  assert_eq!(log.len(), before + 1);
  assert_eq!(log[before].action, "Failed login attempt: invalid credentials");
  assert_eq!(s.variable("last_login_user").await.unwrap(), None);
}

#[tokio::test]
async fn unknown_user_looks_like_wrong_password() {
  let s = store().await;
  let err = s.auth().login("nobody", "admin").await.unwrap_err();
  assert_eq!(err.auth(), Some(AuthError::InvalidCredentials));
}

#[tokio::test]
async fn inactive_account_is_rejected_whatever_the_password() {
  let s = store().await;

  let err = s.auth().login("viewer", "password").await.unwrap_err();
  assert_eq!(err.auth(), Some(AuthError::AccountInactive));
  assert_eq!(err.to_string(), "Account is inactive");

  let err = s.auth().login("viewer", "guess").await.unwrap_err();
  assert_eq!(err.auth(), Some(AuthError::AccountInactive));

  let err = s.auth().login("nobody", "password").await.unwrap_err();
  assert_eq!(err.auth(), Some(AuthError::InvalidCredentials));

  let actions: Vec<_> =
    s.activity().get_all().await.unwrap().into_iter().map(|e| e.action).collect();
  assert_eq!(actions, vec![
    "Failed login attempt: account inactive".to_owned(),
    "Failed login attempt: account inactive".to_owned(),
    "Failed login attempt: invalid credentials".to_owned(),
  ]);
  assert_eq!(stored_password(&s, "viewer").await, "password");
}

#[tokio::test]
async fn legacy_credential_is_upgraded_on_login() {
  let s = store().await;
  assert_eq!(stored_password(&s, "manager").await, "password");

  s.auth().login("manager", "password").await.unwrap();
  assert!(stored_password(&s, "manager").await.starts_with("$argon2"));

  s.auth().login("manager", "password").await.unwrap();
  let err = s.auth().login("manager", "manager").await.unwrap_err();
  assert_eq!(err.auth(), Some(AuthError::InvalidCredentials));
}

// ─── Activity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn activity_entries_are_stamped_to_the_millisecond() {
  let s = store().await;
  let entry = s.activity().record("hr", "Checked in employee 3").await.unwrap();

  assert_eq!(entry.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);
  assert_eq!(s.activity().get_by_id(entry.id).await.unwrap(), Some(entry.clone()));

  let raw = s
    .execute("SELECT timestamp FROM ActivityLog WHERE id = ?1", vec![Value::Integer(entry.id)])
    .await
    .unwrap();
  let Json::String(stamp) = &raw[0]["timestamp"] else { panic!("timestamp is text") };
  assert!(stamp.ends_with('Z'), "{stamp}");
}

#[tokio::test]
async fn activity_outlives_the_user_it_names() {
  let s = store().await;
  let user = s
    .users()
    .create(NewUser {
      username: "temp".into(),
      password: "temp".into(),
      roles:    vec![Role::Viewer],
      status:   UserStatus::Active,
    })
    .await
    .unwrap();
  s.auth().login("temp", "temp").await.unwrap();
  s.users().delete(user.id).await.unwrap();

  let entries = s.activity().get_all().await.unwrap();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].username, "temp");
  assert_eq!(entries[0].action, "Logged in");
}

// ─── Backups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn backups_follow_threshold_and_retention() {
  let s = store().await;
  let mut seen = BTreeSet::new();

  for i in 1..=260 {
    s.set_variable("counter", &i.to_string()).await.unwrap();
    let keys = s.list_backups().await.unwrap();
    assert!(keys.len() <= 5, "after write {i}: {keys:?}");
    seen.extend(keys);

    if i == 50 {
      assert!(s.list_backups().await.unwrap().is_empty());
    }
    if i == 51 {
      assert_eq!(s.list_backups().await.unwrap().len(), 1);
      assert!(s.variable("last_backup_time").await.unwrap().is_some());
    }
  }

  assert_eq!(seen.len(), 5);
  assert_eq!(s.list_backups().await.unwrap().len(), 5);
}

#[tokio::test]
async fn rotation_keeps_the_newest_backups() {
  let config = StoreConfig { backup_threshold: 2, backup_retention: 3, ..Default::default() };
  let primary = config.primary_key.clone();
  let s = store_on(MemoryBlockStore::new(), config);
  s.initialize().await.unwrap();

  let mut seen = BTreeSet::new();
  for i in 0..30 {
    s.set_variable("counter", &i.to_string()).await.unwrap();
    seen.extend(s.list_backups().await.unwrap());
  }
  assert_eq!(seen.len(), 10);

  let mut newest: Vec<_> = seen.into_iter().collect();
  newest.sort_by_key(|k| std::cmp::Reverse(backup_time(&primary, k)));
  newest.truncate(3);
  assert_eq!(s.list_backups().await.unwrap(), newest);
}

#[tokio::test]
async fn reads_never_trigger_backups() {
  let config = StoreConfig { backup_threshold: 1, ..Default::default() };
  let s = store_on(MemoryBlockStore::new(), config);
  for _ in 0..20 {
    s.rooms().get_all().await.unwrap();
  }
  assert!(s.list_backups().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_backup_does_not_fail_the_write() {
  let blocks = MemoryBlockStore::new();
  let config = StoreConfig { backup_threshold: 1, ..Default::default() };
  let s = store_on(blocks.clone(), config);
  s.initialize().await.unwrap();

  let primary = blocks.used_bytes().await;
  blocks.set_quota(Some(primary + primary / 2)).await;

  for i in 0..4 {
    s.set_variable("counter", &i.to_string()).await.unwrap();
  }
  assert!(s.list_backups().await.unwrap().is_empty());
  assert_eq!(s.variable("counter").await.unwrap().as_deref(), Some("3"));
}

#[tokio::test]
async fn rotation_runs_even_when_recording_the_backup_fails() {
  let blocks = PrimaryFailsAfterBackup::default();
  let config = StoreConfig { backup_threshold: 1, backup_retention: 2, ..Default::default() };
  let s = Store::open(blocks.clone(), config);
  s.initialize().await.unwrap();

  for i in 0..12 {
    s.set_variable("counter", &i.to_string()).await.unwrap();
    let keys = s.list_backups().await.unwrap();
    assert!(keys.len() <= 2, "after write {i}: {keys:?}");
  }
  assert_eq!(s.list_backups().await.unwrap().len(), 2);
  assert_eq!(s.variable("counter").await.unwrap().as_deref(), Some("11"));
}

#[tokio::test]
async fn restore_brings_back_backed_up_state() {
  let config = StoreConfig { backup_threshold: 1, ..Default::default() };
  let s = store_on(MemoryBlockStore::new(), config);

  s.set_variable("marker", "before").await.unwrap();
  s.set_variable("marker", "before").await.unwrap();
  let keys = s.list_backups().await.unwrap();
  assert_eq!(keys.len(), 1);

  s.set_variable("marker", "after").await.unwrap();
  s.restore_backup(&keys[0]).await.unwrap();

  assert_eq!(s.variable("marker").await.unwrap().as_deref(), Some("before"));
  assert_eq!(s.load_count(), 2);
}

#[tokio::test]
async fn restoring_an_unknown_backup_fails() {
  let s = store().await;
  let err = s.restore_backup("lodge-housing.sqlite").await.unwrap_err();
  assert!(matches!(err, Error::MissingBackup(_)), "{err:?}");

  let absent = crate::backup_key("lodge-housing.sqlite", Utc::now());
  let err = s.restore_backup(&absent).await.unwrap_err();
  assert!(matches!(err, Error::MissingBackup(_)), "{err:?}");

  // The store is still usable.
  assert_eq!(count(&s, "Rooms").await, 4);
}
