//! [`ActivityRecorder`]: the append-only audit log.

use chrono::{SubsecRound as _, Utc};
use lodge_core::{
  BlockStore, RecordId,
  activity::{ActivityLog, NewActivity},
};

use crate::{Repository, Result, Store};

/// Appends to and reads the activity log. Entries are never updated or
/// deleted.
pub struct ActivityRecorder<B> {
  log: Repository<ActivityLog, B>,
}

impl<B: BlockStore> ActivityRecorder<B> {
  pub fn new(store: Store<B>) -> Self { Self { log: Repository::new(store) } }

  /// Append an entry stamped with the current time (millisecond precision).
  pub async fn record(&self, username: &str, action: &str) -> Result<ActivityLog> {
    self
      .log
      .create(NewActivity {
        username:  username.to_owned(),
        action:    action.to_owned(),
        timestamp: Utc::now().trunc_subsecs(3),
      })
      .await
  }

  pub async fn get_all(&self) -> Result<Vec<ActivityLog>> { self.log.get_all().await }

  pub async fn get_by_id(&self, id: RecordId) -> Result<Option<ActivityLog>> {
    self.log.get_by_id(id).await
  }
}
