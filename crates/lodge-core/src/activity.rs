//! Audit log entries.
//!
//! The activity log is append-only: entries are never updated or deleted by
//! normal operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
  pub id:        RecordId,
  pub username:  String,
  pub action:    String,
  pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewActivity {
  pub username:  String,
  pub action:    String,
  pub timestamp: DateTime<Utc>,
}
