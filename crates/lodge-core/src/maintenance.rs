//! Maintenance requests raised against rooms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
  Open,
  InProgress,
  Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
  pub id:           RecordId,
  pub room_id:      RecordId,
  pub problem_type: String,
  pub description:  String,
  pub status:       MaintenanceStatus,
  pub reported_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceRequest {
  pub room_id:      RecordId,
  pub problem_type: String,
  pub description:  String,
  pub status:       MaintenanceStatus,
  pub reported_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequestPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub room_id:      Option<RecordId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub problem_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:       Option<MaintenanceStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reported_at:  Option<DateTime<Utc>>,
}
