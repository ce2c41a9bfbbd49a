//! Buildings, floors, and rooms.

use serde::{Deserialize, Serialize};

use crate::RecordId;

// ─── Building ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingStatus {
  Active,
  Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
  pub id:       RecordId,
  pub name:     String,
  pub location: String,
  pub capacity: i64,
  pub status:   BuildingStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBuilding {
  pub name:     String,
  pub location: String,
  pub capacity: i64,
  pub status:   BuildingStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub capacity: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:   Option<BuildingStatus>,
}

// ─── Floor ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
  pub id:           RecordId,
  pub building_id:  RecordId,
  /// Free-form label, e.g. `"G"` or `"1"`.
  pub floor_number: String,
  pub description:  String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFloor {
  pub building_id:  RecordId,
  pub floor_number: String,
  pub description:  String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub building_id:  Option<RecordId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub floor_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:  Option<String>,
}

// ─── Room ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
  Available,
  Occupied,
  Maintenance,
  Reserved,
}

/// A room on a floor.
///
/// `current_occupancy <= capacity` is maintained by callers; the store does
/// not check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
  pub id:                RecordId,
  pub floor_id:          RecordId,
  pub room_number:       String,
  pub capacity:          i64,
  pub current_occupancy: i64,
  pub status:            RoomStatus,
}

impl Room {
  /// Free beds, never negative even if the occupancy counter overshot.
  pub fn vacancies(&self) -> i64 { (self.capacity - self.current_occupancy).max(0) }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
  pub floor_id:          RecordId,
  pub room_number:       String,
  pub capacity:          i64,
  pub current_occupancy: i64,
  pub status:            RoomStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub floor_id:          Option<RecordId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub room_number:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub capacity:          Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_occupancy: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:            Option<RoomStatus>,
}
