//! Who is staying where: assignments, reservations, and hostings.
//!
//! Reservations and hostings carry their guest list as an ordered
//! [`Vec<Guest>`]. The store keeps that list as a JSON text column on the
//! owning row rather than in a child table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RecordId;

// ─── Guest ───────────────────────────────────────────────────────────────────

/// One guest in a reservation or hosting. The first guest is the primary one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Guest {
  pub first_name:           String,
  pub last_name:            String,
  pub guest_id_card_number: String,
  pub guest_phone:          String,
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// An employee housed in a room. Open while `check_out_date` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
  pub id:                      RecordId,
  pub employee_id:             RecordId,
  pub room_id:                 RecordId,
  pub check_in_date:           DateTime<Utc>,
  pub expected_check_out_date: Option<DateTime<Utc>>,
  pub check_out_date:          Option<DateTime<Utc>>,
}

impl Assignment {
  pub fn is_open(&self) -> bool { self.check_out_date.is_none() }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
  pub employee_id:             RecordId,
  pub room_id:                 RecordId,
  pub check_in_date:           DateTime<Utc>,
  pub expected_check_out_date: Option<DateTime<Utc>>,
  pub check_out_date:          Option<DateTime<Utc>>,
}

/// Partial update of an assignment; `None` fields are left untouched and `Some(None)`
/// clears a nullable column.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub employee_id:             Option<RecordId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub room_id:                 Option<RecordId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub check_in_date:           Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expected_check_out_date: Option<Option<DateTime<Utc>>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub check_out_date:          Option<Option<DateTime<Utc>>>,
}

// ─── Reservation ─────────────────────────────────────────────────────────────

/// A room held for outside guests.
///
/// The flat `first_name` … `guest_phone` fields mirror the primary guest and
/// predate the `guests` list; both are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
  pub id:                   RecordId,
  pub room_id:              RecordId,
  pub first_name:           String,
  pub last_name:            String,
  pub check_in_date:        DateTime<Utc>,
  pub check_out_date:       Option<DateTime<Utc>>,
  pub notes:                String,
  pub guest_id_card_number: String,
  pub guest_phone:          String,
  pub job_title:            String,
  pub department:           String,
  pub guests:               Vec<Guest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
  pub room_id:              RecordId,
  pub first_name:           String,
  pub last_name:            String,
  pub check_in_date:        DateTime<Utc>,
  pub check_out_date:       Option<DateTime<Utc>>,
  pub notes:                String,
  pub guest_id_card_number: String,
  pub guest_phone:          String,
  pub job_title:            String,
  pub department:           String,
  pub guests:               Vec<Guest>,
}

/// Partial update of a reservation; `None` fields are left untouched and `Some(None)`
/// clears a nullable column.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub room_id:              Option<RecordId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub check_in_date:        Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub check_out_date:       Option<Option<DateTime<Utc>>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:                Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guest_id_card_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guest_phone:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub job_title:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guests:               Option<Vec<Guest>>,
}

// ─── Hosting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostingStatus {
  Active,
  Completed,
  Cancelled,
}

/// Outside guests staying with a host employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hosting {
  pub id:                   RecordId,
  pub employee_id:          RecordId,
  pub guest_first_name:     String,
  pub guest_last_name:      String,
  pub guest_id_card_number: Option<String>,
  pub start_date:           DateTime<Utc>,
  pub end_date:             DateTime<Utc>,
  pub notes:                Option<String>,
  pub status:               HostingStatus,
  pub guests:               Vec<Guest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHosting {
  pub employee_id:          RecordId,
  pub guest_first_name:     String,
  pub guest_last_name:      String,
  pub guest_id_card_number: Option<String>,
  pub start_date:           DateTime<Utc>,
  pub end_date:             DateTime<Utc>,
  pub notes:                Option<String>,
  pub status:               HostingStatus,
  pub guests:               Vec<Guest>,
}

/// Partial update of a hosting; `None` fields are left untouched and `Some(None)`
/// clears a nullable column.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub employee_id:          Option<RecordId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guest_first_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guest_last_name:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guest_id_card_number: Option<Option<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_date:           Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_date:             Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:                Option<Option<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:               Option<HostingStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guests:               Option<Vec<Guest>>,
}
