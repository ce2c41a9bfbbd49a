//! Static schema descriptors for every entity the store persists.
//!
//! Each [`Record`] names its table and lists its columns once, at compile
//! time. Repositories build all of their SQL from these descriptors, so no
//! column name ever comes from runtime input.

use lodge_core::{
  activity::{ActivityLog, NewActivity},
  employee::{Employee, EmployeePatch, NewEmployee},
  maintenance::{MaintenanceRequest, MaintenanceRequestPatch, NewMaintenanceRequest},
  occupancy::{
    Assignment, AssignmentPatch, Hosting, HostingPatch, NewAssignment, NewHosting, NewReservation,
    Reservation, ReservationPatch,
  },
  property::{Building, BuildingPatch, Floor, FloorPatch, NewBuilding, NewFloor, NewRoom, Room, RoomPatch},
  user::{NewUser, User, UserPatch},
};
use rusqlite::types::Value;
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, auth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
  Integer,
  Text,
  /// A JSON document stored as text.
  Json,
}

#[derive(Debug)]
pub struct Column {
  pub name: &'static str,
  pub kind: ColumnKind,
}

impl Column {
  pub const fn integer(name: &'static str) -> Self { Self { name, kind: ColumnKind::Integer } }

  pub const fn text(name: &'static str) -> Self { Self { name, kind: ColumnKind::Text } }

  pub const fn json(name: &'static str) -> Self { Self { name, kind: ColumnKind::Json } }
}

/// Column/value pairs ready to bind, in descriptor order.
pub type Fields = Vec<(&'static Column, Value)>;

/// A table-backed entity with an integer `id` primary key.
pub trait Record: DeserializeOwned + Send + 'static {
  const TABLE: &'static str;

  /// Columns read back into the entity, excluding `id`.
  const COLUMNS: &'static [Column];

  /// Columns that may be written but are never selected.
  const WRITE_ONLY: &'static [Column] = &[];

  /// Input for `create`.
  type Draft: Serialize + Send + Sync;

  /// Adjust bound values before an insert or update.
  fn prepare_write(_fields: &mut Fields) -> Result<()> { Ok(()) }
}

/// A table whose rows may be updated and deleted after insertion.
///
/// Append-only tables such as the activity log leave this unimplemented, so a
/// [`Repository`](crate::Repository) over them only offers reads and
/// `create`.
pub trait Mutable: Record {
  /// Input for `update`; fields that serialise as absent are left untouched.
  type Patch: Serialize + Send + Sync;
}

// ─── Descriptors ─────────────────────────────────────────────────────────────

impl Record for User {
  const TABLE: &'static str = "Users";
  const COLUMNS: &'static [Column] =
    &[Column::text("username"), Column::json("roles"), Column::text("status")];
  const WRITE_ONLY: &'static [Column] = &[Column::text("password")];

  type Draft = NewUser;

  /// Hash any supplied password; plaintext never reaches the table.
  fn prepare_write(fields: &mut Fields) -> Result<()> {
    for (column, value) in fields.iter_mut() {
      if column.name != "password" {
        continue;
      }
      let hashed = match value {
        Value::Text(plain) if !plain.is_empty() => auth::hash_password(plain)?,
        _ => return Err(Error::Credential("a non-empty password is required".into())),
      };
      *value = Value::Text(hashed);
    }
    Ok(())
  }
}

impl Mutable for User {
  type Patch = UserPatch;
}

impl Record for Building {
  const TABLE: &'static str = "Buildings";
  const COLUMNS: &'static [Column] = &[
    Column::text("name"),
    Column::text("location"),
    Column::integer("capacity"),
    Column::text("status"),
  ];

  type Draft = NewBuilding;
}

impl Mutable for Building {
  type Patch = BuildingPatch;
}

impl Record for Floor {
  const TABLE: &'static str = "Floors";
  const COLUMNS: &'static [Column] = &[
    Column::integer("buildingId"),
    Column::text("floorNumber"),
    Column::text("description"),
  ];

  type Draft = NewFloor;
}

impl Mutable for Floor {
  type Patch = FloorPatch;
}

impl Record for Room {
  const TABLE: &'static str = "Rooms";
  const COLUMNS: &'static [Column] = &[
    Column::integer("floorId"),
    Column::text("roomNumber"),
    Column::integer("capacity"),
    Column::integer("currentOccupancy"),
    Column::text("status"),
  ];

  type Draft = NewRoom;
}

impl Mutable for Room {
  type Patch = RoomPatch;
}

impl Record for Employee {
  const TABLE: &'static str = "Employees";
  const COLUMNS: &'static [Column] = &[
    Column::text("employeeId"),
    Column::text("firstName"),
    Column::text("lastName"),
    Column::text("nationalId"),
    Column::text("jobTitle"),
    Column::text("phone"),
    Column::text("department"),
    Column::text("status"),
    Column::text("contractEndDate"),
  ];

  type Draft = NewEmployee;
}

impl Mutable for Employee {
  type Patch = EmployeePatch;
}

impl Record for Assignment {
  const TABLE: &'static str = "Assignments";
  const COLUMNS: &'static [Column] = &[
    Column::integer("employeeId"),
    Column::integer("roomId"),
    Column::text("checkInDate"),
    Column::text("expectedCheckOutDate"),
    Column::text("checkOutDate"),
  ];

  type Draft = NewAssignment;
}

impl Mutable for Assignment {
  type Patch = AssignmentPatch;
}

impl Record for MaintenanceRequest {
  const TABLE: &'static str = "MaintenanceRequests";
  const COLUMNS: &'static [Column] = &[
    Column::integer("roomId"),
    Column::text("problemType"),
    Column::text("description"),
    Column::text("status"),
    Column::text("reportedAt"),
  ];

  type Draft = NewMaintenanceRequest;
}

impl Mutable for MaintenanceRequest {
  type Patch = MaintenanceRequestPatch;
}

impl Record for Reservation {
  const TABLE: &'static str = "Reservations";
  const COLUMNS: &'static [Column] = &[
    Column::integer("roomId"),
    Column::text("firstName"),
    Column::text("lastName"),
    Column::text("checkInDate"),
    Column::text("checkOutDate"),
    Column::text("notes"),
    Column::text("guestIdCardNumber"),
    Column::text("guestPhone"),
    Column::text("jobTitle"),
    Column::text("department"),
    Column::json("guests"),
  ];

  type Draft = NewReservation;
}

impl Mutable for Reservation {
  type Patch = ReservationPatch;
}

impl Record for Hosting {
  const TABLE: &'static str = "Hostings";
  const COLUMNS: &'static [Column] = &[
    Column::integer("employeeId"),
    Column::text("guestFirstName"),
    Column::text("guestLastName"),
    Column::text("guestIdCardNumber"),
    Column::text("startDate"),
    Column::text("endDate"),
    Column::text("notes"),
    Column::text("status"),
    Column::json("guests"),
  ];

  type Draft = NewHosting;
}

impl Mutable for Hosting {
  type Patch = HostingPatch;
}

impl Record for ActivityLog {
  const TABLE: &'static str = "ActivityLog";
  const COLUMNS: &'static [Column] = &[
    Column::text("username"),
    Column::text("action"),
    Column::text("timestamp"),
  ];

  type Draft = NewActivity;
}
