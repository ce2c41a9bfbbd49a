//! The registered migrations, one type per version.

use lodge_core::occupancy::Guest;
use rusqlite::{Connection, params};
use tracing::info;

use super::{Migration, add_column, json_error, rename_column, seed, split_name};

// ─── v1 ──────────────────────────────────────────────────────────────────────

/// Create every table and load the seed data.
pub struct InitialSchema;

impl Migration for InitialSchema {
  fn version(&self) -> u32 { 1 }

  fn name(&self) -> &'static str { "initial_schema" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(seed::SCHEMA)?;
    conn.execute_batch(seed::SEED)
  }
}

// ─── v2 ──────────────────────────────────────────────────────────────────────

/// Employees gain a job title; the reservation guest's position becomes one.
pub struct JobTitles;

impl Migration for JobTitles {
  fn version(&self) -> u32 { 2 }

  fn name(&self) -> &'static str { "job_titles" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    add_column(conn, "Employees", "jobTitle", "TEXT DEFAULT ''")?;
    rename_column(conn, "Reservations", "guestPosition", "jobTitle")?;
    conn.execute_batch(
      "UPDATE Employees SET jobTitle = 'IT Specialist'  WHERE id = 1;
       UPDATE Employees SET jobTitle = 'HR Coordinator' WHERE id = 2;
       UPDATE Employees SET jobTitle = 'Housekeeper'    WHERE id = 3;",
    )
  }
}

// ─── v3 ──────────────────────────────────────────────────────────────────────

/// Reservations gain a department. The v1 schema already has the column, so
/// on fresh installs the ALTER is skipped.
pub struct ReservationDepartment;

impl Migration for ReservationDepartment {
  fn version(&self) -> u32 { 3 }

  fn name(&self) -> &'static str { "reservation_department" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    add_column(conn, "Reservations", "department", "TEXT DEFAULT ''")?;
    conn.execute_batch(
      "UPDATE Reservations SET department = 'marketing', jobTitle = 'Consultant' WHERE id = 1;",
    )
  }
}

// ─── v4 ──────────────────────────────────────────────────────────────────────

pub struct SplitEmployeeNames;

impl Migration for SplitEmployeeNames {
  fn version(&self) -> u32 { 4 }

  fn name(&self) -> &'static str { "split_employee_names" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    rename_column(conn, "Employees", "fullName", "firstName")?;
    add_column(conn, "Employees", "lastName", "TEXT DEFAULT ''")?;
    split_name(conn, "Employees", "firstName", "lastName")
  }
}

// ─── v5 ──────────────────────────────────────────────────────────────────────

/// Employees gain a staff code; the seeded staff get theirs.
pub struct EmployeeCodes;

impl Migration for EmployeeCodes {
  fn version(&self) -> u32 { 5 }

  fn name(&self) -> &'static str { "employee_codes" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    add_column(conn, "Employees", "employeeId", "TEXT")?;
    conn.execute_batch(
      "UPDATE Employees SET employeeId = 'EMP001' WHERE nationalId = '123456789';
       UPDATE Employees SET employeeId = 'EMP002' WHERE nationalId = '987654321';
       UPDATE Employees SET employeeId = 'EMP003' WHERE nationalId = '112233445';",
    )
  }
}

// ─── v6 ──────────────────────────────────────────────────────────────────────

pub struct SplitReservationNames;

impl Migration for SplitReservationNames {
  fn version(&self) -> u32 { 6 }

  fn name(&self) -> &'static str { "split_reservation_names" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    rename_column(conn, "Reservations", "guestName", "firstName")?;
    add_column(conn, "Reservations", "lastName", "TEXT DEFAULT ''")?;
    split_name(conn, "Reservations", "firstName", "lastName")
  }
}

// ─── v7 ──────────────────────────────────────────────────────────────────────

/// Add the Hostings table and move reservations to a guest list, seeding each
/// list with the reservation's existing primary guest.
pub struct GuestLists;

impl Migration for GuestLists {
  fn version(&self) -> u32 { 7 }

  fn name(&self) -> &'static str { "guest_lists" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
      "CREATE TABLE IF NOT EXISTS Hostings (
           id                INTEGER PRIMARY KEY AUTOINCREMENT,
           employeeId        INTEGER,
           guestFirstName    TEXT,
           guestLastName     TEXT,
           guestIdCardNumber TEXT,
           startDate         TEXT,
           endDate           TEXT,
           notes             TEXT,
           status            TEXT,   -- 'active' | 'completed' | 'cancelled'
           FOREIGN KEY(employeeId) REFERENCES Employees(id)
       );",
    )?;
    add_column(conn, "Reservations", "guests", "TEXT DEFAULT '[]'")?;

    let pending = {
      let mut stmt = conn.prepare(
        "SELECT id, firstName, lastName, guestIdCardNumber, guestPhone
           FROM Reservations WHERE guests = '[]'",
      )?;
      let rows = stmt
        .query_map([], |r| {
          Ok((r.get::<_, i64>(0)?, Guest {
            first_name:           r.get::<_, Option<String>>(1)?.unwrap_or_default(),
            last_name:            r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            guest_id_card_number: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
            guest_phone:          r.get::<_, Option<String>>(4)?.unwrap_or_default(),
          }))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      rows
    };

    let with_guest: Vec<_> = pending.into_iter().filter(|(_, g)| !g.first_name.is_empty()).collect();
    if !with_guest.is_empty() {
      info!(count = with_guest.len(), "moving reservations to guest lists");
    }
    for (id, guest) in with_guest {
      let guests = serde_json::to_string(&[guest]).map_err(json_error)?;
      conn.execute("UPDATE Reservations SET guests = ?1 WHERE id = ?2", params![guests, id])?;
    }
    Ok(())
  }
}

// ─── v8 ──────────────────────────────────────────────────────────────────────

/// Hostings get a guest list too, seeded from the primary guest columns.
/// Hostings never stored a phone number, so it starts empty.
pub struct HostingGuestLists;

impl Migration for HostingGuestLists {
  fn version(&self) -> u32 { 8 }

  fn name(&self) -> &'static str { "hosting_guest_lists" }

  fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
    add_column(conn, "Hostings", "guests", "TEXT DEFAULT '[]'")?;

    let pending = {
      let mut stmt = conn.prepare(
        "SELECT id, guestFirstName, guestLastName, guestIdCardNumber
           FROM Hostings WHERE guests = '[]'",
      )?;
      let rows = stmt
        .query_map([], |r| {
          Ok((r.get::<_, i64>(0)?, Guest {
            first_name:           r.get::<_, Option<String>>(1)?.unwrap_or_default(),
            last_name:            r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            guest_id_card_number: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
            guest_phone:          String::new(),
          }))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      rows
    };

    if !pending.is_empty() {
      info!(count = pending.len(), "moving hostings to guest lists");
    }
    for (id, guest) in pending {
      let guests = serde_json::to_string(&[guest]).map_err(json_error)?;
      conn.execute("UPDATE Hostings SET guests = ?1 WHERE id = ?2", params![guests, id])?;
    }
    Ok(())
  }
}
