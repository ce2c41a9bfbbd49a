//! Employees eligible for staff housing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
  Active,
  Left,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub id:                RecordId,
  /// Staff code such as `EMP001`; absent on rows older than the code column.
  pub employee_id:       Option<String>,
  pub first_name:        String,
  pub last_name:         String,
  pub national_id:       Option<String>,
  pub job_title:         String,
  pub phone:             String,
  pub department:        String,
  pub status:            EmployeeStatus,
  pub contract_end_date: Option<DateTime<Utc>>,
}

impl Employee {
  pub fn full_name(&self) -> String {
    if self.last_name.is_empty() {
      self.first_name.clone()
    } else {
      format!("{} {}", self.first_name, self.last_name)
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
  pub employee_id:       Option<String>,
  pub first_name:        String,
  pub last_name:         String,
  pub national_id:       Option<String>,
  pub job_title:         String,
  pub phone:             String,
  pub department:        String,
  pub status:            EmployeeStatus,
  pub contract_end_date: Option<DateTime<Utc>>,
}

/// Partial update of an employee; `None` fields are left untouched and `Some(None)`
/// clears a nullable column.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub employee_id:       Option<Option<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub national_id:       Option<Option<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub job_title:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:            Option<EmployeeStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contract_end_date: Option<Option<DateTime<Utc>>>,
}
