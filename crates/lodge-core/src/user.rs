//! Users, roles, and account status.
//!
//! A [`User`] never carries its credential. The password only travels inward,
//! through [`NewUser`] and [`UserPatch`].

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// A role tag granted to a user. Users may hold several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  SuperAdmin,
  Admin,
  Hr,
  Viewer,
  Supervisor,
  Manager,
  Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
  Active,
  Inactive,
}

/// A user account as returned by the store, credential stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:       RecordId,
  pub username: String,
  /// Ordered; the first role is the user's primary one.
  pub roles:    Vec<Role>,
  pub status:   UserStatus,
}

impl User {
  pub fn is_active(&self) -> bool { self.status == UserStatus::Active }

  pub fn has_role(&self, role: Role) -> bool { self.roles.contains(&role) }
}

/// Input for creating a user. The password is hashed before it is stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub username: String,
  pub password: String,
  pub roles:    Vec<Role>,
  pub status:   UserStatus,
}

/// Partial update of a user; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub roles:    Option<Vec<Role>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:   Option<UserStatus>,
}
