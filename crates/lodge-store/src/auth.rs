//! Credential checks and session issue.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use lodge_core::{
  BlockStore,
  user::{User, UserPatch},
};
use rand_core::{OsRng, RngCore as _};
use rusqlite::types::Value;
use serde::Serialize;
use serde_json::Value as Json;
use tracing::{info, warn};

use crate::{AuthError, Error, Result, Store};

/// Hash `password` into an argon2id PHC string (`$argon2id$v=19$…`).
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| Error::Credential(e.to_string()))?
      .to_string(),
  )
}

/// Check `candidate` against a stored credential.
///
/// PHC strings are verified with argon2. Anything not starting with `$` is a
/// legacy plaintext credential from the seed data and is compared directly.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
  if is_legacy(stored) {
    return stored == candidate;
  }
  PasswordHash::new(stored)
    .is_ok_and(|hash| Argon2::default().verify_password(candidate.as_bytes(), &hash).is_ok())
}

fn is_legacy(stored: &str) -> bool { !stored.starts_with('$') }

/// A successful login.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
  pub user:  User,
  /// Opaque bearer token; 64 hex characters.
  pub token: String,
}

/// Verifies credentials against the Users table.
pub struct AuthGateway<B> {
  store: Store<B>,
}

impl<B: BlockStore> AuthGateway<B> {
  pub fn new(store: Store<B>) -> Self { Self { store } }

  /// Log `username` in.
  ///
  /// Unknown users and wrong passwords are both rejected with
  /// [`AuthError::InvalidCredentials`]. An inactive account is rejected with
  /// [`AuthError::AccountInactive`] whatever password was given. Every
  /// outcome is written to the activity log.
  pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
    let rows = self
      .store
      .execute(
        "SELECT id, password FROM Users WHERE username = ?1",
        vec![Value::Text(username.to_owned())],
      )
      .await?;

    let found = rows.into_iter().next().and_then(|row| {
      let id = row.get("id").and_then(Json::as_i64)?;
      let stored = row.get("password").and_then(Json::as_str)?.to_owned();
      Some((id, stored))
    });

    let Some((id, stored)) = found else {
      return self.reject(username, AuthError::InvalidCredentials).await;
    };

    let users = self.store.users();
    let Some(user) = users.get_by_id(id).await? else {
      return self.reject(username, AuthError::InvalidCredentials).await;
    };

    if !user.is_active() {
      return self.reject(username, AuthError::AccountInactive).await;
    }

    if !verify_password(&stored, password) {
      return self.reject(username, AuthError::InvalidCredentials).await;
    }

    if is_legacy(&stored) {
      info!(username, "upgrading legacy credential");
      users
        .update(id, UserPatch { password: Some(password.to_owned()), ..Default::default() })
        .await?;
    }

    let token = new_token();
    self.store.set_variable("last_login_user", username).await?;
    self.store.activity().record(username, "Logged in").await?;

    Ok(Session { user, token })
  }

  async fn reject(&self, username: &str, reason: AuthError) -> Result<Session> {
    let action = match reason {
      AuthError::InvalidCredentials => "Failed login attempt: invalid credentials",
      AuthError::AccountInactive => "Failed login attempt: account inactive",
    };
    if let Err(e) = self.store.activity().record(username, action).await {
      warn!(username, error = %e, "could not record failed login");
    }
    Err(reason.into())
  }
}

fn new_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}
