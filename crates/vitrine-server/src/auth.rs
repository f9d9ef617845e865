//! The password gate: login, logout, session verification, password change.
//!
//! Sessions are server-side documents in the store's `sessions` collection;
//! the document id doubles as the opaque bearer token carried in the
//! `vitrine_session` cookie. Deleting the document is therefore an
//! authoritative revocation — there is no client-held state to trust.

use std::collections::HashMap;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
  response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeDelta, Utc};
use rand_core::{OsRng, RngCore as _};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use vitrine_core::{
  admin::{AdminUser, Session},
  store::{DocumentStore, StoreError as _},
};

use crate::{AppState, error::Error};

/// Name of the browser-held session cookie.
pub const SESSION_COOKIE: &str = "vitrine_session";

/// Minimum length accepted for a new admin password.
pub const MIN_PASSWORD_LEN: usize = 8;

const MAX_LOGIN_FAILURES: u32 = 5;
const LOCKOUT_MINUTES: i64 = 15;

// ─── Password hashing ────────────────────────────────────────────────────────

/// Hash a plaintext password into an argon2 PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored PHC string. A malformed hash
/// reads as a mismatch rather than an error.
fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

// ─── Session tokens and cookies ──────────────────────────────────────────────

/// 32 bytes of OS entropy, URL-safe base64 without padding.
fn generate_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  URL_SAFE_NO_PAD.encode(bytes)
}

/// Extract the session token from a request's `Cookie` header, if present.
fn cookie_token(headers: &HeaderMap) -> Option<String> {
  let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
  for cookie in cookies.split(';') {
    if let Some(value) = cookie.trim().strip_prefix(SESSION_COOKIE)
      && let Some(value) = value.strip_prefix('=')
    {
      return Some(value.to_string());
    }
  }
  None
}

fn set_session_cookie(response: &mut Response, token: &str, max_age: i64) {
  let value = format!(
    "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; \
     Max-Age={max_age}"
  );
  if let Ok(header_value) = HeaderValue::from_str(&value) {
    response.headers_mut().insert(header::SET_COOKIE, header_value);
  }
}

fn clear_session_cookie(response: &mut Response) {
  set_session_cookie(response, "", 0);
}

// ─── Login throttle ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Default)]
struct Attempt {
  failures:     u32,
  locked_until: Option<DateTime<Utc>>,
}

/// In-memory per-email failure counter. Five consecutive failures lock the
/// email out for fifteen minutes; a successful login resets the counter.
/// Not persisted; a restart clears it.
#[derive(Default)]
pub struct LoginThrottle {
  attempts: Mutex<HashMap<String, Attempt>>,
}

impl LoginThrottle {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fails with [`Error::Throttled`] while `email` is locked out.
  async fn check(&self, email: &str, now: DateTime<Utc>) -> Result<(), Error> {
    let mut attempts = self.attempts.lock().await;
    let locked_until =
      attempts.get(email).and_then(|entry| entry.locked_until);
    if let Some(until) = locked_until {
      if now < until {
        return Err(Error::Throttled);
      }
      // Lockout elapsed; the next failure starts a fresh count.
      attempts.remove(email);
    }
    Ok(())
  }

  async fn record_failure(&self, email: &str, now: DateTime<Utc>) {
    let mut attempts = self.attempts.lock().await;
    let entry = attempts.entry(email.to_string()).or_default();
    entry.failures += 1;
    if entry.failures >= MAX_LOGIN_FAILURES && entry.locked_until.is_none() {
      entry.locked_until = Some(now + TimeDelta::minutes(LOCKOUT_MINUTES));
      tracing::warn!(email, "login throttled after repeated failures");
    }
  }

  async fn record_success(&self, email: &str) {
    self.attempts.lock().await.remove(email);
  }
}

// ─── Session extractor ───────────────────────────────────────────────────────

/// Present in a handler's arguments means the request carried a live session.
/// Carries the session so handlers know which account they act for.
pub struct Authenticated(pub Session);

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = cookie_token(&parts.headers).ok_or(Error::Unauthorized)?;
    let session: Session = state
      .store
      .get(&token)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::Unauthorized)?;

    if session.is_expired(Utc::now()) {
      // Expired sessions are deleted on sight.
      if let Err(error) = state.store.delete::<Session>(&token).await {
        tracing::debug!(%error, "failed to remove expired session");
      }
      return Err(Error::Unauthorized);
    }

    Ok(Authenticated(session))
  }
}

// ─── Bootstrap ───────────────────────────────────────────────────────────────

/// Seed the single admin account if the users collection is empty. Returns
/// `true` when an account was created. A later password change persists
/// through the store and wins over the configured hash.
pub async fn ensure_admin_account<S: DocumentStore>(
  store: &S,
  email: &str,
  password_hash: &str,
) -> Result<bool, S::Error> {
  let users: Vec<AdminUser> = store.list().await?;
  if !users.is_empty() {
    return Ok(false);
  }
  store
    .create(AdminUser {
      id:            String::new(),
      email:         email.to_string(),
      password_hash: password_hash.to_string(),
      role:          "admin".to_string(),
    })
    .await?;
  Ok(true)
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub password: String,
}

/// Session facts returned by login and the session probe.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
  pub email:      String,
  pub expires_at: DateTime<Utc>,
}

/// `POST /admin-api/auth/login` — body: `{"email": ..., "password": ...}`.
///
/// On success returns the session facts and sets the session cookie. Both
/// unknown email and wrong password answer with the same generic 401.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Response, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let email = body.email.trim().to_lowercase();
  let now = Utc::now();
  state.throttle.check(&email, now).await?;

  let users: Vec<AdminUser> =
    state.store.list().await.map_err(Error::from_store)?;
  let Some(user) = users.into_iter().find(|user| user.email == email) else {
    state.throttle.record_failure(&email, now).await;
    return Err(Error::Unauthorized);
  };

  if !verify_password(&body.password, &user.password_hash) {
    state.throttle.record_failure(&email, now).await;
    return Err(Error::Unauthorized);
  }
  state.throttle.record_success(&email).await;

  prune_expired_sessions(state.store.as_ref(), now).await;

  let ttl = state.config.session_ttl();
  let session = state
    .store
    .create(Session {
      id:         generate_token(),
      user_id:    user.id.clone(),
      email:      user.email.clone(),
      created_at: now,
      expires_at: now + ttl,
    })
    .await
    .map_err(Error::from_store)?;

  let mut response = Json(SessionInfo {
    email:      session.email.clone(),
    expires_at: session.expires_at,
  })
  .into_response();
  set_session_cookie(&mut response, &session.id, ttl.num_seconds());
  Ok(response)
}

/// `POST /admin-api/auth/logout` — idempotent; requires no session, and
/// clearing an absent one is not an error.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Response
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  if let Some(token) = cookie_token(&headers)
    && let Err(error) = state.store.delete::<Session>(&token).await
  {
    // Unknown token is the idempotent case; anything else gets logged.
    if error.as_core().is_none() {
      tracing::warn!(%error, "session delete failed during logout");
    }
  }
  let mut response = StatusCode::NO_CONTENT.into_response();
  clear_session_cookie(&mut response);
  response
}

/// `GET /admin-api/auth/session` — the admin UI's page-load probe.
pub async fn session<S>(
  Authenticated(session): Authenticated,
) -> Json<SessionInfo>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Json(SessionInfo {
    email:      session.email,
    expires_at: session.expires_at,
  })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody {
  #[serde(default)]
  pub current_password: String,
  #[serde(default)]
  pub new_password:     String,
}

/// `PUT /admin-api/auth/password` — re-verifies the current password before
/// accepting the new one. Failures are field-level 400s and leave the stored
/// hash untouched.
pub async fn change_password<S>(
  Authenticated(session): Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<ChangePasswordBody>,
) -> Result<StatusCode, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let mut user: AdminUser = state
    .store
    .get(&session.user_id)
    .await
    .map_err(Error::from_store)?
    .ok_or(Error::Unauthorized)?;

  if !verify_password(&body.current_password, &user.password_hash) {
    return Err(Error::Validation {
      field:   "currentPassword",
      message: "current password is incorrect".to_string(),
    });
  }
  if body.new_password.len() < MIN_PASSWORD_LEN {
    return Err(Error::Validation {
      field:   "newPassword",
      message: format!("must be at least {MIN_PASSWORD_LEN} characters"),
    });
  }

  user.password_hash = hash_password(&body.new_password)?;
  state.store.update(user).await.map_err(Error::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// Best-effort removal of expired sessions, run on each successful login.
/// Failures must not block the login, so they are only logged.
async fn prune_expired_sessions<S: DocumentStore>(
  store: &S,
  now: DateTime<Utc>,
) {
  let sessions: Vec<Session> = match store.list().await {
    Ok(sessions) => sessions,
    Err(error) => {
      tracing::debug!(%error, "session prune skipped");
      return;
    }
  };
  for stale in sessions.into_iter().filter(|s| s.is_expired(now)) {
    if let Err(error) = store.delete::<Session>(&stale.id).await {
      tracing::debug!(%error, session = %stale.id, "expired session cleanup failed");
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
