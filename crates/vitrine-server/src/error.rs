//! Server error type and axum `IntoResponse` implementation.
//!
//! Every failure a handler can surface renders as a JSON body of the form
//! `{"error": message}`, plus a `"field"` key for validation failures so the
//! admin UI can attach the message to the offending input.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use vitrine_core::{Error as CoreError, store::StoreError};

#[derive(Debug, Error)]
pub enum Error {
  /// Bad credentials or a missing/expired session. Deliberately generic: the
  /// response never distinguishes a wrong email from a wrong password.
  #[error("invalid credentials")]
  Unauthorized,

  #[error("too many failed login attempts, try again later")]
  Throttled,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("invalid {field}: {message}")]
  Validation {
    field:   &'static str,
    message: String,
  },

  #[error("password hash error: {0}")]
  Hash(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Map a backend failure onto the admin API's status taxonomy: not-found
  /// to 404, duplicate id/slug to 409, validation to 400, anything else to a
  /// plain 500.
  pub fn from_store<E: StoreError>(err: E) -> Self {
    if let Some(core) = err.as_core() {
      match core {
        CoreError::NotFound { .. } => return Error::NotFound(core.to_string()),
        CoreError::DuplicateId { .. } | CoreError::DuplicateSlug { .. } => {
          return Error::Conflict(core.to_string());
        }
        CoreError::Validation { field, message } => {
          return Error::Validation {
            field:   *field,
            message: message.clone(),
          };
        }
        _ => {}
      }
    }
    Error::Store(Box::new(err))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::Throttled => StatusCode::TOO_MANY_REQUESTS,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::Conflict(_) => StatusCode::CONFLICT,
      Error::Validation { .. } => StatusCode::BAD_REQUEST,
      Error::Hash(_) | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = match &self {
      Error::Validation { field, message } => {
        json!({ "error": message, "field": field })
      }
      other => json!({ "error": other.to_string() }),
    };
    (status, Json(body)).into_response()
  }
}
