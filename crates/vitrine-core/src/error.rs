//! Error types for `vitrine-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{collection} document not found: {id}")]
  NotFound {
    collection: &'static str,
    id:         String,
  },

  #[error("duplicate id in {collection}: {id}")]
  DuplicateId {
    collection: &'static str,
    id:         String,
  },

  #[error("duplicate slug in {collection}: {slug}")]
  DuplicateSlug {
    collection: &'static str,
    slug:       String,
  },

  #[error("invalid {field}: {message}")]
  Validation {
    field:   &'static str,
    message: String,
  },

  #[error(
    "stale write to {collection}: expected version {expected}, found {found}"
  )]
  StaleWrite {
    collection: &'static str,
    expected:   u64,
    found:      u64,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Shorthand for a required-field validation failure.
  pub fn missing_field(field: &'static str) -> Self {
    Error::Validation {
      field,
      message: format!("{field} is required"),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
