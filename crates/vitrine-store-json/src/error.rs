//! Error type for `vitrine-store-json`.

use thiserror::Error;
use vitrine_core::store::StoreError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] vitrine_core::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

impl StoreError for Error {
  fn as_core(&self) -> Option<&vitrine_core::Error> {
    match self {
      Error::Core(core) => Some(core),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
