//! The `Document` and `SingletonDocument` traits.
//!
//! A document is one persisted record of a given entity kind; a collection is
//! the full set of documents of one kind, stored together under a stable
//! collection name. Singletons (homepage copy, site settings) have exactly one
//! instance and no identifier.

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// A persistable entity with a stable string identifier.
///
/// The collection name doubles as the backing file stem and the root key of
/// the persisted JSON, so it never changes once data exists.
pub trait Document:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  /// Collection this entity kind is stored in, e.g. `"articles"`.
  const COLLECTION: &'static str;

  /// The unique identifier. Empty means "not yet assigned" — the store
  /// assigns a fresh id on create in that case.
  fn id(&self) -> &str;

  /// Set the identifier. Called exactly once, by the store, at creation.
  fn set_id(&mut self, id: String);

  /// The unique slug for slugged kinds; `None` for everything else.
  fn slug(&self) -> Option<&str> {
    None
  }

  /// Boundary coercion applied before validation on every write: clamp
  /// out-of-range values, trim identifier whitespace. Must be idempotent.
  fn normalize(&mut self) {}

  /// Required-field checks. A failure here is reported to the caller with a
  /// field-level message and nothing is persisted.
  fn validate(&self) -> Result<()> {
    Ok(())
  }
}

/// An entity kind with exactly one instance, stored as a single object.
///
/// Absence of the backing file is not an error: the store materialises
/// [`SingletonDocument::initial`] on first read, so callers never need
/// existence checks.
pub trait SingletonDocument:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  /// Name of the backing file and the root key of the persisted JSON.
  const COLLECTION: &'static str;

  /// The compiled default value used to initialise an absent file.
  fn initial() -> Self;
}

/// Fail with [`crate::Error::Validation`] if `value` is blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    Err(crate::Error::missing_field(field))
  } else {
    Ok(())
  }
}
