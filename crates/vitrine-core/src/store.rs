//! The `DocumentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `vitrine-store-json`).
//! Higher layers (`vitrine-server`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::document::{Document, SingletonDocument};

/// Implemented by backend error types so callers can recognise the domain
/// failure behind a backend error (not-found, duplicate, validation) without
/// matching on backend internals.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The wrapped [`crate::Error`], when this failure carries one. Backend
  /// infrastructure failures (I/O and the like) return `None`.
  fn as_core(&self) -> Option<&crate::Error>;
}

/// Abstraction over a Vitrine document store backend.
///
/// A backend stores homogeneous collections of [`Document`] values plus
/// standalone [`SingletonDocument`] values. Writes are all-or-nothing at
/// collection granularity: a failed write leaves the previously persisted
/// state untouched.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: StoreError;

  // ── Collections ───────────────────────────────────────────────────────

  /// List every document in `T`'s collection, in stored order.
  fn list<T: Document>(
    &self,
  ) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send + '_;

  /// Retrieve one document by id. Returns `None` if not found.
  fn get<'a, T: Document>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send + 'a;

  /// Persist a new document and return it as stored.
  ///
  /// An empty id means the store assigns one; a caller-supplied id is kept.
  /// Rejects duplicate ids, and duplicate slugs for slug-bearing kinds.
  fn create<T: Document>(
    &self,
    doc: T,
  ) -> impl Future<Output = Result<T, Self::Error>> + Send + '_;

  /// Replace the stored document that has `doc`'s id.
  ///
  /// Whole-document replacement, not a merge. Errors if the id is absent or
  /// the new slug collides with a different document.
  fn update<T: Document>(
    &self,
    doc: T,
  ) -> impl Future<Output = Result<T, Self::Error>> + Send + '_;

  /// Delete one document by id. Errors if the id is absent.
  fn delete<'a, T: Document>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Singletons ────────────────────────────────────────────────────────

  /// Read a singleton, falling back to [`SingletonDocument::initial`] when
  /// nothing has been persisted yet. Never fails with not-found.
  fn read_singleton<S: SingletonDocument>(
    &self,
  ) -> impl Future<Output = Result<S, Self::Error>> + Send + '_;

  /// Replace a singleton's entire value.
  fn write_singleton<S: SingletonDocument>(
    &self,
    value: S,
  ) -> impl Future<Output = Result<S, Self::Error>> + Send + '_;
}
