//! [`JsonStore`] — the JSON-file implementation of [`DocumentStore`].

use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
  sync::Arc,
};

use serde_json::Value;
use tokio::{sync::Mutex, task};
use uuid::Uuid;
use vitrine_core::{
  Error as CoreError,
  document::{Document, SingletonDocument},
  store::DocumentStore,
};

use crate::{
  Error, Result,
  envelope::{self, decode_items, encode_items},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Vitrine document store backed by one JSON file per collection.
///
/// Writes serialise per collection behind an async mutex, re-read the file
/// inside the critical section, and replace it atomically via a temp file and
/// rename. Cloning is cheap — the lock registry is reference-counted.
#[derive(Clone)]
pub struct JsonStore {
  dir:   PathBuf,
  locks: Arc<Mutex<HashMap<&'static str, Arc<Mutex<()>>>>>,
}

impl JsonStore {
  /// Open a store rooted at `dir`, creating the directory if needed.
  pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    let to_create = dir.clone();
    task::spawn_blocking(move || fs::create_dir_all(to_create)).await??;
    Ok(Self {
      dir,
      locks: Arc::new(Mutex::new(HashMap::new())),
    })
  }

  /// Directory the collection files live in.
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Backing file for a collection, `<dir>/<collection>.json`.
  pub fn file_path(&self, collection: &str) -> PathBuf {
    self.dir.join(format!("{collection}.json"))
  }

  /// Per-collection write mutex. Writers to the same collection queue;
  /// writers to different collections proceed independently.
  async fn collection_lock(&self, collection: &'static str) -> Arc<Mutex<()>> {
    let mut locks = self.locks.lock().await;
    locks.entry(collection).or_default().clone()
  }

  async fn load(
    &self,
    collection: &'static str,
  ) -> Result<(u64, Option<Value>)> {
    let path = self.file_path(collection);
    task::spawn_blocking(move || envelope::read(&path, collection)).await?
  }

  async fn persist(
    &self,
    collection: &'static str,
    expected_version: u64,
    payload: Value,
  ) -> Result<()> {
    let path = self.file_path(collection);
    task::spawn_blocking(move || {
      envelope::write(&path, collection, expected_version, payload)
    })
    .await?
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for JsonStore {
  type Error = Error;

  async fn list<T: Document>(&self) -> Result<Vec<T>> {
    let (_, payload) = self.load(T::COLLECTION).await?;
    decode_items(payload)
  }

  async fn get<T: Document>(&self, id: &str) -> Result<Option<T>> {
    let items: Vec<T> = self.list().await?;
    Ok(items.into_iter().find(|doc| doc.id() == id))
  }

  async fn create<T: Document>(&self, mut doc: T) -> Result<T> {
    doc.normalize();
    if doc.id().is_empty() {
      doc.set_id(Uuid::new_v4().to_string());
    }
    doc.validate().map_err(Error::Core)?;

    let lock = self.collection_lock(T::COLLECTION).await;
    let _guard = lock.lock().await;

    let (version, payload) = self.load(T::COLLECTION).await?;
    let mut items: Vec<T> = decode_items(payload)?;

    if items.iter().any(|existing| existing.id() == doc.id()) {
      return Err(
        CoreError::DuplicateId {
          collection: T::COLLECTION,
          id:         doc.id().to_owned(),
        }
        .into(),
      );
    }
    if let Some(slug) = doc.slug()
      && items.iter().any(|existing| existing.slug() == Some(slug))
    {
      return Err(
        CoreError::DuplicateSlug {
          collection: T::COLLECTION,
          slug:       slug.to_owned(),
        }
        .into(),
      );
    }

    items.push(doc.clone());
    self
      .persist(T::COLLECTION, version, encode_items(&items)?)
      .await?;
    Ok(doc)
  }

  async fn update<T: Document>(&self, mut doc: T) -> Result<T> {
    doc.normalize();
    doc.validate().map_err(Error::Core)?;

    let lock = self.collection_lock(T::COLLECTION).await;
    let _guard = lock.lock().await;

    let (version, payload) = self.load(T::COLLECTION).await?;
    let mut items: Vec<T> = decode_items(payload)?;

    let position = items
      .iter()
      .position(|existing| existing.id() == doc.id())
      .ok_or_else(|| CoreError::NotFound {
        collection: T::COLLECTION,
        id:         doc.id().to_owned(),
      })?;

    if let Some(slug) = doc.slug()
      && items
        .iter()
        .any(|other| other.id() != doc.id() && other.slug() == Some(slug))
    {
      return Err(
        CoreError::DuplicateSlug {
          collection: T::COLLECTION,
          slug:       slug.to_owned(),
        }
        .into(),
      );
    }

    items[position] = doc.clone();
    self
      .persist(T::COLLECTION, version, encode_items(&items)?)
      .await?;
    Ok(doc)
  }

  async fn delete<T: Document>(&self, id: &str) -> Result<()> {
    let lock = self.collection_lock(T::COLLECTION).await;
    let _guard = lock.lock().await;

    let (version, payload) = self.load(T::COLLECTION).await?;
    let mut items: Vec<T> = decode_items(payload)?;

    let before = items.len();
    items.retain(|existing| existing.id() != id);
    if items.len() == before {
      return Err(
        CoreError::NotFound {
          collection: T::COLLECTION,
          id:         id.to_owned(),
        }
        .into(),
      );
    }

    self
      .persist(T::COLLECTION, version, encode_items(&items)?)
      .await?;
    Ok(())
  }

  async fn read_singleton<S: SingletonDocument>(&self) -> Result<S> {
    let lock = self.collection_lock(S::COLLECTION).await;
    let _guard = lock.lock().await;

    let (version, payload) = self.load(S::COLLECTION).await?;
    match payload {
      Some(value) => Ok(serde_json::from_value(value)?),
      None => {
        // First read materialises the compiled default on disk, so later
        // writes have a version stamp to check against.
        let initial = S::initial();
        self
          .persist(S::COLLECTION, version, serde_json::to_value(&initial)?)
          .await?;
        Ok(initial)
      }
    }
  }

  async fn write_singleton<S: SingletonDocument>(&self, value: S) -> Result<S> {
    let lock = self.collection_lock(S::COLLECTION).await;
    let _guard = lock.lock().await;

    let (version, _) = self.load(S::COLLECTION).await?;
    self
      .persist(S::COLLECTION, version, serde_json::to_value(&value)?)
      .await?;
    Ok(value)
  }
}
