//! Authenticated CRUD handlers for the admin API.
//!
//! One set of generic handlers serves every collection; the router picks the
//! document type per route. All of them demand a live session via
//! [`Authenticated`] before touching the store.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use vitrine_core::{
  document::{Document, SingletonDocument},
  store::DocumentStore,
};

use crate::{AppState, auth::Authenticated, error::Error};

/// Envelope for admin list responses: `{"items": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsBody<T> {
  pub items: Vec<T>,
}

/// Deletion addresses the document by id in the request body.
#[derive(Debug, Deserialize)]
pub struct DeleteBody {
  #[serde(default)]
  pub id: String,
}

/// `GET /admin-api/{collection}`
pub async fn list<S, T>(
  _: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<ItemsBody<T>>, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  T: Document,
{
  let items = state.store.list().await.map_err(Error::from_store)?;
  Ok(Json(ItemsBody { items }))
}

/// `POST /admin-api/{collection}` — 201 with the stored document, which
/// includes any id the store assigned.
pub async fn create<S, T>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(doc): Json<T>,
) -> Result<Response, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  T: Document,
{
  let stored = state.store.create(doc).await.map_err(Error::from_store)?;
  Ok((StatusCode::CREATED, Json(stored)).into_response())
}

/// `PUT /admin-api/{collection}` — full replacement of an existing document.
pub async fn update<S, T>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(doc): Json<T>,
) -> Result<Json<T>, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  T: Document,
{
  let stored = state.store.update(doc).await.map_err(Error::from_store)?;
  Ok(Json(stored))
}

/// `DELETE /admin-api/{collection}` — body: `{"id": ...}`.
pub async fn remove<S, T>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<DeleteBody>,
) -> Result<StatusCode, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  T: Document,
{
  state
    .store
    .delete::<T>(&body.id)
    .await
    .map_err(Error::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /admin-api/homepage` and `/admin-api/settings` — singletons read as
/// their initial value until first written.
pub async fn read_singleton<S, T>(
  _: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<T>, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  T: SingletonDocument,
{
  let doc = state
    .store
    .read_singleton()
    .await
    .map_err(Error::from_store)?;
  Ok(Json(doc))
}

/// `PUT /admin-api/homepage` and `/admin-api/settings`.
pub async fn write_singleton<S, T>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(doc): Json<T>,
) -> Result<Json<T>, Error>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  T: SingletonDocument,
{
  let stored = state
    .store
    .write_singleton(doc)
    .await
    .map_err(Error::from_store)?;
  Ok(Json(stored))
}
