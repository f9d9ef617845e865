//! HTTP layer for Vitrine.
//!
//! Exposes an axum [`Router`] with two surfaces: `/admin-api` (session-gated
//! CRUD over any [`DocumentStore`]) and `/api` (anonymous reads served
//! through the [`ContentGateway`], plus the contact form).

pub mod admin;
pub mod auth;
pub mod error;
pub mod public;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{MethodRouter, get, post, put},
};
use chrono::TimeDelta;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use vitrine_content::{ContentGateway, RemoteContentConfig};
use vitrine_core::{
  admin::Inquiry,
  content::{
    Article, CaseStudy, FaqEntry, HomepageConfig, PricingPlan,
    ServiceOffering, SiteSettings, Testimonial,
  },
  document::Document,
  store::DocumentStore,
};

use crate::auth::LoginThrottle;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `VITRINE_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// Directory the JSON collection files live in.
  pub data_dir:            PathBuf,
  pub admin_email:         String,
  /// Argon2 PHC string; generate one with `--hash-password`.
  pub admin_password_hash: String,
  #[serde(default = "default_session_ttl_minutes")]
  pub session_ttl_minutes: i64,
  /// Remote content service settings. Absent or placeholder values mean the
  /// site serves the compiled fallback dataset without network attempts.
  #[serde(default)]
  pub sanity_project_id:   String,
  #[serde(default)]
  pub sanity_dataset:      String,
  #[serde(default = "default_api_version")]
  pub sanity_api_version:  String,
  #[serde(default)]
  pub sanity_base_url:     Option<String>,
}

fn default_session_ttl_minutes() -> i64 {
  24 * 60
}

fn default_api_version() -> String {
  "2024-01-01".to_string()
}

impl ServerConfig {
  pub fn session_ttl(&self) -> TimeDelta {
    TimeDelta::minutes(self.session_ttl_minutes)
  }

  /// Remote-content settings in the shape the gateway takes.
  pub fn remote_content(&self) -> RemoteContentConfig {
    RemoteContentConfig {
      project_id:  self.sanity_project_id.clone(),
      dataset:     self.sanity_dataset.clone(),
      api_version: self.sanity_api_version.clone(),
      base_url:    self.sanity_base_url.clone(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: DocumentStore> {
  pub store:    Arc<S>,
  pub content:  ContentGateway,
  pub config:   Arc<ServerConfig>,
  pub throttle: Arc<LoginThrottle>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .nest("/admin-api", admin_router::<S>())
    .nest("/api", public_router::<S>())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// The standard CRUD method set for one collection kind.
fn collection<S, T>() -> MethodRouter<AppState<S>>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  T: Document,
{
  get(admin::list::<S, T>)
    .post(admin::create::<S, T>)
    .put(admin::update::<S, T>)
    .delete(admin::remove::<S, T>)
}

fn admin_router<S>() -> Router<AppState<S>>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/auth/login",    post(auth::login::<S>))
    .route("/auth/logout",   post(auth::logout::<S>))
    .route("/auth/session",  get(auth::session::<S>))
    .route("/auth/password", put(auth::change_password::<S>))
    .route("/articles",      collection::<S, Article>())
    .route("/pricing",       collection::<S, PricingPlan>())
    .route("/testimonials",  collection::<S, Testimonial>())
    .route("/faqs",          collection::<S, FaqEntry>())
    .route("/case-studies",  collection::<S, CaseStudy>())
    .route("/services",      collection::<S, ServiceOffering>())
    .route("/inquiries",     collection::<S, Inquiry>())
    .route(
      "/homepage",
      get(admin::read_singleton::<S, HomepageConfig>)
        .put(admin::write_singleton::<S, HomepageConfig>),
    )
    .route(
      "/settings",
      get(admin::read_singleton::<S, SiteSettings>)
        .put(admin::write_singleton::<S, SiteSettings>),
    )
}

fn public_router<S>() -> Router<AppState<S>>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/articles",            get(public::articles::<S>))
    .route("/articles/categories", get(public::article_categories::<S>))
    .route("/articles/{slug}",     get(public::article_by_slug::<S>))
    .route("/pricing",             get(public::pricing::<S>))
    .route("/testimonials",        get(public::testimonials::<S>))
    .route("/faqs",                get(public::faqs::<S>))
    .route("/faqs/categories",     get(public::faq_categories::<S>))
    .route("/case-studies",        get(public::case_studies::<S>))
    .route("/case-studies/{slug}", get(public::case_study_by_slug::<S>))
    .route("/services",            get(public::services::<S>))
    .route("/services/{slug}",     get(public::service_by_slug::<S>))
    .route("/home",                get(public::home::<S>))
    .route("/settings",            get(public::settings::<S>))
    .route("/contact",             post(public::contact::<S>))
}

// ─── Integration tests ────────────────────────────────────────────────────────
