//! Unauthenticated read endpoints for the site's public pages, plus the one
//! public write: the contact form.
//!
//! Reads go through the [`ContentGateway`], so they can never fail — the
//! worst a broken remote produces is fallback content. Only by-slug lookups
//! answer 404, and only when the slug genuinely matches nothing.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use vitrine_core::{
  admin::{Inquiry, InquiryStatus},
  content::{
    Article, CaseStudy, FaqEntry, HomepageConfig, PricingPlan,
    ServiceOffering, SiteSettings, Testimonial,
  },
  store::DocumentStore,
};

use crate::{AppState, error::Error};

// ─── Articles ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ArticleParams {
  pub category: Option<String>,
  #[serde(default)]
  pub featured: bool,
}

/// `GET /api/articles[?category=][?featured=true]`
pub async fn articles<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
  Query(params): Query<ArticleParams>,
) -> Json<Vec<Article>> {
  let mut articles = match params.category {
    Some(category) => state.content.articles_by_category(&category).await,
    None => state.content.articles().await,
  };
  if params.featured {
    articles.retain(|article| article.featured);
  }
  Json(articles)
}

/// `GET /api/articles/categories`
pub async fn article_categories<
  S: DocumentStore + Clone + Send + Sync + 'static,
>(
  State(state): State<AppState<S>>,
) -> Json<Vec<String>> {
  Json(state.content.article_categories().await)
}

/// `GET /api/articles/{slug}`
pub async fn article_by_slug<
  S: DocumentStore + Clone + Send + Sync + 'static,
>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<Article>, Error> {
  state
    .content
    .article_by_slug(&slug)
    .await
    .map(Json)
    .ok_or_else(|| Error::NotFound(format!("no article with slug {slug:?}")))
}

// ─── Pricing, testimonials, FAQs ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
  pub category: Option<String>,
}

/// `GET /api/pricing[?category=]`
pub async fn pricing<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
  Query(params): Query<CategoryParams>,
) -> Json<Vec<PricingPlan>> {
  let plans = match params.category {
    Some(category) => state.content.pricing_by_category(&category).await,
    None => state.content.pricing_plans().await,
  };
  Json(plans)
}

#[derive(Debug, Deserialize)]
pub struct TestimonialParams {
  #[serde(default)]
  pub featured: bool,
}

/// `GET /api/testimonials[?featured=true]`
pub async fn testimonials<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
  Query(params): Query<TestimonialParams>,
) -> Json<Vec<Testimonial>> {
  let testimonials = if params.featured {
    state.content.featured_testimonials().await
  } else {
    state.content.testimonials().await
  };
  Json(testimonials)
}

/// `GET /api/faqs[?category=]`
pub async fn faqs<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
  Query(params): Query<CategoryParams>,
) -> Json<Vec<FaqEntry>> {
  let faqs = match params.category {
    Some(category) => state.content.faqs_by_category(&category).await,
    None => state.content.faqs().await,
  };
  Json(faqs)
}

/// `GET /api/faqs/categories`
pub async fn faq_categories<
  S: DocumentStore + Clone + Send + Sync + 'static,
>(
  State(state): State<AppState<S>>,
) -> Json<Vec<String>> {
  Json(state.content.faq_categories().await)
}

// ─── Case studies and services ───────────────────────────────────────────────

/// `GET /api/case-studies`
pub async fn case_studies<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
) -> Json<Vec<CaseStudy>> {
  Json(state.content.case_studies().await)
}

/// `GET /api/case-studies/{slug}`
pub async fn case_study_by_slug<
  S: DocumentStore + Clone + Send + Sync + 'static,
>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<CaseStudy>, Error> {
  state
    .content
    .case_study_by_slug(&slug)
    .await
    .map(Json)
    .ok_or_else(|| {
      Error::NotFound(format!("no case study with slug {slug:?}"))
    })
}

/// `GET /api/services`
pub async fn services<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
) -> Json<Vec<ServiceOffering>> {
  Json(state.content.services().await)
}

/// `GET /api/services/{slug}`
pub async fn service_by_slug<
  S: DocumentStore + Clone + Send + Sync + 'static,
>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<ServiceOffering>, Error> {
  state
    .content
    .service_by_slug(&slug)
    .await
    .map(Json)
    .ok_or_else(|| Error::NotFound(format!("no service with slug {slug:?}")))
}

// ─── Page aggregates and settings ────────────────────────────────────────────

/// Everything the homepage needs in one round trip.
#[derive(Debug, Serialize)]
pub struct HomePayload {
  pub homepage:     HomepageConfig,
  pub testimonials: Vec<Testimonial>,
  pub articles:     Vec<Article>,
}

/// `GET /api/home` — homepage copy, featured testimonials, three newest
/// articles.
pub async fn home<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
) -> Json<HomePayload> {
  let homepage = state.content.homepage().await;
  let testimonials = state.content.featured_testimonials().await;
  let articles: Vec<Article> =
    state.content.articles().await.into_iter().take(3).collect();
  Json(HomePayload { homepage, testimonials, articles })
}

/// `GET /api/settings`
pub async fn settings<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
) -> Json<SiteSettings> {
  Json(state.content.site_settings().await)
}

// ─── Contact form ────────────────────────────────────────────────────────────

/// Contact-form fields as submitted. Everything defaults so validation can
/// name the missing field instead of failing deserialisation wholesale.
#[derive(Debug, Deserialize)]
pub struct ContactBody {
  #[serde(default)]
  pub name:    String,
  #[serde(default)]
  pub email:   String,
  #[serde(default)]
  pub company: String,
  #[serde(default)]
  pub service: String,
  #[serde(default)]
  pub budget:  String,
  #[serde(default)]
  pub message: String,
}

/// `POST /api/contact` — the one public write. Status and timestamp are
/// server-assigned regardless of what the client sends.
pub async fn contact<S: DocumentStore + Clone + Send + Sync + 'static>(
  State(state): State<AppState<S>>,
  Json(body): Json<ContactBody>,
) -> Result<Response, Error> {
  let inquiry = Inquiry {
    id:         String::new(),
    name:       body.name,
    email:      body.email,
    company:    body.company,
    service:    body.service,
    budget:     body.budget,
    message:    body.message,
    status:     InquiryStatus::New,
    created_at: Utc::now(),
  };
  let stored = state
    .store
    .create(inquiry)
    .await
    .map_err(Error::from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": stored.id }))).into_response())
}
