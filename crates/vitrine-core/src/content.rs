//! Editorial content entities — the normalized shapes served to every page.
//!
//! These are the single field layouts callers see regardless of whether the
//! data came from the remote content service, the compiled fallback dataset,
//! or the admin document store. All of them serialise with camelCase keys;
//! that is also the wire shape of the admin API and the persisted files.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  document::{Document, SingletonDocument, require},
  fallback,
};

// ─── Article ─────────────────────────────────────────────────────────────────

/// A blog article.
///
/// `published_at` is an ISO 8601 date string; lexicographic order is
/// chronological order, which is what listing sorts rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
  #[serde(default)]
  pub id:           String,
  pub title:        String,
  pub slug:         String,
  #[serde(default)]
  pub excerpt:      String,
  pub category:     String,
  pub author:       String,
  #[serde(default)]
  pub published_at: String,
  /// Display string, e.g. `"8 min read"`.
  #[serde(default)]
  pub read_time:    String,
  #[serde(default)]
  pub featured:     bool,
  #[serde(default)]
  pub body:         String,
}

impl Document for Article {
  const COLLECTION: &'static str = "articles";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn slug(&self) -> Option<&str> {
    Some(&self.slug)
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
    self.slug = self.slug.trim().to_string();
  }

  fn validate(&self) -> Result<()> {
    require("title", &self.title)?;
    require("slug", &self.slug)?;
    require("category", &self.category)?;
    require("author", &self.author)?;
    Ok(())
  }
}

// ─── PricingPlan ─────────────────────────────────────────────────────────────

/// A purchasable plan shown on the pricing page.
///
/// `order` defines the display sort (ascending); ties keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
  #[serde(default)]
  pub id:          String,
  pub name:        String,
  pub category:    String,
  /// Display string, e.g. `"$499"`.
  pub price:       String,
  /// Display string, e.g. `"/month"`.
  #[serde(default)]
  pub period:      String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub features:    Vec<String>,
  #[serde(default)]
  pub popular:     bool,
  #[serde(default)]
  pub order:       i64,
}

impl Document for PricingPlan {
  const COLLECTION: &'static str = "pricing";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
  }

  fn validate(&self) -> Result<()> {
    require("name", &self.name)?;
    require("category", &self.category)?;
    require("price", &self.price)?;
    Ok(())
  }
}

// ─── Testimonial ─────────────────────────────────────────────────────────────

/// A client quote. `rating` is clamped into `[1, 5]` at the write boundary —
/// out-of-range input is coerced, not rejected, and never stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
  #[serde(default)]
  pub id:       String,
  pub name:     String,
  #[serde(default)]
  pub role:     String,
  #[serde(default)]
  pub company:  String,
  #[serde(default = "default_rating")]
  pub rating:   i64,
  pub text:     String,
  /// Headline outcome, e.g. `"+212% organic traffic"`.
  #[serde(default)]
  pub result:   String,
  #[serde(default)]
  pub featured: bool,
}

fn default_rating() -> i64 {
  5
}

impl Document for Testimonial {
  const COLLECTION: &'static str = "testimonials";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
    self.rating = self.rating.clamp(1, 5);
  }

  fn validate(&self) -> Result<()> {
    require("name", &self.name)?;
    require("text", &self.text)?;
    Ok(())
  }
}

// ─── FaqEntry ────────────────────────────────────────────────────────────────

/// One question/answer pair; `order` sorts within a category tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
  #[serde(default)]
  pub id:       String,
  pub question: String,
  pub answer:   String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub order:    i64,
}

impl Document for FaqEntry {
  const COLLECTION: &'static str = "faqs";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
  }

  fn validate(&self) -> Result<()> {
    require("question", &self.question)?;
    require("answer", &self.answer)?;
    Ok(())
  }
}

// ─── CaseStudy ───────────────────────────────────────────────────────────────

/// A long-form client results write-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
  #[serde(default)]
  pub id:           String,
  pub title:        String,
  pub slug:         String,
  pub industry:     String,
  #[serde(default)]
  pub preview:      String,
  /// Headline figure, e.g. `"+340%"`.
  #[serde(default)]
  pub metric:       String,
  /// What the figure measures, e.g. `"organic sessions"`.
  #[serde(default)]
  pub metric_label: String,
  #[serde(default)]
  pub timeline:     String,
  #[serde(default)]
  pub challenge:    String,
  #[serde(default)]
  pub solution:     String,
  /// Ordered result bullets.
  #[serde(default)]
  pub results:      Vec<String>,
  #[serde(default)]
  pub testimonial:  String,
  #[serde(default)]
  pub client_name:  String,
}

impl Document for CaseStudy {
  const COLLECTION: &'static str = "case-studies";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn slug(&self) -> Option<&str> {
    Some(&self.slug)
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
    self.slug = self.slug.trim().to_string();
  }

  fn validate(&self) -> Result<()> {
    require("title", &self.title)?;
    require("slug", &self.slug)?;
    require("industry", &self.industry)?;
    Ok(())
  }
}

// ─── ServiceOffering ─────────────────────────────────────────────────────────

/// One step of a service's delivery process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
  pub title:       String,
  #[serde(default)]
  pub description: String,
}

/// A headline figure shown on a service page, e.g. `{"value": "250+",
/// "label": "sites audited"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStat {
  pub value: String,
  pub label: String,
}

/// A sellable service with its landing-page copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
  #[serde(default)]
  pub id:          String,
  pub title:       String,
  pub slug:        String,
  #[serde(default)]
  pub tagline:     String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub features:    Vec<String>,
  #[serde(default)]
  pub process:     Vec<ProcessStep>,
  #[serde(default)]
  pub stats:       Vec<ServiceStat>,
}

impl Document for ServiceOffering {
  const COLLECTION: &'static str = "services";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn slug(&self) -> Option<&str> {
    Some(&self.slug)
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
    self.slug = self.slug.trim().to_string();
  }

  fn validate(&self) -> Result<()> {
    require("title", &self.title)?;
    require("slug", &self.slug)?;
    Ok(())
  }
}

// ─── Homepage singleton ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroCopy {
  pub badge:    String,
  pub title:    String,
  pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatItem {
  pub value: String,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaCopy {
  pub title:        String,
  pub subtitle:     String,
  pub button_label: String,
}

/// Homepage copy. Exactly one instance exists; an absent backing file means
/// the compiled default applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageConfig {
  pub hero:  HeroCopy,
  pub stats: Vec<StatItem>,
  pub cta:   CtaCopy,
}

impl SingletonDocument for HomepageConfig {
  const COLLECTION: &'static str = "homepage";

  fn initial() -> Self {
    fallback::dataset().homepage.clone()
  }
}

// ─── Site settings singleton ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
  pub email:   String,
  #[serde(default)]
  pub phone:   String,
  #[serde(default)]
  pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
  #[serde(default)]
  pub twitter:   String,
  #[serde(default)]
  pub linkedin:  String,
  #[serde(default)]
  pub facebook:  String,
  #[serde(default)]
  pub instagram: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDefaults {
  pub meta_title:       String,
  pub meta_description: String,
}

/// Site-wide settings: identity, contact details, social links, SEO defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
  pub site_name: String,
  #[serde(default)]
  pub tagline:   String,
  pub contact:   ContactInfo,
  #[serde(default)]
  pub social:    SocialLinks,
  pub seo:       SeoDefaults,
}

impl SingletonDocument for SiteSettings {
  const COLLECTION: &'static str = "settings";

  fn initial() -> Self {
    fallback::dataset().settings.clone()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
