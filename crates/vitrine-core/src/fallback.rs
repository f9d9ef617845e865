//! The compiled fallback dataset.
//!
//! A full set of editorial content is embedded in the binary at build time.
//! The content gateway serves it whenever the remote content service is
//! unconfigured or unreachable, and the singleton defaults come from it, so
//! the site renders fully populated out of the box.

use std::sync::LazyLock;

use serde::Deserialize;

use crate::content::{
  Article, CaseStudy, FaqEntry, HomepageConfig, PricingPlan, ServiceOffering,
  SiteSettings, Testimonial,
};

static FALLBACK_JSON: &str = include_str!("../data/fallback.json");

static DATASET: LazyLock<FallbackDataset> =
  LazyLock::new(|| serde_json::from_str(FALLBACK_JSON).unwrap());

/// Every collection and singleton the site needs, fully populated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackDataset {
  pub articles:     Vec<Article>,
  pub pricing:      Vec<PricingPlan>,
  pub testimonials: Vec<Testimonial>,
  pub faqs:         Vec<FaqEntry>,
  pub case_studies: Vec<CaseStudy>,
  pub services:     Vec<ServiceOffering>,
  pub homepage:     HomepageConfig,
  pub settings:     SiteSettings,
}

/// The embedded dataset, parsed once on first access.
pub fn dataset() -> &'static FallbackDataset {
  &DATASET
}
