//! Wire types and query builders for the remote content service.
//!
//! The service speaks the Sanity content-lake query API: a GROQ query goes in
//! the `query` parameter, the answer comes back under a `result` key. Remote
//! documents carry underscore-prefixed system fields and nest slugs one level
//! deeper than our entities, so each listed kind has a `Raw*` mirror that
//! converts into the core type. Singletons match the core shape directly.

use serde::Deserialize;
use vitrine_core::content::{
  Article, CaseStudy, FaqEntry, PricingPlan, ProcessStep, ServiceOffering,
  ServiceStat, Testimonial,
};

// ─── Response envelope ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse<T> {
  pub result: T,
}

/// `{"slug": {"current": "technical-seo"}}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSlug {
  #[serde(default)]
  pub current: String,
}

// ─── Raw documents ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawArticle {
  #[serde(rename = "_id")]
  pub id:           String,
  pub title:        String,
  #[serde(default)]
  pub slug:         RawSlug,
  #[serde(default)]
  pub excerpt:      String,
  #[serde(default)]
  pub category:     String,
  #[serde(default)]
  pub author:       String,
  #[serde(default)]
  pub published_at: String,
  #[serde(default)]
  pub read_time:    String,
  #[serde(default)]
  pub featured:     bool,
  #[serde(default)]
  pub body:         String,
}

impl From<RawArticle> for Article {
  fn from(raw: RawArticle) -> Self {
    Article {
      id:           raw.id,
      title:        raw.title,
      slug:         raw.slug.current,
      excerpt:      raw.excerpt,
      category:     raw.category,
      author:       raw.author,
      published_at: raw.published_at,
      read_time:    raw.read_time,
      featured:     raw.featured,
      body:         raw.body,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPricingPlan {
  #[serde(rename = "_id")]
  pub id:          String,
  pub name:        String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub price:       String,
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

impl From<RawPricingPlan> for PricingPlan {
  fn from(raw: RawPricingPlan) -> Self {
    PricingPlan {
      id:          raw.id,
      name:        raw.name,
      category:    raw.category,
      price:       raw.price,
      period:      raw.period,
      description: raw.description,
      features:    raw.features,
      popular:     raw.popular,
      order:       raw.order,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTestimonial {
  #[serde(rename = "_id")]
  pub id:       String,
  pub name:     String,
  #[serde(default)]
  pub role:     String,
  #[serde(default)]
  pub company:  String,
  #[serde(default = "default_rating")]
  pub rating:   i64,
  #[serde(default)]
  pub text:     String,
  #[serde(default)]
  pub result:   String,
  #[serde(default)]
  pub featured: bool,
}

fn default_rating() -> i64 {
  5
}

impl From<RawTestimonial> for Testimonial {
  fn from(raw: RawTestimonial) -> Self {
    Testimonial {
      id:       raw.id,
      name:     raw.name,
      role:     raw.role,
      company:  raw.company,
      rating:   raw.rating.clamp(1, 5),
      text:     raw.text,
      result:   raw.result,
      featured: raw.featured,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFaqEntry {
  #[serde(rename = "_id")]
  pub id:       String,
  pub question: String,
  #[serde(default)]
  pub answer:   String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub order:    i64,
}

impl From<RawFaqEntry> for FaqEntry {
  fn from(raw: RawFaqEntry) -> Self {
    FaqEntry {
      id:       raw.id,
      question: raw.question,
      answer:   raw.answer,
      category: raw.category,
      order:    raw.order,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCaseStudy {
  #[serde(rename = "_id")]
  pub id:           String,
  pub title:        String,
  #[serde(default)]
  pub slug:         RawSlug,
  #[serde(default)]
  pub industry:     String,
  #[serde(default)]
  pub preview:      String,
  #[serde(default)]
  pub metric:       String,
  #[serde(default)]
  pub metric_label: String,
  #[serde(default)]
  pub timeline:     String,
  #[serde(default)]
  pub challenge:    String,
  #[serde(default)]
  pub solution:     String,
  #[serde(default)]
  pub results:      Vec<String>,
  #[serde(default)]
  pub testimonial:  String,
  #[serde(default)]
  pub client_name:  String,
}

impl From<RawCaseStudy> for CaseStudy {
  fn from(raw: RawCaseStudy) -> Self {
    CaseStudy {
      id:           raw.id,
      title:        raw.title,
      slug:         raw.slug.current,
      industry:     raw.industry,
      preview:      raw.preview,
      metric:       raw.metric,
      metric_label: raw.metric_label,
      timeline:     raw.timeline,
      challenge:    raw.challenge,
      solution:     raw.solution,
      results:      raw.results,
      testimonial:  raw.testimonial,
      client_name:  raw.client_name,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawServiceOffering {
  #[serde(rename = "_id")]
  pub id:          String,
  pub title:       String,
  #[serde(default)]
  pub slug:        RawSlug,
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

impl From<RawServiceOffering> for ServiceOffering {
  fn from(raw: RawServiceOffering) -> Self {
    ServiceOffering {
      id:          raw.id,
      title:       raw.title,
      slug:        raw.slug.current,
      tagline:     raw.tagline,
      description: raw.description,
      features:    raw.features,
      process:     raw.process,
      stats:       raw.stats,
    }
  }
}

// ─── GROQ queries ────────────────────────────────────────────────────────────

pub(crate) mod groq {
  pub(crate) const ARTICLES: &str =
    r#"*[_type == "article"] | order(publishedAt desc)"#;
  pub(crate) const PRICING_PLANS: &str =
    r#"*[_type == "pricingPlan"] | order(order asc)"#;
  pub(crate) const TESTIMONIALS: &str = r#"*[_type == "testimonial"]"#;
  pub(crate) const FAQS: &str = r#"*[_type == "faq"] | order(order asc)"#;
  pub(crate) const CASE_STUDIES: &str = r#"*[_type == "caseStudy"]"#;
  pub(crate) const SERVICES: &str = r#"*[_type == "service"]"#;
  pub(crate) const HOMEPAGE: &str = r#"*[_type == "homepage"][0]"#;
  pub(crate) const SITE_SETTINGS: &str = r#"*[_type == "siteSettings"][0]"#;

  pub(crate) fn articles_by_category(category: &str) -> String {
    format!(
      r#"*[_type == "article" && category == "{}"] | order(publishedAt desc)"#,
      escape(category)
    )
  }

  pub(crate) fn article_by_slug(slug: &str) -> String {
    format!(
      r#"*[_type == "article" && slug.current == "{}"][0]"#,
      escape(slug)
    )
  }

  pub(crate) fn pricing_by_category(category: &str) -> String {
    format!(
      r#"*[_type == "pricingPlan" && category == "{}"] | order(order asc)"#,
      escape(category)
    )
  }

  pub(crate) fn faqs_by_category(category: &str) -> String {
    format!(
      r#"*[_type == "faq" && category == "{}"] | order(order asc)"#,
      escape(category)
    )
  }

  pub(crate) fn case_study_by_slug(slug: &str) -> String {
    format!(
      r#"*[_type == "caseStudy" && slug.current == "{}"][0]"#,
      escape(slug)
    )
  }

  pub(crate) fn service_by_slug(slug: &str) -> String {
    format!(
      r#"*[_type == "service" && slug.current == "{}"][0]"#,
      escape(slug)
    )
  }

  /// Escape a value for interpolation into a double-quoted GROQ string
  /// literal. Caller input reaches queries only through this.
  fn escape(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('"', r#"\""#)
  }

}

// ─── Tests ───────────────────────────────────────────────────────────────────
