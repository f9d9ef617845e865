//! Read-side content gateway: remote content service with compiled fallback.
//!
//! Public pages read editorial content through [`ContentGateway`]. When a
//! remote headless CMS is configured the gateway queries it; when it is not,
//! or when any request fails in transit, the gateway answers from the dataset
//! compiled into `vitrine-core`. Operations therefore never surface errors to
//! callers: the worst case is stock content, logged at `warn`.

mod remote;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use vitrine_core::{
  content::{
    Article, CaseStudy, FaqEntry, HomepageConfig, PricingPlan,
    ServiceOffering, SiteSettings, Testimonial,
  },
  fallback,
};

use crate::remote::{
  QueryResponse, RawArticle, RawCaseStudy, RawFaqEntry, RawPricingPlan,
  RawServiceOffering, RawTestimonial, groq,
};

/// Scaffold value that ships in example configs; treated as unconfigured.
pub const PLACEHOLDER_PROJECT_ID: &str = "your-project-id";

const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

// ─── Config ──────────────────────────────────────────────────────────────────

/// Connection settings for the remote content service.
#[derive(Debug, Clone, Default)]
pub struct RemoteContentConfig {
  pub project_id:  String,
  pub dataset:     String,
  /// API version date, e.g. `"2024-01-01"`.
  pub api_version: String,
  /// Override for the service origin. Defaults to the hosted CDN origin
  /// derived from `project_id`; set explicitly for self-hosted gateways and
  /// tests.
  pub base_url:    Option<String>,
}

impl RemoteContentConfig {
  /// Whether the settings point at a real project. Empty values and the
  /// scaffold placeholder mean the site intentionally runs on fallback
  /// content.
  pub fn is_configured(&self) -> bool {
    !self.project_id.trim().is_empty()
      && self.project_id != PLACEHOLDER_PROJECT_ID
      && !self.dataset.trim().is_empty()
  }

  fn query_url(&self) -> String {
    let origin = match &self.base_url {
      Some(base) => base.trim_end_matches('/').to_string(),
      None => format!("https://{}.apicdn.sanity.io", self.project_id),
    };
    format!(
      "{}/v{}/data/query/{}",
      origin, self.api_version, self.dataset
    )
  }
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

/// Read-only access to editorial content, remote-first with fallback.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ContentGateway {
  config: RemoteContentConfig,
  http:   Client,
}

impl ContentGateway {
  pub fn new(config: RemoteContentConfig) -> reqwest::Result<Self> {
    let http = Client::builder().timeout(REMOTE_TIMEOUT).build()?;
    Ok(Self { config, http })
  }

  pub fn is_configured(&self) -> bool {
    self.config.is_configured()
  }

  async fn fetch<T: DeserializeOwned>(&self, query: &str) -> reqwest::Result<T> {
    let response = self
      .http
      .get(self.config.query_url())
      .query(&[("query", query)])
      .send()
      .await?
      .error_for_status()?;
    let body: QueryResponse<T> = response.json().await?;
    Ok(body.result)
  }

  /// Run a query against the remote service. `None` means the remote could
  /// not answer (unconfigured, transport failure, bad status, bad payload)
  /// and the caller should serve fallback content.
  async fn remote<T: DeserializeOwned>(&self, query: &str) -> Option<T> {
    if !self.config.is_configured() {
      return None;
    }
    match self.fetch::<T>(query).await {
      Ok(result) => Some(result),
      Err(error) => {
        tracing::warn!(%error, query, "remote content fetch failed, serving fallback");
        None
      }
    }
  }

  // ── Articles ──────────────────────────────────────────────────────────

  /// All articles, newest first.
  pub async fn articles(&self) -> Vec<Article> {
    let mut articles =
      match self.remote::<Vec<RawArticle>>(groq::ARTICLES).await {
        Some(raw) => raw.into_iter().map(Article::from).collect(),
        None => fallback::dataset().articles.clone(),
      };
    sort_articles(&mut articles);
    articles
  }

  /// Articles in one category, newest first.
  pub async fn articles_by_category(&self, category: &str) -> Vec<Article> {
    let mut articles = match self
      .remote::<Vec<RawArticle>>(&groq::articles_by_category(category))
      .await
    {
      Some(raw) => raw.into_iter().map(Article::from).collect(),
      None => {
        let mut from_fallback = fallback::dataset().articles.clone();
        from_fallback.retain(|article| article.category == category);
        from_fallback
      }
    };
    sort_articles(&mut articles);
    articles
  }

  /// A healthy remote is authoritative here: a `null` answer means the
  /// article does not exist, not that fallback content should stand in.
  pub async fn article_by_slug(&self, slug: &str) -> Option<Article> {
    match self
      .remote::<Option<RawArticle>>(&groq::article_by_slug(slug))
      .await
    {
      Some(found) => found.map(Article::from),
      None => fallback::dataset()
        .articles
        .iter()
        .find(|article| article.slug == slug)
        .cloned(),
    }
  }

  /// The newest featured article, if any.
  pub async fn featured_article(&self) -> Option<Article> {
    self
      .articles()
      .await
      .into_iter()
      .find(|article| article.featured)
  }

  /// Distinct article categories, sorted.
  pub async fn article_categories(&self) -> Vec<String> {
    let mut categories: Vec<String> = self
      .articles()
      .await
      .into_iter()
      .map(|article| article.category)
      .collect();
    categories.sort();
    categories.dedup();
    categories
  }

  // ── Pricing ───────────────────────────────────────────────────────────

  /// All plans, display order ascending; ties keep stored order.
  pub async fn pricing_plans(&self) -> Vec<PricingPlan> {
    let mut plans = match self
      .remote::<Vec<RawPricingPlan>>(groq::PRICING_PLANS)
      .await
    {
      Some(raw) => raw.into_iter().map(PricingPlan::from).collect(),
      None => fallback::dataset().pricing.clone(),
    };
    sort_plans(&mut plans);
    plans
  }

  pub async fn pricing_by_category(&self, category: &str) -> Vec<PricingPlan> {
    let mut plans = match self
      .remote::<Vec<RawPricingPlan>>(&groq::pricing_by_category(category))
      .await
    {
      Some(raw) => raw.into_iter().map(PricingPlan::from).collect(),
      None => {
        let mut from_fallback = fallback::dataset().pricing.clone();
        from_fallback.retain(|plan| plan.category == category);
        from_fallback
      }
    };
    sort_plans(&mut plans);
    plans
  }

  // ── Testimonials ──────────────────────────────────────────────────────

  pub async fn testimonials(&self) -> Vec<Testimonial> {
    match self.remote::<Vec<RawTestimonial>>(groq::TESTIMONIALS).await {
      Some(raw) => raw.into_iter().map(Testimonial::from).collect(),
      None => fallback::dataset().testimonials.clone(),
    }
  }

  pub async fn featured_testimonials(&self) -> Vec<Testimonial> {
    self
      .testimonials()
      .await
      .into_iter()
      .filter(|testimonial| testimonial.featured)
      .collect()
  }

  // ── FAQs ──────────────────────────────────────────────────────────────

  /// All FAQ entries, display order ascending.
  pub async fn faqs(&self) -> Vec<FaqEntry> {
    let mut faqs = match self.remote::<Vec<RawFaqEntry>>(groq::FAQS).await {
      Some(raw) => raw.into_iter().map(FaqEntry::from).collect(),
      None => fallback::dataset().faqs.clone(),
    };
    faqs.sort_by_key(|faq| faq.order);
    faqs
  }

  pub async fn faqs_by_category(&self, category: &str) -> Vec<FaqEntry> {
    let mut faqs = match self
      .remote::<Vec<RawFaqEntry>>(&groq::faqs_by_category(category))
      .await
    {
      Some(raw) => raw.into_iter().map(FaqEntry::from).collect(),
      None => {
        let mut from_fallback = fallback::dataset().faqs.clone();
        from_fallback.retain(|faq| faq.category == category);
        from_fallback
      }
    };
    faqs.sort_by_key(|faq| faq.order);
    faqs
  }

  pub async fn faq_categories(&self) -> Vec<String> {
    let mut categories: Vec<String> = self
      .faqs()
      .await
      .into_iter()
      .map(|faq| faq.category)
      .collect();
    categories.sort();
    categories.dedup();
    categories
  }

  // ── Case studies and services ─────────────────────────────────────────

  pub async fn case_studies(&self) -> Vec<CaseStudy> {
    match self.remote::<Vec<RawCaseStudy>>(groq::CASE_STUDIES).await {
      Some(raw) => raw.into_iter().map(CaseStudy::from).collect(),
      None => fallback::dataset().case_studies.clone(),
    }
  }

  pub async fn case_study_by_slug(&self, slug: &str) -> Option<CaseStudy> {
    match self
      .remote::<Option<RawCaseStudy>>(&groq::case_study_by_slug(slug))
      .await
    {
      Some(found) => found.map(CaseStudy::from),
      None => fallback::dataset()
        .case_studies
        .iter()
        .find(|study| study.slug == slug)
        .cloned(),
    }
  }

  pub async fn services(&self) -> Vec<ServiceOffering> {
    match self
      .remote::<Vec<RawServiceOffering>>(groq::SERVICES)
      .await
    {
      Some(raw) => raw.into_iter().map(ServiceOffering::from).collect(),
      None => fallback::dataset().services.clone(),
    }
  }

  pub async fn service_by_slug(&self, slug: &str) -> Option<ServiceOffering> {
    match self
      .remote::<Option<RawServiceOffering>>(&groq::service_by_slug(slug))
      .await
    {
      Some(found) => found.map(ServiceOffering::from),
      None => fallback::dataset()
        .services
        .iter()
        .find(|service| service.slug == slug)
        .cloned(),
    }
  }

  // ── Singletons ────────────────────────────────────────────────────────

  /// Homepage copy. The site cannot render without it, so a remote that
  /// answers `null` also falls through to the compiled copy.
  pub async fn homepage(&self) -> HomepageConfig {
    match self
      .remote::<Option<HomepageConfig>>(groq::HOMEPAGE)
      .await
      .flatten()
    {
      Some(found) => found,
      None => fallback::dataset().homepage.clone(),
    }
  }

  pub async fn site_settings(&self) -> SiteSettings {
    match self
      .remote::<Option<SiteSettings>>(groq::SITE_SETTINGS)
      .await
      .flatten()
    {
      Some(found) => found,
      None => fallback::dataset().settings.clone(),
    }
  }
}

// ─── Shaping helpers ─────────────────────────────────────────────────────────

fn sort_articles(articles: &mut [Article]) {
  articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

fn sort_plans(plans: &mut [PricingPlan]) {
  plans.sort_by_key(|plan| plan.order);
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  /// A gateway that is not pointed at any remote project.
  fn unconfigured() -> ContentGateway {
    ContentGateway::new(RemoteContentConfig {
      project_id:  PLACEHOLDER_PROJECT_ID.into(),
      dataset:     "production".into(),
      api_version: "2024-01-01".into(),
      base_url:    None,
    })
    .expect("gateway")
  }

  /// A gateway configured for a remote that refuses connections, proving the
  /// fallback path on transport failure.
  fn unreachable() -> ContentGateway {
    ContentGateway::new(RemoteContentConfig {
      project_id:  "realproject".into(),
      dataset:     "production".into(),
      api_version: "2024-01-01".into(),
      base_url:    Some("http://127.0.0.1:9".into()),
    })
    .expect("gateway")
  }

  #[test]
  fn placeholder_and_blank_configs_are_unconfigured() {
    assert!(!unconfigured().is_configured());

    let blank = RemoteContentConfig::default();
    assert!(!blank.is_configured());

    let real = RemoteContentConfig {
      project_id:  "k9x2m1ab".into(),
      dataset:     "production".into(),
      api_version: "2024-01-01".into(),
      base_url:    None,
    };
    assert!(real.is_configured());
  }

  #[test]
  fn query_url_derives_origin_from_project_id() {
    let config = RemoteContentConfig {
      project_id:  "k9x2m1ab".into(),
      dataset:     "production".into(),
      api_version: "2024-01-01".into(),
      base_url:    None,
    };
    assert_eq!(
      config.query_url(),
      "https://k9x2m1ab.apicdn.sanity.io/v2024-01-01/data/query/production"
    );

    let overridden = RemoteContentConfig {
      base_url: Some("http://localhost:3999/".into()),
      ..config
    };
    assert_eq!(
      overridden.query_url(),
      "http://localhost:3999/v2024-01-01/data/query/production"
    );
  }

  #[tokio::test]
  async fn unconfigured_gateway_serves_fallback_articles_newest_first() {
    let gateway = unconfigured();
    let articles = gateway.articles().await;
    assert!(!articles.is_empty());
    for pair in articles.windows(2) {
      assert!(pair[0].published_at >= pair[1].published_at);
    }
  }

  #[tokio::test]
  async fn transport_failure_falls_back_instead_of_erroring() {
    let gateway = unreachable();
    assert!(gateway.is_configured());

    let articles = gateway.articles().await;
    assert_eq!(articles.len(), fallback::dataset().articles.len());

    let homepage = gateway.homepage().await;
    assert_eq!(homepage, fallback::dataset().homepage);
  }

  #[tokio::test]
  async fn featured_article_is_newest_featured() {
    let gateway = unconfigured();
    let featured = gateway.featured_article().await.expect("featured");
    assert!(featured.featured);

    let all = gateway.articles().await;
    let first_featured = all.iter().find(|a| a.featured).expect("featured");
    assert_eq!(featured.id, first_featured.id);
  }

  #[tokio::test]
  async fn article_lookup_by_slug_hits_and_misses() {
    let gateway = unconfigured();
    let known = &fallback::dataset().articles[0];

    let found = gateway.article_by_slug(&known.slug).await;
    assert_eq!(found.map(|a| a.id), Some(known.id.clone()));

    assert!(gateway.article_by_slug("no-such-slug").await.is_none());
  }

  #[tokio::test]
  async fn pricing_sorted_by_display_order_within_category() {
    let gateway = unconfigured();

    let all = gateway.pricing_plans().await;
    for pair in all.windows(2) {
      assert!(pair[0].order <= pair[1].order);
    }

    let local = gateway.pricing_by_category("local").await;
    assert!(!local.is_empty());
    assert!(local.iter().all(|plan| plan.category == "local"));
  }

  #[tokio::test]
  async fn category_lists_are_distinct_and_sorted() {
    let gateway = unconfigured();
    let categories = gateway.article_categories().await;
    assert!(!categories.is_empty());
    for pair in categories.windows(2) {
      assert!(pair[0] < pair[1]);
    }
  }

  #[tokio::test]
  async fn featured_testimonials_filters_the_full_list() {
    let gateway = unconfigured();
    let featured = gateway.featured_testimonials().await;
    assert!(!featured.is_empty());
    assert!(featured.iter().all(|t| t.featured));
  }

  #[tokio::test]
  async fn faq_order_is_ascending_within_category() {
    let gateway = unconfigured();
    let general = gateway.faqs_by_category("general").await;
    assert!(!general.is_empty());
    for pair in general.windows(2) {
      assert!(pair[0].order <= pair[1].order);
    }
  }

  #[tokio::test]
  async fn slug_lookups_cover_case_studies_and_services() {
    let gateway = unconfigured();

    let study = &fallback::dataset().case_studies[0];
    let found = gateway.case_study_by_slug(&study.slug).await;
    assert_eq!(found.map(|s| s.id), Some(study.id.clone()));

    let service = &fallback::dataset().services[0];
    let found = gateway.service_by_slug(&service.slug).await;
    assert_eq!(found.map(|s| s.id), Some(service.id.clone()));
  }
}
