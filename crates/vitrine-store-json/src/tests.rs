//! Integration tests for `JsonStore` against a temporary directory.

use tempfile::TempDir;
use uuid::Uuid;
use vitrine_core::{
  Error as CoreError,
  content::{Article, HomepageConfig, PricingPlan, SiteSettings},
  document::{Document, SingletonDocument},
  fallback,
  store::DocumentStore,
};

use crate::{Error, JsonStore, envelope};

async fn store() -> (TempDir, JsonStore) {
  let dir = TempDir::new().expect("temp dir");
  let store = JsonStore::open(dir.path()).await.expect("open store");
  (dir, store)
}

fn plan(id: &str, name: &str) -> PricingPlan {
  PricingPlan {
    id:          id.into(),
    name:        name.into(),
    category:    "seo".into(),
    price:       "$990".into(),
    period:      "/month".into(),
    description: String::new(),
    features:    vec!["Site audit".into()],
    popular:     false,
    order:       1,
  }
}

fn article(id: &str, slug: &str) -> Article {
  Article {
    id:           id.into(),
    title:        "Content Decay".into(),
    slug:         slug.into(),
    excerpt:      String::new(),
    category:     "content".into(),
    author:       "Dana Voss".into(),
    published_at: "2025-04-22".into(),
    read_time:    "7 min read".into(),
    featured:     false,
    body:         String::new(),
  }
}

// ─── Create / get / list ─────────────────────────────────────────────────────

#[tokio::test]
async fn list_on_fresh_store_is_empty() {
  let (_dir, s) = store().await;
  let plans: Vec<PricingPlan> = s.list().await.unwrap();
  assert!(plans.is_empty());
}

#[tokio::test]
async fn create_assigns_uuid_when_id_is_empty() {
  let (_dir, s) = store().await;

  let created = s.create(plan("", "Starter")).await.unwrap();
  assert!(Uuid::parse_str(&created.id).is_ok());

  let fetched: Option<PricingPlan> = s.get(&created.id).await.unwrap();
  assert_eq!(fetched.unwrap().name, "Starter");
}

#[tokio::test]
async fn create_keeps_caller_supplied_id() {
  let (_dir, s) = store().await;

  let created = s.create(plan("plan-1", "Starter")).await.unwrap();
  assert_eq!(created.id, "plan-1");

  let listed: Vec<PricingPlan> = s.list().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, "plan-1");
}

#[tokio::test]
async fn create_rejects_duplicate_id() {
  let (_dir, s) = store().await;
  s.create(plan("plan-1", "Starter")).await.unwrap();

  let err = s.create(plan("plan-1", "Growth")).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::DuplicateId { id, .. }) if id == "plan-1"
  ));

  // The losing write changed nothing.
  let listed: Vec<PricingPlan> = s.list().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].name, "Starter");
}

#[tokio::test]
async fn create_rejects_duplicate_slug() {
  let (_dir, s) = store().await;
  s.create(article("a1", "content-decay")).await.unwrap();

  let err = s.create(article("a2", "content-decay")).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::DuplicateSlug { slug, .. }) if slug == "content-decay"
  ));
}

#[tokio::test]
async fn create_rejects_blank_required_field() {
  let (_dir, s) = store().await;

  let err = s.create(plan("p1", "  ")).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::Validation { field: "name", .. })
  ));

  // Validation failures never touch the disk.
  assert!(!s.file_path(PricingPlan::COLLECTION).exists());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_whole_document() {
  let (_dir, s) = store().await;
  s.create(plan("plan-1", "Starter")).await.unwrap();

  let mut changed = plan("plan-1", "Starter");
  changed.price = "$1,200".into();
  changed.features = vec!["Site audit".into(), "Monthly report".into()];
  s.update(changed.clone()).await.unwrap();

  let fetched: PricingPlan = s.get("plan-1").await.unwrap().unwrap();
  assert_eq!(fetched, changed);

  // Applying the same update again converges on the same state.
  s.update(changed.clone()).await.unwrap();
  let again: PricingPlan = s.get("plan-1").await.unwrap().unwrap();
  assert_eq!(again, changed);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
  let (_dir, s) = store().await;
  let err = s.update(plan("ghost", "Ghost")).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::NotFound { id, .. }) if id == "ghost"
  ));
}

#[tokio::test]
async fn update_may_keep_its_own_slug_but_not_steal_another() {
  let (_dir, s) = store().await;
  s.create(article("a1", "content-decay")).await.unwrap();
  s.create(article("a2", "technical-seo")).await.unwrap();

  // Same slug, same document: fine.
  let mut own = article("a1", "content-decay");
  own.title = "Content Decay, Revisited".into();
  s.update(own).await.unwrap();

  // Another document's slug: rejected.
  let err = s.update(article("a2", "content-decay")).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::DuplicateSlug { .. })
  ));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_and_second_delete_fails() {
  let (_dir, s) = store().await;
  s.create(plan("plan-1", "Starter")).await.unwrap();

  s.delete::<PricingPlan>("plan-1").await.unwrap();
  let gone: Option<PricingPlan> = s.get("plan-1").await.unwrap();
  assert!(gone.is_none());

  let err = s.delete::<PricingPlan>("plan-1").await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::NotFound { .. })));
}

// ─── Singletons ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn singleton_read_materialises_compiled_default() {
  let (_dir, s) = store().await;

  let homepage: HomepageConfig = s.read_singleton().await.unwrap();
  assert_eq!(homepage, fallback::dataset().homepage);

  // First read wrote the default to disk at version 1.
  let path = s.file_path(HomepageConfig::COLLECTION);
  let (version, payload) =
    envelope::read(&path, HomepageConfig::COLLECTION).unwrap();
  assert_eq!(version, 1);
  assert!(payload.is_some());
}

#[tokio::test]
async fn singleton_write_round_trips() {
  let (_dir, s) = store().await;

  let mut settings: SiteSettings = s.read_singleton().await.unwrap();
  settings.tagline = "New tagline".into();
  s.write_singleton(settings.clone()).await.unwrap();

  let reread: SiteSettings = s.read_singleton().await.unwrap();
  assert_eq!(reread, settings);
}

// ─── Version stamp and write discipline ──────────────────────────────────────

#[tokio::test]
async fn version_increments_by_one_per_successful_write() {
  let (_dir, s) = store().await;
  let path = s.file_path(PricingPlan::COLLECTION);

  s.create(plan("p1", "Starter")).await.unwrap();
  let (v1, _) = envelope::read(&path, PricingPlan::COLLECTION).unwrap();
  assert_eq!(v1, 1);

  s.create(plan("p2", "Growth")).await.unwrap();
  let (v2, _) = envelope::read(&path, PricingPlan::COLLECTION).unwrap();
  assert_eq!(v2, 2);

  // A rejected write does not burn a version.
  s.create(plan("p1", "Clone")).await.unwrap_err();
  let (v3, _) = envelope::read(&path, PricingPlan::COLLECTION).unwrap();
  assert_eq!(v3, 2);
}

#[tokio::test]
async fn stale_write_is_rejected_and_leaves_file_intact() {
  let (_dir, s) = store().await;
  let path = s.file_path(PricingPlan::COLLECTION);

  s.create(plan("p1", "Starter")).await.unwrap();
  let (current, payload) =
    envelope::read(&path, PricingPlan::COLLECTION).unwrap();
  assert_eq!(current, 1);

  // A writer holding a version captured before the last write loses.
  let err = envelope::write(
    &path,
    PricingPlan::COLLECTION,
    0,
    serde_json::Value::Array(vec![]),
  )
  .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::StaleWrite {
      expected: 0,
      found: 1,
      ..
    })
  ));

  let (after_version, after_payload) =
    envelope::read(&path, PricingPlan::COLLECTION).unwrap();
  assert_eq!(after_version, 1);
  assert_eq!(after_payload, payload);
}

#[tokio::test]
async fn files_are_pretty_printed_with_collection_root_key() {
  let (_dir, s) = store().await;
  s.create(plan("p1", "Starter")).await.unwrap();

  let text = std::fs::read_to_string(s.file_path(PricingPlan::COLLECTION))
    .unwrap();
  assert!(text.starts_with("{\n"));
  assert!(text.contains("\"version\": 1"));
  assert!(text.contains("\"pricing\": ["));
  assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn hand_seeded_file_without_version_stamp_is_readable() {
  let (_dir, s) = store().await;
  let path = s.file_path(PricingPlan::COLLECTION);

  std::fs::write(
    &path,
    r#"{ "pricing": [ { "id": "p1", "name": "Seeded", "category": "seo", "price": "$1" } ] }"#,
  )
  .unwrap();

  let listed: Vec<PricingPlan> = s.list().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].name, "Seeded");

  // The first store write adopts the file at version 1.
  s.create(plan("p2", "Growth")).await.unwrap();
  let (version, _) = envelope::read(&path, PricingPlan::COLLECTION).unwrap();
  assert_eq!(version, 1);
}

#[tokio::test]
async fn normalization_applies_at_the_write_boundary() {
  let (_dir, s) = store().await;

  let mut doc = article(" a1 ", "content-decay");
  doc.slug = " content-decay ".into();
  let created = s.create(doc).await.unwrap();
  assert_eq!(created.id, "a1");
  assert_eq!(created.slug, "content-decay");
}
