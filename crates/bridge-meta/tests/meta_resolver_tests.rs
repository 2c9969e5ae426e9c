//! Meta resolver tests
//!
//! The translation policy here is sparse: exactly one row per locale, each
//! created on that locale's first access.

use std::collections::HashMap;
use std::sync::Arc;

use bridge_meta::{MetaConfig, MetaService};
use bridge_store_adapter_sqlite::StoreAdapterSqlite;
use bridge_types::error::Error;
use bridge_types::store_adapter::{MetaDefaults, PageMetaDefaults, PageRoute, StoreAdapter};
use tempfile::TempDir;

async fn create_test_service() -> (MetaService, Arc<StoreAdapterSqlite>, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = Arc::new(
		StoreAdapterSqlite::new(temp_dir.path().join("store.db"))
			.await
			.expect("Failed to create adapter"),
	);

	let config = MetaConfig { site_name: "My App".into() };
	(MetaService::new(adapter.clone(), config), adapter, temp_dir)
}

fn defaults_for(lang: &str, title: &str, description: &str) -> MetaDefaults {
	HashMap::from([(
		Box::from(lang),
		PageMetaDefaults { title: Some(title.into()), description: Some(description.into()) },
	)])
}

#[tokio::test]
async fn test_first_access_creates_tag_page_and_one_translation() {
	let (service, store, _temp) = create_test_service().await;
	let route = PageRoute::new("shop", "product", "view");

	let translation = service
		.get_or_create(&route, "en", &defaults_for("en", "Product", "A product"))
		.await
		.expect("resolve");

	assert_eq!(&*translation.title, "Product");
	assert_eq!(&*translation.description, "A product");

	let page = store.read_meta_page(&route).await.expect("page row exists");
	assert_eq!(page.meta_tag_id, translation.meta_tag_id);

	// Sparse policy: no other locale was fanned out
	assert!(matches!(store.read_page_translation(&route, "ru").await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_second_locale_is_demand_created() {
	let (service, store, _temp) = create_test_service().await;
	let route = PageRoute::new("shop", "product", "view");

	let en = service
		.get_or_create(&route, "en", &defaults_for("en", "Product", "A product"))
		.await
		.expect("resolve en");
	let ru = service
		.get_or_create(&route, "ru", &defaults_for("ru", "Товар", "Страница товара"))
		.await
		.expect("resolve ru");

	assert_eq!(en.meta_tag_id, ru.meta_tag_id, "Both locales share one tag and page");
	assert_eq!(&*ru.title, "Товар");

	let page = store.read_meta_page(&route).await.expect("page row");
	assert_eq!(page.meta_tag_id, en.meta_tag_id);
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
	let (service, _store, _temp) = create_test_service().await;
	let route = PageRoute::new("app", "site", "index");

	let first = service
		.get_or_create(&route, "en", &defaults_for("en", "Home", "Landing page"))
		.await
		.expect("first");
	let second = service
		.get_or_create(&route, "en", &MetaDefaults::new())
		.await
		.expect("second");

	assert_eq!(first.id, second.id);
	assert_eq!(&*second.title, "Home", "Existing row wins; later defaults are ignored");
}

#[tokio::test]
async fn test_site_name_fallback_when_defaults_miss_the_locale() {
	let (service, _store, _temp) = create_test_service().await;
	let route = PageRoute::new("app", "site", "about");

	// Defaults carry only "en"; the "kk" access falls back to the site name
	let translation = service
		.get_or_create(&route, "kk", &defaults_for("en", "About", "About us"))
		.await
		.expect("resolve kk");

	assert_eq!(&*translation.title, "My App");
	assert_eq!(&*translation.description, "My App");
}

#[tokio::test]
async fn test_routes_do_not_share_tags() {
	let (service, _store, _temp) = create_test_service().await;

	let a = service
		.get_or_create(&PageRoute::new("app", "site", "index"), "en", &MetaDefaults::new())
		.await
		.expect("route a");
	let b = service
		.get_or_create(&PageRoute::new("app", "site", "contact"), "en", &MetaDefaults::new())
		.await
		.expect("route b");

	assert_ne!(a.meta_tag_id, b.meta_tag_id);
}

// vim: ts=4
