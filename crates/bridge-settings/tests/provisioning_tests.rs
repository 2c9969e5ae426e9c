//! Provisioning resolver tests
//!
//! Exercises the memo/cache/store resolution order, the get-or-create state
//! machine, the translation fan-out, and cache consistency on writes.

use std::sync::Arc;

use bridge_settings::{SettingsConfig, SettingsService};
use bridge_store_adapter_sqlite::StoreAdapterSqlite;
use bridge_types::error::Error;
use bridge_types::store_adapter::{SettingDefaults, SettingType, StoreAdapter};
use tempfile::TempDir;

async fn create_test_store() -> (Arc<StoreAdapterSqlite>, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("store.db"))
		.await
		.expect("Failed to create adapter");

	(Arc::new(adapter), temp_dir)
}

fn config_with_locales(locales: &[&str]) -> SettingsConfig {
	SettingsConfig {
		locales: locales.iter().map(|l| Box::from(*l)).collect(),
		..SettingsConfig::default()
	}
}

#[tokio::test]
async fn test_get_or_create_is_idempotent() {
	let (store, _temp) = create_test_store().await;
	let service = SettingsService::new(store.clone(), &config_with_locales(&["en"]))
		.expect("Should build service");

	let first = service
		.get_or_create("site.title", SettingDefaults::default())
		.await
		.expect("First call should create");
	let second = service
		.get_or_create("site.title", SettingDefaults::default())
		.await
		.expect("Second call should resolve");

	assert_eq!(first.id, second.id);

	// No second row appeared anywhere
	let count = store.count_translations(first.id).await.expect("count");
	assert_eq!(count, 1);
}

#[tokio::test]
async fn test_explicit_defaults_win_over_builtins() {
	let (store, _temp) = create_test_store().await;
	let service = SettingsService::new(store, &config_with_locales(&["en"]))
		.expect("Should build service");

	let setting = service
		.get_or_create(
			"k",
			SettingDefaults { title: Some("X".into()), ..SettingDefaults::default() },
		)
		.await
		.expect("create");

	assert_eq!(&*setting.title, "X", "Explicit title must win over the key fallback");
	assert_eq!(setting.typ, SettingType::String);
	assert_eq!(&*setting.value, "");
	assert!(setting.group_id.is_none());
}

#[tokio::test]
async fn test_fanout_seeds_every_locale() {
	let (store, _temp) = create_test_store().await;
	let service = SettingsService::new(store.clone(), &config_with_locales(&["en", "ru", "kk"]))
		.expect("Should build service");

	let setting = service
		.get_or_create(
			"tagline",
			SettingDefaults { value: Some("hello".into()), ..SettingDefaults::default() },
		)
		.await
		.expect("create");

	let translations = store.list_translations(setting.id).await.expect("list");
	assert_eq!(translations.len(), 3);

	let mut langs: Vec<&str> = translations.iter().map(|t| &*t.lang).collect();
	langs.sort_unstable();
	assert_eq!(langs, vec!["en", "kk", "ru"]);
	assert!(translations.iter().all(|t| &*t.value == "hello"));
}

#[tokio::test]
async fn test_first_access_scenario() {
	let (store, _temp) = create_test_store().await;
	let service = SettingsService::new(store.clone(), &config_with_locales(&["en"]))
		.expect("Should build service");

	let setting = service
		.get_or_create(
			"site.title",
			SettingDefaults { title: Some("My Site".into()), ..SettingDefaults::default() },
		)
		.await
		.expect("create");

	assert_eq!(&*setting.key, "site.title");
	assert_eq!(&*setting.title, "My Site");
	assert_eq!(&*setting.value, "");

	let translations = store.list_translations(setting.id).await.expect("list");
	assert_eq!(translations.len(), 1);
	assert_eq!(&*translations[0].lang, "en");
	assert_eq!(&*translations[0].value, "");
}

#[tokio::test]
async fn test_cached_read_sees_new_value_after_write() {
	let (store, _temp) = create_test_store().await;
	let config = config_with_locales(&["en"]);
	assert!(config.caching);
	let service =
		SettingsService::new(store, &config).expect("Should build service");

	service
		.get_or_create("k", SettingDefaults::default())
		.await
		.expect("provision");
	service.set_value("k", "v2").await.expect("write");

	let read = service.get("k").await.expect("read after write");
	assert_eq!(&*read.value, "v2", "A read after a committed write must never be stale");
}

#[tokio::test]
async fn test_reads_work_with_caching_disabled() {
	let (store, _temp) = create_test_store().await;
	let config = SettingsConfig { caching: false, ..config_with_locales(&["en"]) };
	let service = SettingsService::new(store, &config).expect("Should build service");

	service.get_or_create("k", SettingDefaults::default()).await.expect("provision");
	service.set_value("k", "direct").await.expect("write");

	let read = service.get("k").await.expect("read");
	assert_eq!(&*read.value, "direct");
}

#[tokio::test]
async fn test_missing_locales_are_backfilled_on_read() {
	let (store, _temp) = create_test_store().await;

	// Seeded while only "en" was configured
	{
		let service = SettingsService::new(store.clone(), &config_with_locales(&["en"]))
			.expect("Should build service");
		service.get_or_create("k", SettingDefaults::default()).await.expect("provision");
		service.update_translation("k", "en", "edited").await.expect("edit en row");
	}

	// A later deployment adds two locales; the next read backfills them
	let service = SettingsService::new(store.clone(), &config_with_locales(&["en", "ru", "kk"]))
		.expect("Should build service");
	let setting = service.get("k").await.expect("read");

	let translations = store.list_translations(setting.id).await.expect("list");
	assert_eq!(translations.len(), 3, "Partial coverage must be detected by count, not existence");

	let en = translations.iter().find(|t| &*t.lang == "en").expect("en row");
	assert_eq!(&*en.value, "edited", "Backfill must not overwrite existing rows");
}

#[tokio::test]
async fn test_group_context_applies_unless_overridden() {
	let (store, _temp) = create_test_store().await;
	let service = SettingsService::new(store.clone(), &config_with_locales(&["en"]))
		.expect("Should build service");

	let group = store
		.create_group(&bridge_types::store_adapter::CreateGroup {
			key: "general".into(),
			title: "General".into(),
			description: "".into(),
			icon: "".into(),
		})
		.await
		.expect("create group");

	let in_context = service
		.get_or_create_in("a", Some(group.id), SettingDefaults::default())
		.await
		.expect("provision in context");
	assert_eq!(in_context.group_id, Some(group.id));

	let overridden = service
		.get_or_create_in(
			"b",
			Some(group.id),
			SettingDefaults { group_id: None, ..SettingDefaults::default() },
		)
		.await
		.expect("provision with default group");
	// Explicit None in defaults is "unset": the context still applies
	assert_eq!(overridden.group_id, Some(group.id));
}

#[tokio::test]
async fn test_validation_rejects_bad_params() {
	let (store, _temp) = create_test_store().await;
	let service = SettingsService::new(store, &config_with_locales(&["en"]))
		.expect("Should build service");

	let res = service.get_or_create("", SettingDefaults::default()).await;
	assert!(matches!(res, Err(Error::Validation(_))));

	let res = service
		.get_or_create(
			"bad.json",
			SettingDefaults {
				typ: Some(SettingType::Json),
				value: Some("{not json".into()),
				..SettingDefaults::default()
			},
		)
		.await;
	assert!(matches!(res, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_empty_locale_list_is_a_config_error() {
	let (store, _temp) = create_test_store().await;

	let res = SettingsService::new(store, &config_with_locales(&[]));

	assert!(matches!(res, Err(Error::Config(_))));
}

#[tokio::test]
async fn test_delete_forgets_the_setting() {
	let (store, _temp) = create_test_store().await;
	let service = SettingsService::new(store, &config_with_locales(&["en"]))
		.expect("Should build service");

	service.get_or_create("k", SettingDefaults::default()).await.expect("provision");
	service.delete("k").await.expect("delete");

	let res = service.get("k").await;
	assert!(matches!(res, Err(Error::NotFound)), "Memo and cache must not resurrect deletions");
}

// vim: ts=4
