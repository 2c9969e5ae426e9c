//! Group registry tests
//!
//! Relative move operations, dropdown assembly, and read-through caching of
//! group records.

use std::sync::Arc;

use bridge_settings::{GroupRegistry, SettingsConfig};
use bridge_store_adapter_sqlite::StoreAdapterSqlite;
use bridge_types::error::Error;
use bridge_types::store_adapter::CreateGroup;
use bridge_types::types::GroupId;
use tempfile::TempDir;

async fn create_test_registry() -> (GroupRegistry, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("store.db"))
		.await
		.expect("Failed to create adapter");

	(GroupRegistry::new(Arc::new(adapter), &SettingsConfig::default()), temp_dir)
}

fn group_params(key: &str, title: &str) -> CreateGroup {
	CreateGroup { key: key.into(), title: title.into(), description: "".into(), icon: "".into() }
}

async fn seed_three(registry: &GroupRegistry) -> Vec<GroupId> {
	let mut ids = Vec::new();
	for (key, title) in [("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")] {
		let group = registry.create(&group_params(key, title)).await.expect("create group");
		ids.push(group.id);
	}
	ids
}

async fn keys_in_order(registry: &GroupRegistry) -> Vec<String> {
	registry.list().await.expect("list").into_iter().map(|g| g.key.into()).collect()
}

#[tokio::test]
async fn test_move_first_and_last() {
	let (registry, _temp) = create_test_registry().await;
	let ids = seed_three(&registry).await;

	registry.move_first(ids[2]).await.expect("move c first");
	assert_eq!(keys_in_order(&registry).await, vec!["c", "a", "b"]);

	registry.move_last(ids[2]).await.expect("move c last");
	assert_eq!(keys_in_order(&registry).await, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_move_prev_and_next_report_edges() {
	let (registry, _temp) = create_test_registry().await;
	let ids = seed_three(&registry).await;

	assert!(!registry.move_prev(ids[0]).await.expect("prev on first"));
	assert!(!registry.move_next(ids[2]).await.expect("next on last"));

	assert!(registry.move_next(ids[0]).await.expect("next on first"));
	assert_eq!(keys_in_order(&registry).await, vec!["b", "a", "c"]);

	assert!(registry.move_prev(ids[2]).await.expect("prev on last"));
	assert_eq!(keys_in_order(&registry).await, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn test_dropdown_starts_with_uncategorized() {
	let (registry, _temp) = create_test_registry().await;
	seed_three(&registry).await;

	let options = registry.dropdown_options().await.expect("dropdown");

	assert_eq!(options.len(), 4);
	assert!(options[0].0.is_none());
	let titles: Vec<&str> = options.iter().skip(1).map(|(_, t)| &**t).collect();
	assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn test_get_after_update_sees_the_new_title() {
	let (registry, _temp) = create_test_registry().await;
	seed_three(&registry).await;

	// Populate the read-through cache, then update behind it
	let mut group = registry.get("b").await.expect("get b");
	group.title = "Renamed".into();
	registry.update(&group).await.expect("update");

	let read = registry.get("b").await.expect("get after update");
	assert_eq!(&*read.title, "Renamed");
}

#[tokio::test]
async fn test_delete_removes_the_group() {
	let (registry, _temp) = create_test_registry().await;
	let ids = seed_three(&registry).await;

	registry.delete(ids[1]).await.expect("delete b");

	assert_eq!(keys_in_order(&registry).await, vec!["a", "c"]);
	assert!(matches!(registry.get("b").await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_get_after_move_sees_the_new_position() {
	let (registry, _temp) = create_test_registry().await;
	let ids = seed_three(&registry).await;

	// Populate the read-through cache, then shift a's position behind it
	assert_eq!(registry.get("a").await.expect("get a").position, 0);
	registry.move_first(ids[2]).await.expect("move c first");

	assert_eq!(registry.get("a").await.expect("get after move").position, 1);
	assert_eq!(registry.get("c").await.expect("get c").position, 0);
}

#[tokio::test]
async fn test_get_after_delete_sees_closed_gap() {
	let (registry, _temp) = create_test_registry().await;
	let ids = seed_three(&registry).await;

	// Cache c at position 2, then delete b so c shifts down
	assert_eq!(registry.get("c").await.expect("get c").position, 2);
	registry.delete(ids[1]).await.expect("delete b");

	assert_eq!(registry.get("c").await.expect("get after delete").position, 1);
}

#[tokio::test]
async fn test_create_validates_key() {
	let (registry, _temp) = create_test_registry().await;

	let res = registry.create(&group_params("", "Empty")).await;

	assert!(matches!(res, Err(Error::Validation(_))));
}

// vim: ts=4
