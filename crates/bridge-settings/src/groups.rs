//! Group registry: ordered setting categories with manual reordering
//!
//! Positions form a dense 0-based sequence with no ties; the store renumbers
//! atomically on move and delete. The registry offers the move operations
//! directly instead of attaching them to records.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlCache;
use crate::config::SettingsConfig;
use crate::prelude::*;
use bridge_types::store_adapter::{CreateGroup, SettingsGroup, StoreAdapter};

pub struct GroupRegistry {
	store: Arc<dyn StoreAdapter>,
	cache: Option<TtlCache<SettingsGroup>>,
}

impl GroupRegistry {
	pub fn new(store: Arc<dyn StoreAdapter>, config: &SettingsConfig) -> Self {
		let cache = config
			.caching
			.then(|| TtlCache::new(config.cache_size, Duration::from_secs(config.cache_ttl)));
		Self { store, cache }
	}

	/// All groups, ascending by position
	pub async fn list(&self) -> BrResult<Vec<SettingsGroup>> {
		self.store.list_groups().await
	}

	/// Read-through lookup by key
	pub async fn get(&self, key: &str) -> BrResult<SettingsGroup> {
		if let Some(cache) = &self.cache {
			if let Some(group) = cache.get(key) {
				debug!("Group cache hit: {}", key);
				return Ok(group);
			}
		}

		let group = self.store.read_group(key).await?;
		if let Some(cache) = &self.cache {
			cache.put(group.key.clone(), group.clone());
		}
		Ok(group)
	}

	/// Create a group; it lands at the end of the order
	pub async fn create(&self, params: &CreateGroup) -> BrResult<SettingsGroup> {
		validate_group(params)?;

		let group = self.store.create_group(params).await?;
		info!("Created settings group '{}' at position {}", group.key, group.position);

		if let Some(cache) = &self.cache {
			cache.put(group.key.clone(), group.clone());
		}
		Ok(group)
	}

	/// Save title, description, and icon; the cached copy is re-set after
	/// the write commits
	pub async fn update(&self, group: &SettingsGroup) -> BrResult<()> {
		self.store.update_group(group).await?;

		if let Some(cache) = &self.cache {
			cache.put(group.key.clone(), group.clone());
		}
		Ok(())
	}

	/// Move a group to a specific position; groups in between shift by one.
	/// A move renumbers every group in the shifted range, so the whole group
	/// cache is dropped after the write commits.
	pub async fn move_to(&self, id: GroupId, position: u32) -> BrResult<()> {
		self.store.move_group(id, position).await?;

		if let Some(cache) = &self.cache {
			cache.clear();
		}
		Ok(())
	}

	pub async fn move_first(&self, id: GroupId) -> BrResult<()> {
		self.move_to(id, 0).await
	}

	pub async fn move_last(&self, id: GroupId) -> BrResult<()> {
		let count = self.store.list_groups().await?.len() as u32;
		self.move_to(id, count.saturating_sub(1)).await
	}

	/// Move one position towards the start. `Ok(false)` when already first.
	pub async fn move_prev(&self, id: GroupId) -> BrResult<bool> {
		let group = self.store.read_group_by_id(id).await?;
		if group.position == 0 {
			return Ok(false);
		}
		self.move_to(id, group.position - 1).await?;
		Ok(true)
	}

	/// Move one position towards the end. `Ok(false)` when already last.
	pub async fn move_next(&self, id: GroupId) -> BrResult<bool> {
		let group = self.store.read_group_by_id(id).await?;
		let last = (self.store.list_groups().await?.len() as u32).saturating_sub(1);
		if group.position >= last {
			return Ok(false);
		}
		self.move_to(id, group.position + 1).await?;
		Ok(true)
	}

	/// Delete a group. Its settings are reassigned to the uncategorized
	/// group and trailing positions close the gap, so cached copies of the
	/// trailing groups are stale too; the whole group cache is dropped.
	pub async fn delete(&self, id: GroupId) -> BrResult<()> {
		let group = self.store.read_group_by_id(id).await?;
		self.store.delete_group(id).await?;

		if let Some(cache) = &self.cache {
			cache.clear();
		}
		info!("Deleted settings group '{}'", group.key);
		Ok(())
	}

	/// Options for the admin group selector: the uncategorized pseudo-entry
	/// first, then `(id, title)` pairs in position order
	pub async fn dropdown_options(&self) -> BrResult<Vec<(Option<GroupId>, Box<str>)>> {
		let mut options: Vec<(Option<GroupId>, Box<str>)> = vec![(None, "Uncategorized".into())];
		for group in self.store.list_groups().await? {
			options.push((Some(group.id), group.title));
		}
		Ok(options)
	}
}

fn validate_group(params: &CreateGroup) -> BrResult<()> {
	if params.key.is_empty() {
		return Err(Error::Validation("group key must not be empty".into()));
	}
	if params.key.len() > 255 || params.title.len() > 255 || params.icon.len() > 255 {
		return Err(Error::Validation("group key, title, and icon are limited to 255 characters".into()));
	}
	Ok(())
}

// vim: ts=4
