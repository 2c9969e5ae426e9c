//! Settings service: the provisioning resolver
//!
//! Resolution order for a read: process-local memo, then the read-through
//! cache (when enabled), then the store. `get_or_create` adds the create
//! branch on `NotFound`, with caller defaults merged over the built-ins.
//!
//! The memo lives for the lifetime of the service (normally the process),
//! not a single request. It offers no cross-process protection: two
//! processes can still race the create, which is why `Duplicate` from the
//! store is resolved by retrying the lookup once.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlCache;
use crate::config::SettingsConfig;
use crate::prelude::*;
use crate::translations;
use bridge_types::store_adapter::{
	CreateSetting, Setting, SettingDefaults, SettingTranslation, SettingType, StoreAdapter,
};

pub struct SettingsService {
	store: Arc<dyn StoreAdapter>,
	cache: Option<TtlCache<Setting>>,
	memo: parking_lot::RwLock<HashMap<Box<str>, Setting>>,
	locales: Vec<Box<str>>,
}

impl SettingsService {
	pub fn new(store: Arc<dyn StoreAdapter>, config: &SettingsConfig) -> BrResult<Self> {
		config.validate()?;

		let cache = config
			.caching
			.then(|| TtlCache::new(config.cache_size, Duration::from_secs(config.cache_ttl)));

		Ok(Self {
			store,
			cache,
			memo: parking_lot::RwLock::new(HashMap::new()),
			locales: config.locales.clone(),
		})
	}

	/// Look up a setting by key. `Error::NotFound` when it does not exist;
	/// use [`get_or_create`](Self::get_or_create) to provision it instead.
	pub async fn get(&self, key: &str) -> BrResult<Setting> {
		if let Some(setting) = self.memo.read().get(key) {
			return Ok(setting.clone());
		}

		let setting = self.lookup(key).await?;
		self.remember(setting.clone());

		// Lazy backfill: earlier seed failures or newly added locales
		self.ensure_translated(&setting).await;

		Ok(setting)
	}

	/// Look up a setting by key; create it from `defaults` when absent.
	/// Explicit defaults win over the built-ins
	/// `{title: key, type: string, value: "", group: None}`.
	pub async fn get_or_create(&self, key: &str, defaults: SettingDefaults) -> BrResult<Setting> {
		self.get_or_create_in(key, None, defaults).await
	}

	/// Same as [`get_or_create`](Self::get_or_create), with a group context
	/// used when the defaults name no group themselves.
	pub async fn get_or_create_in(
		&self,
		key: &str,
		group: Option<GroupId>,
		defaults: SettingDefaults,
	) -> BrResult<Setting> {
		match self.get(key).await {
			Ok(setting) => Ok(setting),
			Err(Error::NotFound) => {
				let params = CreateSetting {
					key: key.into(),
					title: defaults.title.unwrap_or_else(|| key.into()),
					typ: defaults.typ.unwrap_or(SettingType::String),
					value: defaults.value.unwrap_or_default(),
					group_id: defaults.group_id.or(group),
				};

				match self.create(params).await {
					Ok(setting) => Ok(setting),
					// Lost the race against another process; the row exists
					// now, so return the winner's version.
					Err(Error::Duplicate) => {
						debug!("Lost provisioning race for setting '{}', retrying lookup", key);
						let setting = self.lookup(key).await?;
						self.remember(setting.clone());
						Ok(setting)
					}
					Err(err) => Err(err),
				}
			}
			Err(err) => Err(err),
		}
	}

	/// Create a setting and seed its translations. Fan-out failure is
	/// logged, not fatal; the setting is backfilled on a later read.
	pub async fn create(&self, params: CreateSetting) -> BrResult<Setting> {
		validate_setting(&params)?;

		let setting = self.store.create_setting(&params).await?;
		info!("Created setting '{}'", setting.key);

		if let Err(err) = translations::seed(&*self.store, &self.locales, &setting).await {
			warn!("Failed to seed translations for setting '{}': {}", setting.key, err);
		}

		self.remember(setting.clone());
		if let Some(cache) = &self.cache {
			cache.put(setting.key.clone(), setting.clone());
		}
		Ok(setting)
	}

	/// Update only the raw value. The cache entry is re-set after the store
	/// write commits, so readers never observe the old value afterwards.
	pub async fn set_value(&self, key: &str, value: &str) -> BrResult<Setting> {
		let setting = self.store.update_setting_value(key, value).await?;

		if let Some(cache) = &self.cache {
			cache.put(setting.key.clone(), setting.clone());
		}
		self.remember(setting.clone());

		Ok(setting)
	}

	/// Save title, type, value, and group of an existing setting
	pub async fn save(&self, setting: &Setting) -> BrResult<()> {
		self.store.update_setting(setting).await?;

		if let Some(cache) = &self.cache {
			cache.put(setting.key.clone(), setting.clone());
		}
		self.remember(setting.clone());
		Ok(())
	}

	/// Delete a setting together with its translations
	pub async fn delete(&self, key: &str) -> BrResult<()> {
		let setting = self.store.read_setting(key).await?;
		self.store.delete_setting(setting.id).await?;

		if let Some(cache) = &self.cache {
			cache.invalidate(key);
		}
		self.memo.write().remove(key);
		Ok(())
	}

	/// Settings of one group (`None` = uncategorized)
	pub async fn list(&self, group: Option<GroupId>) -> BrResult<Vec<Setting>> {
		self.store.list_settings(group).await
	}

	/// Translation rows of a setting, for localization editors
	pub async fn translations(&self, key: &str) -> BrResult<Vec<SettingTranslation>> {
		let setting = self.get(key).await?;
		self.store.list_translations(setting.id).await
	}

	/// Update one locale's translation value
	pub async fn update_translation(&self, key: &str, lang: &str, value: &str) -> BrResult<()> {
		let setting = self.get(key).await?;
		self.store.update_translation(setting.id, lang, value).await
	}

	/// Cache/store resolution, bypassing the memo
	async fn lookup(&self, key: &str) -> BrResult<Setting> {
		let Some(cache) = &self.cache else {
			return self.store.read_setting(key).await;
		};

		if let Some(setting) = cache.get(key) {
			debug!("Setting cache hit: {}", key);
			return Ok(setting);
		}

		let setting = self.store.read_setting(key).await?;
		cache.put(setting.key.clone(), setting.clone());
		Ok(setting)
	}

	fn remember(&self, setting: Setting) {
		self.memo.write().insert(setting.key.clone(), setting);
	}

	/// Best-effort backfill of missing translation rows
	async fn ensure_translated(&self, setting: &Setting) {
		match translations::is_fully_translated(&*self.store, &self.locales, setting.id).await {
			Ok(true) => {}
			Ok(false) => {
				if let Err(err) = translations::seed(&*self.store, &self.locales, setting).await {
					warn!(
						"Failed to backfill translations for setting '{}': {}",
						setting.key, err
					);
				}
			}
			Err(err) => {
				warn!("Translation check failed for setting '{}': {}", setting.key, err);
			}
		}
	}
}

fn validate_setting(params: &CreateSetting) -> BrResult<()> {
	if params.key.is_empty() {
		return Err(Error::Validation("setting key must not be empty".into()));
	}
	if params.key.len() > 255 || params.title.len() > 255 {
		return Err(Error::Validation("setting key and title are limited to 255 characters".into()));
	}
	if params.typ == SettingType::Json
		&& !params.value.is_empty()
		&& serde_json::from_str::<serde_json::Value>(&params.value).is_err()
	{
		return Err(Error::Validation(format!(
			"value of json setting '{}' is not valid JSON",
			params.key
		)));
	}
	Ok(())
}

// vim: ts=4
