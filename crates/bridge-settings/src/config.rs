//! Settings subsystem configuration
//!
//! Passed explicitly into the services; nothing here is read from globals.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Default TTL of cached settings: one day
pub const DEFAULT_CACHE_TTL: u64 = 86400;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
	/// Feature gate for the read-through cache. When false every read goes
	/// straight to the store with zero caching side effects.
	pub caching: bool,
	/// TTL of cached entries, in seconds
	#[serde(rename = "cacheTtl")]
	pub cache_ttl: u64,
	/// Capacity of the LRU cache
	#[serde(rename = "cacheSize")]
	pub cache_size: usize,
	/// Locale codes the translation fan-out seeds, e.g. ["en", "ru", "kk"]
	pub locales: Vec<Box<str>>,
}

impl Default for SettingsConfig {
	fn default() -> Self {
		Self {
			caching: true,
			cache_ttl: DEFAULT_CACHE_TTL,
			cache_size: 256,
			locales: vec!["en".into()],
		}
	}
}

impl SettingsConfig {
	pub fn validate(&self) -> BrResult<()> {
		if self.locales.is_empty() {
			return Err(Error::Config("at least one locale must be configured".into()));
		}
		Ok(())
	}
}

// vim: ts=4
