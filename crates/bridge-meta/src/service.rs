//! Meta tag resolver
//!
//! `get_or_create` guarantees a translation row exists for (route, locale).
//! The not-found branch is two-level: the tag row is created first, then the
//! page row referencing it, then the single current-locale translation.
//! Other locales get their rows on their own first access; this sparse
//! policy is intentional and differs from the settings fan-out.

use std::sync::Arc;

use crate::config::MetaConfig;
use crate::prelude::*;
use bridge_types::store_adapter::{
	CreatePageTranslation, MetaDefaults, MetaTagTranslation, PageRoute, StoreAdapter,
};

pub struct MetaService {
	store: Arc<dyn StoreAdapter>,
	config: MetaConfig,
}

impl MetaService {
	pub fn new(store: Arc<dyn StoreAdapter>, config: MetaConfig) -> Self {
		Self { store, config }
	}

	/// Resolve the meta translation for (route, lang), creating whatever is
	/// missing along the way: the translation row alone when the page
	/// already exists, or tag + page + translation when it does not.
	pub async fn get_or_create(
		&self,
		route: &PageRoute,
		lang: &str,
		defaults: &MetaDefaults,
	) -> BrResult<MetaTagTranslation> {
		match self.store.read_page_translation(route, lang).await {
			Ok(translation) => Ok(translation),
			Err(Error::NotFound) => self.create(route, lang, defaults).await,
			Err(err) => Err(err),
		}
	}

	async fn create(
		&self,
		route: &PageRoute,
		lang: &str,
		defaults: &MetaDefaults,
	) -> BrResult<MetaTagTranslation> {
		let tag_id = match self.store.read_meta_page(route).await {
			// Page exists; only this locale's row is missing
			Ok(page) => page.meta_tag_id,
			Err(Error::NotFound) => {
				let tag_id = self.store.create_meta_tag().await?;
				match self.store.create_meta_page(tag_id, route).await {
					Ok(_) => {
						info!("Created meta page for route {}", route);
						tag_id
					}
					// Lost the race for the page row; use the winner's tag
					Err(Error::Duplicate) => self.store.read_meta_page(route).await?.meta_tag_id,
					Err(err) => return Err(err),
				}
			}
			Err(err) => return Err(err),
		};

		let locale_defaults = defaults.get(lang);
		let title = locale_defaults
			.and_then(|d| d.title.clone())
			.unwrap_or_else(|| self.config.site_name.clone());
		let description = locale_defaults
			.and_then(|d| d.description.clone())
			.unwrap_or_else(|| self.config.site_name.clone());

		match self
			.store
			.create_page_translation(&CreatePageTranslation {
				meta_tag_id: tag_id,
				lang: lang.into(),
				title,
				description,
			})
			.await
		{
			Ok(translation) => Ok(translation),
			// Same race, one level down: another caller inserted this
			// locale's row first
			Err(Error::Duplicate) => self.store.read_page_translation(route, lang).await,
			Err(err) => Err(err),
		}
	}
}

// vim: ts=4
