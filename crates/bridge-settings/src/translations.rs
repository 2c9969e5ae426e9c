//! Translation fan-out
//!
//! Every setting gets one value-copy per configured locale, seeded as one
//! atomic batch right after creation. A failed batch is recoverable: the
//! setting stays usable, flagged untranslated, and a later read re-runs the
//! seed as a backfill.

use crate::prelude::*;
use bridge_types::store_adapter::{Setting, SettingTranslation, StoreAdapter};

/// Insert one translation row per locale, each carrying the setting's
/// current value. Existing `(settings_id, lang)` rows are left untouched,
/// so re-running after a partial failure only fills the holes.
pub async fn seed(
	store: &dyn StoreAdapter,
	locales: &[Box<str>],
	setting: &Setting,
) -> BrResult<()> {
	let rows: Vec<SettingTranslation> = locales
		.iter()
		.map(|lang| SettingTranslation {
			settings_id: setting.id,
			lang: lang.clone(),
			value: setting.value.clone(),
		})
		.collect();

	store.seed_translations(&rows).await
}

/// Whether the setting has one translation row per configured locale.
/// Compares the row count against the locale count, so partial coverage
/// (say 2 of 3 locales) is detected and backfilled rather than treated as
/// complete.
pub async fn is_fully_translated(
	store: &dyn StoreAdapter,
	locales: &[Box<str>],
	id: SettingId,
) -> BrResult<bool> {
	let count = store.count_translations(id).await?;
	Ok(count as usize >= locales.len())
}

// vim: ts=4
