//! SQLite-backed store adapter for Bridge.
//!
//! Implements [`StoreAdapter`] over a `sqlx` SQLite pool. Each table has its
//! own module with plain `pub(crate) async fn` operations; the trait impl
//! here only dispatches.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use bridge::prelude::*;
use bridge::store_adapter::{
	CreateGroup, CreatePageTranslation, CreateSetting, MetaPage, MetaTagTranslation, PageRoute,
	Setting, SettingTranslation, SettingsGroup, StoreAdapter,
};

mod group;
mod meta;
mod schema;
mod setting;
mod translation;

// Helper functions
//******************

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Read errors: a missing row surfaces as `NotFound`, everything else as `DbError`.
pub(crate) fn map_read_err(err: sqlx::Error) -> Error {
	match err {
		sqlx::Error::RowNotFound => Error::NotFound,
		err => {
			inspect(&err);
			Error::DbError
		}
	}
}

/// Write errors: a unique-constraint violation surfaces as `Duplicate` so the
/// provisioning resolver can retry the lookup instead of failing.
pub(crate) fn map_write_err(err: sqlx::Error) -> Error {
	if err.as_database_error().is_some_and(|db| db.is_unique_violation()) {
		Error::Duplicate
	} else {
		inspect(&err);
		Error::DbError
	}
}

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	/// Opens (creating if missing) the database file and bootstraps the schema.
	pub async fn new(path: impl AsRef<Path>) -> BrResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.or(Err(Error::DbError))?;

		schema::init_db(&db).await.inspect_err(inspect).or(Err(Error::DbError))?;

		Ok(Self { db })
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.db
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterSqlite {
	// Settings
	//**********
	async fn read_setting(&self, key: &str) -> BrResult<Setting> {
		setting::read(&self.db, key).await
	}

	async fn create_setting(&self, create: &CreateSetting) -> BrResult<Setting> {
		setting::create(&self.db, create).await
	}

	async fn update_setting(&self, model: &Setting) -> BrResult<()> {
		setting::update(&self.db, model).await
	}

	async fn update_setting_value(&self, key: &str, value: &str) -> BrResult<Setting> {
		setting::update_value(&self.db, key, value).await
	}

	async fn list_settings(&self, group_id: Option<GroupId>) -> BrResult<Vec<Setting>> {
		setting::list(&self.db, group_id).await
	}

	async fn delete_setting(&self, id: SettingId) -> BrResult<()> {
		setting::delete(&self.db, id).await
	}

	// Groups
	//********
	async fn list_groups(&self) -> BrResult<Vec<SettingsGroup>> {
		group::list(&self.db).await
	}

	async fn read_group(&self, key: &str) -> BrResult<SettingsGroup> {
		group::read(&self.db, key).await
	}

	async fn read_group_by_id(&self, id: GroupId) -> BrResult<SettingsGroup> {
		group::read_by_id(&self.db, id).await
	}

	async fn create_group(&self, create: &CreateGroup) -> BrResult<SettingsGroup> {
		group::create(&self.db, create).await
	}

	async fn update_group(&self, model: &SettingsGroup) -> BrResult<()> {
		group::update(&self.db, model).await
	}

	async fn move_group(&self, id: GroupId, position: u32) -> BrResult<()> {
		group::move_to(&self.db, id, position).await
	}

	async fn delete_group(&self, id: GroupId) -> BrResult<()> {
		group::delete(&self.db, id).await
	}

	// Translations
	//**************
	async fn seed_translations(&self, rows: &[SettingTranslation]) -> BrResult<()> {
		translation::seed(&self.db, rows).await
	}

	async fn count_translations(&self, id: SettingId) -> BrResult<u32> {
		translation::count(&self.db, id).await
	}

	async fn list_translations(&self, id: SettingId) -> BrResult<Vec<SettingTranslation>> {
		translation::list(&self.db, id).await
	}

	async fn update_translation(&self, id: SettingId, lang: &str, value: &str) -> BrResult<()> {
		translation::update(&self.db, id, lang, value).await
	}

	// Meta pages
	//************
	async fn read_page_translation(
		&self,
		route: &PageRoute,
		lang: &str,
	) -> BrResult<MetaTagTranslation> {
		meta::read_page_translation(&self.db, route, lang).await
	}

	async fn read_meta_page(&self, route: &PageRoute) -> BrResult<MetaPage> {
		meta::read_page(&self.db, route).await
	}

	async fn create_meta_tag(&self) -> BrResult<MetaTagId> {
		meta::create_tag(&self.db).await
	}

	async fn create_meta_page(&self, tag_id: MetaTagId, route: &PageRoute) -> BrResult<MetaPage> {
		meta::create_page(&self.db, tag_id, route).await
	}

	async fn create_page_translation(
		&self,
		translation: &CreatePageTranslation,
	) -> BrResult<MetaTagTranslation> {
		meta::create_translation(&self.db, translation).await
	}
}

// vim: ts=4
