//! Meta tag, meta page, and meta translation operations
//!
//! Translations here are sparse: one row per locale appears only when that
//! locale is first requested, so there is no batch insert path.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::{map_read_err, map_write_err};
use bridge::prelude::*;
use bridge::store_adapter::{CreatePageTranslation, MetaPage, MetaTagTranslation, PageRoute};

fn translation_from_row(row: &SqliteRow) -> BrResult<MetaTagTranslation> {
	Ok(MetaTagTranslation {
		id: row.try_get("id").or(Err(Error::DbError))?,
		meta_tag_id: MetaTagId(row.try_get("meta_tag_id").or(Err(Error::DbError))?),
		lang: row.try_get("lang").or(Err(Error::DbError))?,
		title: row.try_get("title").or(Err(Error::DbError))?,
		description: row.try_get("description").or(Err(Error::DbError))?,
	})
}

/// Joined lookup: the translation row for (route, lang)
pub(crate) async fn read_page_translation(
	db: &SqlitePool,
	route: &PageRoute,
	lang: &str,
) -> BrResult<MetaTagTranslation> {
	let row = sqlx::query(
		"SELECT t.id, t.meta_tag_id, t.lang, t.title, t.description
		FROM meta_tag_translations t
		JOIN meta_pages p ON p.meta_tag_id = t.meta_tag_id
		WHERE p.module = ? AND p.controller = ? AND p.action = ? AND t.lang = ?",
	)
	.bind(&*route.module)
	.bind(&*route.controller)
	.bind(&*route.action)
	.bind(lang)
	.fetch_one(db)
	.await
	.map_err(map_read_err)?;

	translation_from_row(&row)
}

pub(crate) async fn read_page(db: &SqlitePool, route: &PageRoute) -> BrResult<MetaPage> {
	let row = sqlx::query(
		"SELECT id, meta_tag_id, module, controller, action FROM meta_pages
		WHERE module = ? AND controller = ? AND action = ?",
	)
	.bind(&*route.module)
	.bind(&*route.controller)
	.bind(&*route.action)
	.fetch_one(db)
	.await
	.map_err(map_read_err)?;

	Ok(MetaPage {
		id: row.try_get("id").or(Err(Error::DbError))?,
		meta_tag_id: MetaTagId(row.try_get("meta_tag_id").or(Err(Error::DbError))?),
		module: row.try_get("module").or(Err(Error::DbError))?,
		controller: row.try_get("controller").or(Err(Error::DbError))?,
		action: row.try_get("action").or(Err(Error::DbError))?,
	})
}

pub(crate) async fn create_tag(db: &SqlitePool) -> BrResult<MetaTagId> {
	let res = sqlx::query("INSERT INTO meta_tags DEFAULT VALUES")
		.execute(db)
		.await
		.map_err(map_write_err)?;

	Ok(MetaTagId(res.last_insert_rowid()))
}

pub(crate) async fn create_page(
	db: &SqlitePool,
	tag_id: MetaTagId,
	route: &PageRoute,
) -> BrResult<MetaPage> {
	let res = sqlx::query(
		"INSERT INTO meta_pages (meta_tag_id, module, controller, action) VALUES (?, ?, ?, ?)",
	)
	.bind(tag_id.0)
	.bind(&*route.module)
	.bind(&*route.controller)
	.bind(&*route.action)
	.execute(db)
	.await
	.map_err(map_write_err)?;

	Ok(MetaPage {
		id: res.last_insert_rowid(),
		meta_tag_id: tag_id,
		module: route.module.clone(),
		controller: route.controller.clone(),
		action: route.action.clone(),
	})
}

pub(crate) async fn create_translation(
	db: &SqlitePool,
	translation: &CreatePageTranslation,
) -> BrResult<MetaTagTranslation> {
	let res = sqlx::query(
		"INSERT INTO meta_tag_translations (meta_tag_id, lang, title, description) VALUES (?, ?, ?, ?)",
	)
	.bind(translation.meta_tag_id.0)
	.bind(&*translation.lang)
	.bind(&*translation.title)
	.bind(&*translation.description)
	.execute(db)
	.await
	.map_err(map_write_err)?;

	Ok(MetaTagTranslation {
		id: res.last_insert_rowid(),
		meta_tag_id: translation.meta_tag_id,
		lang: translation.lang.clone(),
		title: translation.title.clone(),
		description: translation.description.clone(),
	})
}

// vim: ts=4
