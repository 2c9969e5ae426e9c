//! Setting translation rows, one per (settings_id, lang)
//!
//! Seeding is a single multi-row insert: either every missing row lands or
//! none do. `INSERT OR IGNORE` keeps already-edited translations intact when
//! the fan-out is re-run as a backfill.

use sqlx::{Row, SqlitePool};

use crate::{map_read_err, map_write_err};
use bridge::prelude::*;
use bridge::store_adapter::SettingTranslation;

/// Insert translation rows in one atomic batch, skipping existing locales
pub(crate) async fn seed(db: &SqlitePool, rows: &[SettingTranslation]) -> BrResult<()> {
	if rows.is_empty() {
		return Ok(());
	}

	let mut query = sqlx::QueryBuilder::new(
		"INSERT OR IGNORE INTO settings_translations (settings_id, lang, value) ",
	);
	query.push_values(rows, |mut b, row| {
		b.push_bind(row.settings_id.0).push_bind(&*row.lang).push_bind(&*row.value);
	});

	query.build().execute(db).await.map_err(map_write_err)?;
	Ok(())
}

/// Number of translation rows a setting has. Compared against the configured
/// locale count to detect partial coverage, not merely existence.
pub(crate) async fn count(db: &SqlitePool, id: SettingId) -> BrResult<u32> {
	sqlx::query_scalar("SELECT COUNT(*) FROM settings_translations WHERE settings_id = ?")
		.bind(id.0)
		.fetch_one(db)
		.await
		.map_err(map_read_err)
}

pub(crate) async fn list(db: &SqlitePool, id: SettingId) -> BrResult<Vec<SettingTranslation>> {
	let rows = sqlx::query(
		"SELECT settings_id, lang, value FROM settings_translations WHERE settings_id = ? ORDER BY lang",
	)
	.bind(id.0)
	.fetch_all(db)
	.await
	.map_err(map_read_err)?;

	let mut translations = Vec::with_capacity(rows.len());
	for row in &rows {
		translations.push(SettingTranslation {
			settings_id: SettingId(row.try_get("settings_id").or(Err(Error::DbError))?),
			lang: row.try_get("lang").or(Err(Error::DbError))?,
			value: row.try_get("value").or(Err(Error::DbError))?,
		});
	}
	Ok(translations)
}

pub(crate) async fn update(db: &SqlitePool, id: SettingId, lang: &str, value: &str) -> BrResult<()> {
	let res = sqlx::query(
		"UPDATE settings_translations SET value = ? WHERE settings_id = ? AND lang = ?",
	)
	.bind(value)
	.bind(id.0)
	.bind(lang)
	.execute(db)
	.await
	.map_err(map_write_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
