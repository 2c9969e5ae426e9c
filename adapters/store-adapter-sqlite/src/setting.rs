//! Settings table operations
//!
//! Lookup is by unique key or by group id, nothing else. Duplicate keys on
//! insert surface as `Error::Duplicate` for the provisioning retry path.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::{map_read_err, map_write_err};
use bridge::prelude::*;
use bridge::store_adapter::{CreateSetting, Setting, SettingType};

fn from_row(row: &SqliteRow) -> BrResult<Setting> {
	let typ: &str = row.try_get("type").or(Err(Error::DbError))?;
	Ok(Setting {
		id: SettingId(row.try_get("id").or(Err(Error::DbError))?),
		key: row.try_get("key").or(Err(Error::DbError))?,
		title: row.try_get("title").or(Err(Error::DbError))?,
		typ: SettingType::parse(typ).ok_or(Error::DbError)?,
		value: row.try_get("value").or(Err(Error::DbError))?,
		group_id: row
			.try_get::<Option<i64>, _>("group_id")
			.or(Err(Error::DbError))?
			.map(GroupId),
	})
}

/// Read a single setting by its unique key
pub(crate) async fn read(db: &SqlitePool, key: &str) -> BrResult<Setting> {
	let row = sqlx::query("SELECT id, key, title, type, value, group_id FROM settings WHERE key = ?")
		.bind(key)
		.fetch_one(db)
		.await
		.map_err(map_read_err)?;

	from_row(&row)
}

/// Create a new setting
pub(crate) async fn create(db: &SqlitePool, create: &CreateSetting) -> BrResult<Setting> {
	let res = sqlx::query(
		"INSERT INTO settings (key, title, type, value, group_id) VALUES (?, ?, ?, ?, ?)",
	)
	.bind(&*create.key)
	.bind(&*create.title)
	.bind(create.typ.as_str())
	.bind(&*create.value)
	.bind(create.group_id.map(|g| g.0))
	.execute(db)
	.await
	.map_err(map_write_err)?;

	Ok(Setting {
		id: SettingId(res.last_insert_rowid()),
		key: create.key.clone(),
		title: create.title.clone(),
		typ: create.typ,
		value: create.value.clone(),
		group_id: create.group_id,
	})
}

/// Save title, type, value, and group of an existing setting
pub(crate) async fn update(db: &SqlitePool, model: &Setting) -> BrResult<()> {
	let res = sqlx::query("UPDATE settings SET title = ?, type = ?, value = ?, group_id = ? WHERE id = ?")
		.bind(&*model.title)
		.bind(model.typ.as_str())
		.bind(&*model.value)
		.bind(model.group_id.map(|g| g.0))
		.bind(model.id.0)
		.execute(db)
		.await
		.map_err(map_write_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

/// Update only the raw value, returning the updated record
pub(crate) async fn update_value(db: &SqlitePool, key: &str, value: &str) -> BrResult<Setting> {
	let res = sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
		.bind(value)
		.bind(key)
		.execute(db)
		.await
		.map_err(map_write_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	read(db, key).await
}

/// List settings of one group (`None` = uncategorized)
pub(crate) async fn list(db: &SqlitePool, group_id: Option<GroupId>) -> BrResult<Vec<Setting>> {
	let rows = if let Some(group_id) = group_id {
		sqlx::query(
			"SELECT id, key, title, type, value, group_id FROM settings WHERE group_id = ? ORDER BY key",
		)
		.bind(group_id.0)
		.fetch_all(db)
		.await
		.map_err(map_read_err)?
	} else {
		sqlx::query(
			"SELECT id, key, title, type, value, group_id FROM settings WHERE group_id IS NULL ORDER BY key",
		)
		.fetch_all(db)
		.await
		.map_err(map_read_err)?
	};

	rows.iter().map(from_row).collect()
}

/// Delete a setting together with its translation rows
pub(crate) async fn delete(db: &SqlitePool, id: SettingId) -> BrResult<()> {
	let mut tx = db.begin().await.map_err(map_write_err)?;

	sqlx::query("DELETE FROM settings_translations WHERE settings_id = ?")
		.bind(id.0)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;

	let res = sqlx::query("DELETE FROM settings WHERE id = ?")
		.bind(id.0)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	tx.commit().await.map_err(map_write_err)?;
	Ok(())
}

// vim: ts=4
