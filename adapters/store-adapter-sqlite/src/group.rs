//! Settings group table operations
//!
//! Positions are dense 0-based ordering hints. Every operation that changes
//! them (move, delete) runs inside one transaction so a failure mid-renumber
//! leaves the sequence untouched.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::{map_read_err, map_write_err};
use bridge::prelude::*;
use bridge::store_adapter::{CreateGroup, SettingsGroup};

fn from_row(row: &SqliteRow) -> BrResult<SettingsGroup> {
	Ok(SettingsGroup {
		id: GroupId(row.try_get("id").or(Err(Error::DbError))?),
		key: row.try_get("key").or(Err(Error::DbError))?,
		title: row.try_get("title").or(Err(Error::DbError))?,
		description: row.try_get("description").or(Err(Error::DbError))?,
		icon: row.try_get("icon").or(Err(Error::DbError))?,
		position: row.try_get("position").or(Err(Error::DbError))?,
	})
}

/// List all groups ascending by position
pub(crate) async fn list(db: &SqlitePool) -> BrResult<Vec<SettingsGroup>> {
	let rows = sqlx::query(
		"SELECT id, key, title, description, icon, position FROM settings_groups ORDER BY position",
	)
	.fetch_all(db)
	.await
	.map_err(map_read_err)?;

	rows.iter().map(from_row).collect()
}

/// Read a single group by its unique key
pub(crate) async fn read(db: &SqlitePool, key: &str) -> BrResult<SettingsGroup> {
	let row = sqlx::query(
		"SELECT id, key, title, description, icon, position FROM settings_groups WHERE key = ?",
	)
	.bind(key)
	.fetch_one(db)
	.await
	.map_err(map_read_err)?;

	from_row(&row)
}

pub(crate) async fn read_by_id(db: &SqlitePool, id: GroupId) -> BrResult<SettingsGroup> {
	let row = sqlx::query(
		"SELECT id, key, title, description, icon, position FROM settings_groups WHERE id = ?",
	)
	.bind(id.0)
	.fetch_one(db)
	.await
	.map_err(map_read_err)?;

	from_row(&row)
}

/// Create a new group at the end of the order
pub(crate) async fn create(db: &SqlitePool, create: &CreateGroup) -> BrResult<SettingsGroup> {
	let res = sqlx::query(
		"INSERT INTO settings_groups (key, title, description, icon, position)
		VALUES (?, ?, ?, ?, (SELECT COALESCE(MAX(position) + 1, 0) FROM settings_groups))",
	)
	.bind(&*create.key)
	.bind(&*create.title)
	.bind(&*create.description)
	.bind(&*create.icon)
	.execute(db)
	.await
	.map_err(map_write_err)?;

	read_by_id(db, GroupId(res.last_insert_rowid())).await
}

/// Save title, description, and icon of an existing group
pub(crate) async fn update(db: &SqlitePool, model: &SettingsGroup) -> BrResult<()> {
	let res = sqlx::query(
		"UPDATE settings_groups SET title = ?, description = ?, icon = ? WHERE id = ?",
	)
	.bind(&*model.title)
	.bind(&*model.description)
	.bind(&*model.icon)
	.bind(model.id.0)
	.execute(db)
	.await
	.map_err(map_write_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

/// Move a group to `position`, shifting everything in between by one.
/// The target position is clamped to the end of the list.
pub(crate) async fn move_to(db: &SqlitePool, id: GroupId, position: u32) -> BrResult<()> {
	let mut tx = db.begin().await.map_err(map_write_err)?;

	let old: u32 = sqlx::query_scalar("SELECT position FROM settings_groups WHERE id = ?")
		.bind(id.0)
		.fetch_one(&mut *tx)
		.await
		.map_err(map_read_err)?;

	let count: u32 = sqlx::query_scalar("SELECT COUNT(*) FROM settings_groups")
		.fetch_one(&mut *tx)
		.await
		.map_err(map_read_err)?;
	let new = position.min(count.saturating_sub(1));

	if new == old {
		return Ok(());
	}

	if new < old {
		sqlx::query(
			"UPDATE settings_groups SET position = position + 1 WHERE position >= ? AND position < ?",
		)
		.bind(new)
		.bind(old)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;
	} else {
		sqlx::query(
			"UPDATE settings_groups SET position = position - 1 WHERE position > ? AND position <= ?",
		)
		.bind(old)
		.bind(new)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;
	}

	sqlx::query("UPDATE settings_groups SET position = ? WHERE id = ?")
		.bind(new)
		.bind(id.0)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;

	tx.commit().await.map_err(map_write_err)?;
	Ok(())
}

/// Delete a group: its settings move to the uncategorized group and trailing
/// groups shift down to close the position gap
pub(crate) async fn delete(db: &SqlitePool, id: GroupId) -> BrResult<()> {
	let mut tx = db.begin().await.map_err(map_write_err)?;

	let old: u32 = sqlx::query_scalar("SELECT position FROM settings_groups WHERE id = ?")
		.bind(id.0)
		.fetch_one(&mut *tx)
		.await
		.map_err(map_read_err)?;

	sqlx::query("UPDATE settings SET group_id = NULL WHERE group_id = ?")
		.bind(id.0)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;

	sqlx::query("DELETE FROM settings_groups WHERE id = ?")
		.bind(id.0)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;

	sqlx::query("UPDATE settings_groups SET position = position - 1 WHERE position > ?")
		.bind(old)
		.execute(&mut *tx)
		.await
		.map_err(map_write_err)?;

	tx.commit().await.map_err(map_write_err)?;
	Ok(())
}

// vim: ts=4
