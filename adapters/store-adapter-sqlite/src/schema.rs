//! Database schema initialization
//!
//! Creates tables and indexes inside one transaction so a half-bootstrapped
//! database is never left behind.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings_groups (
		id integer PRIMARY KEY AUTOINCREMENT,
		key text NOT NULL UNIQUE,
		title text NOT NULL DEFAULT '',
		description text NOT NULL DEFAULT '',
		icon text NOT NULL DEFAULT '',
		position integer NOT NULL
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		id integer PRIMARY KEY AUTOINCREMENT,
		key text NOT NULL UNIQUE,
		title text NOT NULL DEFAULT '',
		type text NOT NULL DEFAULT 'string',
		value text NOT NULL DEFAULT '',
		group_id integer
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_settings_group ON settings(group_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings_translations (
		settings_id integer NOT NULL,
		lang text NOT NULL,
		value text NOT NULL DEFAULT '',
		PRIMARY KEY(settings_id, lang)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Meta pages
	//************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS meta_tags (
		id integer PRIMARY KEY AUTOINCREMENT
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS meta_pages (
		id integer PRIMARY KEY AUTOINCREMENT,
		meta_tag_id integer NOT NULL,
		module text NOT NULL,
		controller text NOT NULL,
		action text NOT NULL,
		UNIQUE(module, controller, action)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS meta_tag_translations (
		id integer PRIMARY KEY AUTOINCREMENT,
		meta_tag_id integer NOT NULL,
		lang text NOT NULL,
		title text NOT NULL DEFAULT '',
		description text NOT NULL DEFAULT '',
		UNIQUE(meta_tag_id, lang)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_meta_tag_translations_tag ON meta_tag_translations(meta_tag_id)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
