//! Adapter that persists settings, setting groups, translations, and
//! per-route page metadata.
//!
//! Services never touch a database handle directly; they receive an
//! `Arc<dyn StoreAdapter>` and go through this trait. The two supported
//! access paths are lookup by unique string key and listing by group id,
//! which is all the subsystem needs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Value type of a setting, stored alongside the raw string value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingType {
	#[default]
	#[serde(rename = "string")]
	String,
	#[serde(rename = "text")]
	Text,
	#[serde(rename = "int")]
	Int,
	#[serde(rename = "bool")]
	Bool,
	#[serde(rename = "json")]
	Json,
}

impl SettingType {
	pub fn as_str(&self) -> &'static str {
		match self {
			SettingType::String => "string",
			SettingType::Text => "text",
			SettingType::Int => "int",
			SettingType::Bool => "bool",
			SettingType::Json => "json",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"string" => Some(SettingType::String),
			"text" => Some(SettingType::Text),
			"int" => Some(SettingType::Int),
			"bool" => Some(SettingType::Bool),
			"json" => Some(SettingType::Json),
			_ => None,
		}
	}
}

/// A single named configuration value with a type and an owning group
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Setting {
	pub id: SettingId,
	pub key: Box<str>,
	pub title: Box<str>,
	#[serde(rename = "type")]
	pub typ: SettingType,
	pub value: Box<str>,
	#[serde(rename = "groupId")]
	pub group_id: Option<GroupId>,
}

impl Setting {
	/// Interpret the raw value as a boolean ("1"/"true"/"on")
	pub fn bool_value(&self) -> bool {
		matches!(&*self.value, "1" | "true" | "on")
	}

	pub fn int_value(&self) -> Option<i64> {
		self.value.parse().ok()
	}

	pub fn json_value(&self) -> Option<serde_json::Value> {
		serde_json::from_str(&self.value).ok()
	}
}

/// Parameters for creating a setting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSetting {
	pub key: Box<str>,
	pub title: Box<str>,
	#[serde(rename = "type")]
	pub typ: SettingType,
	pub value: Box<str>,
	#[serde(rename = "groupId")]
	pub group_id: Option<GroupId>,
}

/// Caller-supplied overrides for the provisioning create path.
/// Unset fields fall back to `{title: key, type: string, value: "", group: context}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SettingDefaults {
	pub title: Option<Box<str>>,
	#[serde(rename = "type")]
	pub typ: Option<SettingType>,
	pub value: Option<Box<str>>,
	#[serde(rename = "groupId")]
	pub group_id: Option<GroupId>,
}

/// An ordered, named category of settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettingsGroup {
	pub id: GroupId,
	pub key: Box<str>,
	pub title: Box<str>,
	pub description: Box<str>,
	pub icon: Box<str>,
	/// Dense 0-based ordering hint, re-normalized on move/insert/delete
	pub position: u32,
}

/// Parameters for creating a group; position is assigned at the end of the order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateGroup {
	pub key: Box<str>,
	pub title: Box<str>,
	pub description: Box<str>,
	pub icon: Box<str>,
}

/// One locale's copy of a setting value
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettingTranslation {
	#[serde(rename = "settingsId")]
	pub settings_id: SettingId,
	pub lang: Box<str>,
	pub value: Box<str>,
}

/// Route key of a page: module / controller / action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRoute {
	pub module: Box<str>,
	pub controller: Box<str>,
	pub action: Box<str>,
}

impl PageRoute {
	pub fn new(
		module: impl Into<Box<str>>,
		controller: impl Into<Box<str>>,
		action: impl Into<Box<str>>,
	) -> Self {
		Self { module: module.into(), controller: controller.into(), action: action.into() }
	}
}

impl std::fmt::Display for PageRoute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}/{}", self.module, self.controller, self.action)
	}
}

/// Page row binding a route to a meta tag
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetaPage {
	pub id: i64,
	#[serde(rename = "metaTagId")]
	pub meta_tag_id: MetaTagId,
	pub module: Box<str>,
	pub controller: Box<str>,
	pub action: Box<str>,
}

/// Locale-specific meta content for a tag
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetaTagTranslation {
	pub id: i64,
	#[serde(rename = "metaTagId")]
	pub meta_tag_id: MetaTagId,
	pub lang: Box<str>,
	pub title: Box<str>,
	pub description: Box<str>,
}

/// Parameters for creating one meta translation row
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatePageTranslation {
	#[serde(rename = "metaTagId")]
	pub meta_tag_id: MetaTagId,
	pub lang: Box<str>,
	pub title: Box<str>,
	pub description: Box<str>,
}

/// Per-locale defaults for the meta resolver, keyed by locale code
pub type MetaDefaults = HashMap<Box<str>, PageMetaDefaults>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageMetaDefaults {
	pub title: Option<Box<str>>,
	pub description: Option<Box<str>>,
}

#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	/// # Settings
	/// Reads a setting by its unique key. `Error::NotFound` when absent.
	async fn read_setting(&self, key: &str) -> BrResult<Setting>;
	/// Creates a setting. `Error::Duplicate` when the key already exists,
	/// so callers can distinguish a lost provisioning race from real failures.
	async fn create_setting(&self, setting: &CreateSetting) -> BrResult<Setting>;
	/// Saves title, type, value, and group of an existing setting.
	async fn update_setting(&self, setting: &Setting) -> BrResult<()>;
	/// Updates only the raw value, returning the updated record.
	async fn update_setting_value(&self, key: &str, value: &str) -> BrResult<Setting>;
	/// Lists settings of one group (`None` = the uncategorized group).
	async fn list_settings(&self, group_id: Option<GroupId>) -> BrResult<Vec<Setting>>;
	/// Deletes a setting together with its translation rows.
	async fn delete_setting(&self, id: SettingId) -> BrResult<()>;

	/// # Groups
	/// Lists all groups ascending by position.
	async fn list_groups(&self) -> BrResult<Vec<SettingsGroup>>;
	async fn read_group(&self, key: &str) -> BrResult<SettingsGroup>;
	async fn read_group_by_id(&self, id: GroupId) -> BrResult<SettingsGroup>;
	/// Creates a group at the end of the order (`max(position) + 1`).
	async fn create_group(&self, group: &CreateGroup) -> BrResult<SettingsGroup>;
	async fn update_group(&self, group: &SettingsGroup) -> BrResult<()>;
	/// Moves a group to `position`, renumbering everything in between in one
	/// transaction. Positions stay dense with no ties.
	async fn move_group(&self, id: GroupId, position: u32) -> BrResult<()>;
	/// Deletes a group, reassigning its settings to the uncategorized group
	/// and closing the position gap, all in one transaction.
	async fn delete_group(&self, id: GroupId) -> BrResult<()>;

	/// # Translations
	/// Inserts the given rows in one atomic batch. Rows whose
	/// `(settings_id, lang)` already exists are skipped, never overwritten.
	async fn seed_translations(&self, rows: &[SettingTranslation]) -> BrResult<()>;
	async fn count_translations(&self, id: SettingId) -> BrResult<u32>;
	async fn list_translations(&self, id: SettingId) -> BrResult<Vec<SettingTranslation>>;
	async fn update_translation(&self, id: SettingId, lang: &str, value: &str) -> BrResult<()>;

	/// # Meta pages
	/// Joined lookup: translation row for (route, lang). `Error::NotFound`
	/// when either the page or the locale row is missing.
	async fn read_page_translation(
		&self,
		route: &PageRoute,
		lang: &str,
	) -> BrResult<MetaTagTranslation>;
	async fn read_meta_page(&self, route: &PageRoute) -> BrResult<MetaPage>;
	async fn create_meta_tag(&self) -> BrResult<MetaTagId>;
	async fn create_meta_page(&self, tag_id: MetaTagId, route: &PageRoute) -> BrResult<MetaPage>;
	async fn create_page_translation(
		&self,
		translation: &CreatePageTranslation,
	) -> BrResult<MetaTagTranslation>;
}

// vim: ts=4
