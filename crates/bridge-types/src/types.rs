//! Common types used throughout the Bridge admin toolkit.

use serde::{Deserialize, Serialize};

// SettingId //
//***********//
#[derive(Clone, Copy, Debug)]
pub struct SettingId(pub i64);

impl std::fmt::Display for SettingId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for SettingId {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::Eq for SettingId {}

impl Serialize for SettingId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for SettingId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(SettingId(i64::deserialize(deserializer)?))
	}
}

// GroupId //
//*********//
#[derive(Clone, Copy, Debug)]
pub struct GroupId(pub i64);

impl std::fmt::Display for GroupId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for GroupId {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::Eq for GroupId {}

impl Serialize for GroupId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for GroupId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(GroupId(i64::deserialize(deserializer)?))
	}
}

// MetaTagId //
//***********//
#[derive(Clone, Copy, Debug)]
pub struct MetaTagId(pub i64);

impl std::fmt::Display for MetaTagId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for MetaTagId {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::Eq for MetaTagId {}

impl Serialize for MetaTagId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for MetaTagId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(MetaTagId(i64::deserialize(deserializer)?))
	}
}

// vim: ts=4
