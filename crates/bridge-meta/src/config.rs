//! Meta resolver configuration

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
	/// Fallback for title and description when the caller's defaults carry
	/// nothing for the requested locale
	#[serde(rename = "siteName")]
	pub site_name: Box<str>,
}

impl Default for MetaConfig {
	fn default() -> Self {
		Self { site_name: "Bridge".into() }
	}
}

// vim: ts=4
