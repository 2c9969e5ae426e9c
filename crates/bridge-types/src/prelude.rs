pub use crate::error::{BrResult, Error};
pub use crate::types::{GroupId, MetaTagId, SettingId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
