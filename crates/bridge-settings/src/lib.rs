//! Settings subsystem for the Bridge admin toolkit.
//!
//! The pieces, leaves first:
//! - [`cache::TtlCache`] — TTL-bounded LRU cache in front of the store,
//!   feature-gated by [`config::SettingsConfig::caching`].
//! - [`groups::GroupRegistry`] — ordered setting categories with explicit
//!   move/reorder operations over a dense position sequence.
//! - [`translations`] — fan-out seeding one translation row per configured
//!   locale, plus the completeness check driving lazy backfill.
//! - [`service::SettingsService`] — the provisioning resolver tying them
//!   together: memo, cache, store lookup, get-or-create with defaults.

pub mod cache;
pub mod config;
pub mod groups;
pub mod prelude;
pub mod service;
pub mod translations;

pub use cache::TtlCache;
pub use config::SettingsConfig;
pub use groups::GroupRegistry;
pub use service::SettingsService;

// vim: ts=4
