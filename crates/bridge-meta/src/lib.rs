//! Per-route page metadata (meta tags) for the Bridge admin toolkit.
//!
//! Unlike settings, meta translations are sparse: a locale's row is created
//! on that locale's first access to the page, not fanned out in advance.

pub mod config;
pub mod prelude;
pub mod service;

pub use config::MetaConfig;
pub use service::MetaService;

// vim: ts=4
