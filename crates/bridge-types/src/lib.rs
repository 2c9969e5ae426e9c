//! Shared types, the store adapter trait, and error types for the Bridge
//! admin toolkit.
//!
//! This crate contains the foundational types shared between the service
//! crates and all store adapter implementations. Extracting these into a
//! separate crate lets adapters compile in parallel with the services and
//! keeps the persistence seam explicit: services receive an
//! `Arc<dyn StoreAdapter>`, never a concrete database handle.

pub mod error;
pub mod prelude;
pub mod store_adapter;
pub mod types;

// vim: ts=4
