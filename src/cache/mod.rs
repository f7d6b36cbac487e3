//! Local caching module: typed stores, managers and hydration.
//!
//! This module is the core of the crate. It provides:
//!
//! - [`EntityCache`]: a shared, typed, in-memory keyed store
//! - [`Patch`] and the [`Hydrate`] trait: merge-patch hydration, where
//!   only fields a payload explicitly defines overwrite an entity
//! - [`Manager`] and [`ScopedManager`]: cache-or-fetch accessors, with
//!   owner-scoped views layered over shared storage
//! - [`Registry`]: the cross-reference registry of shared stores used
//!   for aggregate wiring and relationship resolution

pub mod manager;
pub mod patch;
pub mod registry;
pub mod store;

pub use manager::{EndpointFn, Manager, ScopedManager};
pub use patch::{Hydrate, Patch, Scoped};
pub use registry::Registry;
pub use store::EntityCache;
