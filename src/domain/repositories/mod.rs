//! Collaborator trait definitions for the domain layer.
//!
//! The resolver only talks to the outside world through these traits; concrete
//! implementations live in `crate::infrastructure` and are injected at startup.
//!
//! # Available Traits
//!
//! - [`CacheStore`] - Key-value store with TTL
//! - [`LocationProvider`] - Upstream geocoding search
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod cache_store;
pub mod location_provider;

pub use cache_store::{CacheError, CacheResult, CacheStore};
pub use location_provider::{LocationProvider, UpstreamError};

#[cfg(test)]
pub use cache_store::MockCacheStore;
#[cfg(test)]
pub use location_provider::MockLocationProvider;
