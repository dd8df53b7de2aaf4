//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::LocationService;
use crate::domain::repositories::{CacheStore, LocationProvider};

/// Location service over type-erased collaborators, as wired by the server.
pub type DynLocationService = LocationService<dyn CacheStore, dyn LocationProvider>;

#[derive(Clone)]
pub struct AppState {
    pub location_service: Arc<DynLocationService>,
    pub cache: Arc<dyn CacheStore>,
    /// Upstream base URL, reported by the health endpoint.
    pub upstream_url: String,
}

impl AppState {
    /// Wires the location service to the given cache and provider.
    pub fn new(
        cache: Arc<dyn CacheStore>,
        provider: Arc<dyn LocationProvider>,
        cache_ttl: Duration,
        upstream_url: impl Into<String>,
    ) -> Self {
        let location_service = Arc::new(LocationService::new(cache.clone(), provider, cache_ttl));

        Self {
            location_service,
            cache,
            upstream_url: upstream_url.into(),
        }
    }
}
