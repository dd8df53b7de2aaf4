//! Cache-aside resolution of geocoding searches.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::{debug, error, warn};

use crate::domain::cache_key::CacheKey;
use crate::domain::entities::{LocationRecord, ResolutionResult};
use crate::domain::repositories::{CacheError, CacheStore, LocationProvider, UpstreamError};

/// Failure of a single resolution.
///
/// Each variant maps to its own status code and error code at the HTTP
/// boundary (see [`crate::error::AppError`]).
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The cache lookup failed for a reason other than a missing key.
    #[error("cache unavailable: {0}")]
    CacheUnavailable(#[source] CacheError),

    /// A stored entry could not be decoded.
    #[error("cached entry is corrupt: {0}")]
    CacheCorrupt(String),

    /// The geocoding request failed at the network level or with an error status.
    #[error("geocoding service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The geocoding request exceeded its timeout.
    #[error("geocoding service timed out")]
    UpstreamTimeout,

    /// The geocoding response body did not match the expected shape.
    #[error("geocoding response malformed: {0}")]
    UpstreamMalformed(String),
}

impl From<UpstreamError> for ResolveError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout => Self::UpstreamTimeout,
            UpstreamError::Network(msg) => Self::UpstreamUnavailable(msg),
            UpstreamError::Status { status } => {
                Self::UpstreamUnavailable(format!("upstream returned HTTP {status}"))
            }
            UpstreamError::Parse(msg) => Self::UpstreamMalformed(msg),
        }
    }
}

/// Serves geocoding searches from the cache, falling back to the upstream
/// provider on a miss.
///
/// Holds no mutable state of its own: the cache store is the only arbiter of
/// consistency. Two concurrent misses for the same key both fetch and both
/// write; the last write wins.
pub struct LocationService<C: CacheStore + ?Sized, P: LocationProvider + ?Sized> {
    cache: Arc<C>,
    provider: Arc<P>,
    ttl: Duration,
}

impl<C: CacheStore + ?Sized, P: LocationProvider + ?Sized> LocationService<C, P> {
    /// Creates a new location service.
    ///
    /// `ttl` is the lifetime of every entry written on a miss.
    pub fn new(cache: Arc<C>, provider: Arc<P>, ttl: Duration) -> Self {
        Self {
            cache,
            provider,
            ttl,
        }
    }

    /// Resolves a raw search query.
    ///
    /// # Flow
    ///
    /// 1. Derive the [`CacheKey`] and look it up
    /// 2. **Hit**: decode the stored entry and return it with `cache_hit = true`
    /// 3. **Miss**: query the provider with the unescaped query, store the
    ///    result under the key for the configured TTL, return it with `cache_hit = false`
    ///
    /// An empty upstream result is cached like any other.
    ///
    /// A failed cache write is logged and the fresh data is still returned.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::CacheUnavailable`] if the lookup itself fails; the
    ///   provider is not consulted
    /// - [`ResolveError::CacheCorrupt`] if a stored entry cannot be decoded;
    ///   the provider is not consulted
    /// - [`ResolveError::UpstreamUnavailable`], [`ResolveError::UpstreamTimeout`],
    ///   [`ResolveError::UpstreamMalformed`] if the provider fails; nothing is cached
    pub async fn resolve(&self, query: &str) -> Result<ResolutionResult, ResolveError> {
        let key = CacheKey::normalize(query);

        match self.cache.get(key.as_str()).await {
            Ok(Some(bytes)) => {
                let locations: Vec<LocationRecord> =
                    serde_json::from_slice(&bytes).map_err(|e| {
                        error!(key = %key, "Failed to decode cached entry: {}", e);
                        counter!("geocode_cache_lookups_total", "outcome" => "corrupt")
                            .increment(1);
                        ResolveError::CacheCorrupt(e.to_string())
                    })?;

                debug!(key = %key, results = locations.len(), "Cache HIT");
                counter!("geocode_cache_lookups_total", "outcome" => "hit").increment(1);

                Ok(ResolutionResult::hit(locations))
            }
            Ok(None) => {
                debug!(key = %key, "Cache MISS, querying upstream");
                counter!("geocode_cache_lookups_total", "outcome" => "miss").increment(1);

                let locations = self.fetch_and_store(query, &key).await?;

                Ok(ResolutionResult::miss(locations))
            }
            Err(e) => {
                error!(key = %key, "Cache lookup failed: {}", e);
                counter!("geocode_cache_lookups_total", "outcome" => "error").increment(1);

                Err(ResolveError::CacheUnavailable(e))
            }
        }
    }

    /// Queries the provider and writes the result back to the cache.
    async fn fetch_and_store(
        &self,
        query: &str,
        key: &CacheKey,
    ) -> Result<Vec<LocationRecord>, ResolveError> {
        let locations = self.provider.search(query).await.map_err(|e| {
            warn!(key = %key, "Upstream search failed: {}", e);
            counter!("geocode_upstream_errors_total").increment(1);
            ResolveError::from(e)
        })?;

        match serde_json::to_vec(&locations) {
            Ok(bytes) => {
                if let Err(e) = self.cache.set(key.as_str(), &bytes, self.ttl).await {
                    warn!(key = %key, "Failed to cache upstream result: {}", e);
                    counter!("geocode_cache_write_errors_total").increment(1);
                } else {
                    debug!(
                        key = %key,
                        results = locations.len(),
                        "Cache SET (TTL: {}s)",
                        self.ttl.as_secs()
                    );
                }
            }
            Err(e) => {
                warn!(key = %key, "Failed to encode upstream result for caching: {}", e);
            }
        }

        Ok(locations)
    }
}
