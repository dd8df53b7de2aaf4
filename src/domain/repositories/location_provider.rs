//! Upstream geocoding provider trait.

use crate::domain::entities::LocationRecord;
use async_trait::async_trait;

/// Errors from the upstream geocoding service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection refused, DNS failure, TLS failure and the like.
    #[error("upstream network error: {0}")]
    Network(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    /// The response body was not a list of locations.
    #[error("upstream response could not be parsed: {0}")]
    Parse(String),
}

/// Resolves a free-form search query into geocoded locations.
///
/// # Implementations
///
/// - [`crate::infrastructure::geocoding::NominatimClient`] - OpenStreetMap Nominatim over HTTP
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Searches for `query`, which is passed through unescaped.
    ///
    /// An empty vector is a valid answer (nothing matched).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on network failure, timeout, non-2xx status,
    /// or an unparseable body.
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>, UpstreamError>;
}
