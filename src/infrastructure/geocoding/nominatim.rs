//! OpenStreetMap Nominatim search client.
//!
//! - **Endpoint**: `{base_url}/search?q=<query>&format=json`
//! - **User-Agent**: required by the Nominatim usage policy; configurable
//! - **Timeout**: bounded per request, covering connect and body read

use crate::domain::entities::LocationRecord;
use crate::domain::repositories::{LocationProvider, UpstreamError};
use async_trait::async_trait;
use reqwest::header;
use std::time::{Duration, Instant};

/// Default base URL of the public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Nominatim client configuration.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL without trailing slash (default: public instance).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string sent with every request.
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("geocode-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Nominatim search API client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    config: NominatimConfig,
}

impl NominatimClient {
    /// Builds a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Network`] if the HTTP client cannot be built
    /// (e.g., the TLS backend fails to initialize).
    pub fn new(config: NominatimConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Base URL this client sends requests to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Network(err.to_string())
    }
}

#[async_trait]
impl LocationProvider for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>, UpstreamError> {
        let start = Instant::now();
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));

        tracing::debug!("searching Nominatim: query={}", query);

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        tracing::debug!("Nominatim response status: {}", status);

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let locations: Vec<LocationRecord> =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Parse(e.to_string()))?;

        tracing::debug!(
            "search completed in {:?}, {} results",
            start.elapsed(),
            locations.len()
        );

        Ok(locations)
    }
}
