//! DTOs for the search endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{LocationRecord, ResolutionResult};

/// Query string of `GET /?search=...`.
///
/// A missing `search` parameter is treated as the empty query.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// Search response.
///
/// ```json
/// {
///   "cache": false,
///   "data": [{ "place_id": 1, "lat": "48.85", "lon": "2.35", "display_name": "Paris, France", ... }]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// `true` if `data` was served from the cache.
    pub cache: bool,
    pub data: Vec<LocationRecord>,
}

impl From<ResolutionResult> for SearchResponse {
    fn from(result: ResolutionResult) -> Self {
        Self {
            cache: result.cache_hit,
            data: result.locations,
        }
    }
}
