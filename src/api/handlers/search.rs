//! Handler for geocoding search.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

use crate::api::dto::search::{SearchParams, SearchResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a free-form place search, from cache when possible.
///
/// # Endpoint
///
/// `GET /?search=<query>`
///
/// # Response
///
/// ```json
/// {
///   "cache": true,
///   "data": [
///     {
///       "place_id": 88066702,
///       "licence": "Data © OpenStreetMap contributors, ODbL 1.0. https://osm.org/copyright",
///       "osm_type": "relation",
///       "osm_id": 7444,
///       "boundingbox": ["48.8155755", "48.9021560", "2.2241220", "2.4697602"],
///       "lat": "48.8588897",
///       "lon": "2.3200410",
///       "display_name": "Paris, Île-de-France, France",
///       "class": "boundary",
///       "type": "administrative",
///       "importance": 0.94,
///       "icon": ""
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - 503 `cache_unavailable` - cache backend unreachable
/// - 500 `cache_corrupt` - stored entry undecodable
/// - 502 `upstream_unavailable` / `upstream_malformed` - geocoding service failed
/// - 504 `upstream_timeout` - geocoding service too slow
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let result = state.location_service.resolve(&params.search).await?;

    info!(
        query = %params.search,
        cache = result.cache_hit,
        results = result.locations.len(),
        "Search resolved"
    );

    Ok(Json(result.into()))
}
