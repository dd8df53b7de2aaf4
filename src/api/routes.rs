//! API route configuration.

use crate::api::handlers::search_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Search routes, subject to per-client rate limiting.
///
/// # Endpoints
///
/// - `GET /?search=<query>` - Cached geocoding search
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/", get(search_handler))
}
