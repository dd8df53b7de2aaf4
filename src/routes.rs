//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /?search=<q>` - Cached geocoding search (rate limited)
//! - `GET /health`      - Health check: cache backend and upstream (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on search (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// The peer-address limiter needs `ConnectInfo<SocketAddr>`, so serve the
/// router with `into_make_service_with_connect_info`.
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let search_router = if behind_proxy {
        api::routes::search_routes().layer(rate_limit::proxied_layer())
    } else {
        api::routes::search_routes().layer(rate_limit::layer())
    };

    let router = Router::new()
        .merge(search_router)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
