//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Cache backend reachable
/// - **503 Service Unavailable**: Cache backend degraded
///
/// # Components Checked
///
/// 1. **Cache**: PING (Redis) or lock check (in-process)
/// 2. **Upstream**: Reports the configured base URL; not called, to stay
///    within the upstream usage policy
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "cache": { "status": "ok", "message": "Cache backend reachable" },
///     "upstream": { "status": "ok", "message": "https://nominatim.openstreetmap.org" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let cache_check = check_cache(&state).await;
    let upstream_check = check_upstream(&state);

    let all_healthy = cache_check.status == "ok" && upstream_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            cache: cache_check,
            upstream: upstream_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks cache connectivity.
async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Cache backend reachable".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Cache backend unreachable".to_string()),
        }
    }
}

/// Reports the configured upstream endpoint.
fn check_upstream(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(state.upstream_url.clone()),
    }
}
