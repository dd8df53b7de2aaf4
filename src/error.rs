use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::ResolveError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    CacheUnavailable { message: String, details: Value },
    CacheCorrupt { message: String, details: Value },
    UpstreamUnavailable { message: String, details: Value },
    UpstreamTimeout { message: String, details: Value },
    UpstreamMalformed { message: String, details: Value },
}

impl AppError {
    /// Status code and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::CacheUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "cache_unavailable")
            }
            AppError::CacheCorrupt { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "cache_corrupt"),
            AppError::UpstreamUnavailable { .. } => (StatusCode::BAD_GATEWAY, "upstream_unavailable"),
            AppError::UpstreamTimeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
            AppError::UpstreamMalformed { .. } => (StatusCode::BAD_GATEWAY, "upstream_malformed"),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        // Cache errors may carry backend addresses, so they stay out of the body
        match err {
            ResolveError::CacheUnavailable(_) => AppError::CacheUnavailable {
                message: "Cache backend unavailable".to_string(),
                details: json!({}),
            },
            ResolveError::CacheCorrupt(_) => AppError::CacheCorrupt {
                message: "Cached entry could not be decoded".to_string(),
                details: json!({}),
            },
            ResolveError::UpstreamUnavailable(reason) => AppError::UpstreamUnavailable {
                message: "Geocoding service unavailable".to_string(),
                details: json!({ "reason": reason }),
            },
            ResolveError::UpstreamTimeout => AppError::UpstreamTimeout {
                message: "Geocoding service timed out".to_string(),
                details: json!({}),
            },
            ResolveError::UpstreamMalformed(reason) => AppError::UpstreamMalformed {
                message: "Geocoding service returned an unexpected response".to_string(),
                details: json!({ "reason": reason }),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let (message, details) = match self {
            AppError::CacheUnavailable { message, details }
            | AppError::CacheCorrupt { message, details }
            | AppError::UpstreamUnavailable { message, details }
            | AppError::UpstreamTimeout { message, details }
            | AppError::UpstreamMalformed { message, details } => (message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
