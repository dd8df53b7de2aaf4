//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Trace layer for the search and health routes.
///
/// Every request gets an `INFO` span carrying method, URI (with the search
/// query string) and version; the response is logged at `INFO` with status
/// and latency in milliseconds.
///
/// 5xx responses are reported at `WARN`; the resolver logs their cause with
/// the cache key.
///
/// ```text
/// INFO request{method=GET uri=/?search=paris version=HTTP/1.1}: finished processing request latency=2 ms status=200
/// WARN request{method=GET uri=/?search=xx123 version=HTTP/1.1}: response failed classification=Status code: 502 Bad Gateway latency=31 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::WARN)
                .latency_unit(LatencyUnit::Millis),
        )
}
