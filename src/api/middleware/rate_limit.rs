//! Rate limiting middleware using token bucket algorithm.
//!
//! Cache hits are cheap, but every miss turns into a request against a shared
//! public geocoding service, so search traffic is limited per client.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// One token is replenished every this many seconds.
const REPLENISH_SECONDS: u64 = 1;

/// Requests a client may issue back to back before being throttled.
const BURST_SIZE: u32 = 30;

/// Creates a rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 30 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(search_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter keyed by the forwarded client address.
///
/// Reads `X-Forwarded-For`, `X-Real-IP` and `Forwarded` before falling back
/// to the peer address. Same limits as [`layer`]. Use only behind a trusted
/// reverse proxy, since clients can set these headers themselves.
pub fn proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
