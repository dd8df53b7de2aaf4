//! # Geocode Proxy
//!
//! A caching HTTP proxy in front of the OpenStreetMap Nominatim search API,
//! built with Axum and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Location records, cache keys, collaborator traits
//! - **Application Layer** ([`application`]) - Cache-aside resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis / in-process cache, Nominatim client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Request Flow
//!
//! 1. `GET /?search=<q>` arrives
//! 2. The query is escaped into a [`domain::cache_key::CacheKey`]
//! 3. On a cache hit the stored result is returned with `"cache": true`
//! 4. On a miss Nominatim is queried, the result is cached for the configured
//!    TTL and returned with `"cache": false`
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! export CACHE_TTL_SECONDS=15                # Optional
//!
//! cargo run
//! curl 'http://localhost:3000/?search=paris'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LocationService, ResolveError};
    pub use crate::domain::cache_key::CacheKey;
    pub use crate::domain::entities::{LocationRecord, ResolutionResult};
    pub use crate::domain::repositories::{
        CacheError, CacheStore, LocationProvider, UpstreamError,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
