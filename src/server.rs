//! HTTP server initialization and runtime setup.
//!
//! Handles cache backend setup, upstream client construction, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::CacheStore;
use crate::infrastructure::cache::{MemoryCache, RedisCache};
use crate::infrastructure::geocoding::{NominatimClient, NominatimConfig};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis cache (or in-process cache when Redis is not configured)
/// - Nominatim client with the configured timeout and User-Agent
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured but unreachable (the service does not start without it)
/// - The upstream HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let cache: Arc<dyn CacheStore> = if let Some(redis_url) = &config.redis_url {
        let redis = RedisCache::connect(redis_url, &config.cache_key_prefix)
            .await
            .context("Failed to connect to Redis")?;
        tracing::info!("Cache enabled (Redis)");
        Arc::new(redis)
    } else {
        tracing::info!("Redis not configured, caching in-process");
        Arc::new(MemoryCache::new())
    };

    let provider = NominatimClient::new(NominatimConfig {
        base_url: config.upstream_base_url.clone(),
        timeout: config.upstream_timeout(),
        user_agent: config.upstream_user_agent.clone(),
    })
    .context("Failed to build upstream HTTP client")?;
    let upstream_url = provider.base_url().to_string();

    let state = AppState::new(cache, Arc::new(provider), config.cache_ttl(), upstream_url);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
