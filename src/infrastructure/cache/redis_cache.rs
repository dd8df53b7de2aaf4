//! Redis-backed cache implementation.

use crate::domain::repositories::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for serialized search results.
///
/// Uses `ConnectionManager` for a multiplexed, auto-reconnecting connection that
/// is cheap to clone per call. Entries are written with `SET .. EX` so Redis
/// handles expiry. Errors are returned to the caller, never swallowed.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (`redis://` or `rediss://` for TLS)
    /// - `key_prefix` - Namespace prepended to every key (e.g., `"geo:"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

/// Interprets a `PTTL` reply.
///
/// Redis answers `-2` for a missing key and `-1` for a key stored without
/// expiry. Both carry no remaining lifetime and map to `None`.
fn remaining_lifetime(millis: i64) -> Option<Duration> {
    u64::try_from(millis).ok().map(Duration::from_millis)
}

/// Separates an unreachable server from a rejected command.
fn classify(command: &str, key: &str, e: RedisError) -> CacheError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
    {
        CacheError::ConnectionError(format!("Redis {} {}: {}", command, key, e))
    } else {
        CacheError::OperationError(format!("Redis {} {}: {}", command, key, e))
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<Vec<u8>>>(&full_key)
            .await
            .map_err(|e| classify("GET", &full_key, e))?;

        debug!(key = %full_key, found = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();
        // EX takes whole seconds and rejects zero
        let ttl_seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds)
            .await
            .map_err(|e| classify("SET", &full_key, e))?;

        debug!(key = %full_key, "Redis SET (TTL: {}s)", ttl_seconds);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i64>(&full_key)
            .await
            .map_err(|e| classify("DEL", &full_key, e))?;

        Ok(deleted > 0)
    }

    async fn ttl(&self, key: &str) -> CacheResult<Option<Duration>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let millis = conn
            .pttl::<_, i64>(&full_key)
            .await
            .map_err(|e| classify("PTTL", &full_key, e))?;

        Ok(remaining_lifetime(millis))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
