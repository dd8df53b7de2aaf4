//! Cache store trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors raised by a cache backend.
///
/// A missing key is not an error: lookups report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store with native per-entry expiry.
///
/// Implementations must be safe for concurrent use by many requests. Unlike a
/// fail-open cache, errors are reported to the caller so it can tell an
/// unreachable backend apart from a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed store using `SET EX`
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process store for single-node setups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads the stored bytes for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` on hit
    /// - `Ok(None)` when the key is absent or has expired
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot be reached or the
    /// command fails.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous entry, expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the write does not reach the backend.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()>;

    /// Removes `key`. Returns `true` if an entry was deleted.
    async fn invalidate(&self, key: &str) -> CacheResult<bool>;

    /// Remaining lifetime of `key`.
    ///
    /// `None` if the key is absent, and also if it was stored without expiry
    /// by something other than [`CacheStore::set`].
    async fn ttl(&self, key: &str) -> CacheResult<Option<Duration>>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint and the admin CLI.
    async fn health_check(&self) -> bool;
}
