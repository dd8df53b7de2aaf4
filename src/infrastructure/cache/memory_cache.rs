//! In-process cache implementation.

use crate::domain::repositories::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// A process-local store with per-entry expiry.
///
/// Used when Redis is not configured. Expired entries read as absent and are
/// dropped on the next lookup of the same key or the next write. There is no
/// capacity limit.
///
/// Expiry follows the Tokio clock, so tests running with a paused runtime can
/// advance time instead of sleeping.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        debug!("Using MemoryCache (in-process)");
        Self::default()
    }

    fn lock(&self) -> CacheResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| CacheError::OperationError("memory cache lock poisoned".to_string()))
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut entries = self.lock()?;

        if let Some(entry) = entries.get(key)
            && entry.expires_at > Instant::now()
        {
            return Ok(Some(entry.value.clone()));
        }

        entries.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_vec(),
                expires_at: now + ttl,
            },
        );

        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<bool> {
        let mut entries = self.lock()?;
        Ok(entries
            .remove(key)
            .is_some_and(|entry| entry.expires_at > Instant::now()))
    }

    async fn ttl(&self, key: &str) -> CacheResult<Option<Duration>> {
        let entries = self.lock()?;
        let now = Instant::now();

        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.expires_at - now))
    }

    async fn health_check(&self) -> bool {
        self.lock().is_ok()
    }
}
