#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use geocode_proxy::domain::entities::LocationRecord;
use geocode_proxy::domain::repositories::{
    CacheError, CacheResult, CacheStore, LocationProvider, UpstreamError,
};
use geocode_proxy::infrastructure::cache::MemoryCache;
use geocode_proxy::state::AppState;

pub const TEST_TTL: Duration = Duration::from_secs(15);

pub fn paris() -> LocationRecord {
    LocationRecord {
        place_id: 1,
        licence: "Data © OpenStreetMap contributors".to_string(),
        osm_type: "relation".to_string(),
        osm_id: 7444,
        boundingbox: vec![
            "48.8155755".to_string(),
            "48.9021560".to_string(),
            "2.2241220".to_string(),
            "2.4697602".to_string(),
        ],
        lat: "48.85".to_string(),
        lon: "2.35".to_string(),
        display_name: "Paris, France".to_string(),
        class: "boundary".to_string(),
        kind: "administrative".to_string(),
        importance: 0.94,
        icon: "https://nominatim.openstreetmap.org/ui/mapicons/poi_boundary_administrative.p.20.png"
            .to_string(),
    }
}

/// What the stub upstream answers.
#[derive(Clone)]
pub enum Upstream {
    Locations(Vec<LocationRecord>),
    Refused,
    Timeout,
    Malformed,
}

/// Upstream stand-in that counts calls and records the queries it saw.
pub struct StubProvider {
    answer: Upstream,
    calls: AtomicUsize,
    queries: std::sync::Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(answer: Upstream) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            queries: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocationProvider for StubProvider {
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        match &self.answer {
            Upstream::Locations(locations) => Ok(locations.clone()),
            Upstream::Refused => Err(UpstreamError::Network("connection refused".to_string())),
            Upstream::Timeout => Err(UpstreamError::Timeout),
            Upstream::Malformed => Err(UpstreamError::Parse("expected array".to_string())),
        }
    }
}

/// In-process cache that can be told to fail reads or writes.
#[derive(Default)]
pub struct FlakyCache {
    inner: MemoryCache,
    pub fail_reads: bool,
    pub fail_writes: bool,
    writes: AtomicUsize,
}

impl FlakyCache {
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for FlakyCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(CacheError::OperationError("READONLY replica".to_string()));
        }
        self.inner.set(key, value, ttl).await
    }

    async fn invalidate(&self, key: &str) -> CacheResult<bool> {
        self.inner.invalidate(key).await
    }

    async fn ttl(&self, key: &str) -> CacheResult<Option<Duration>> {
        self.inner.ttl(key).await
    }

    async fn health_check(&self) -> bool {
        !self.fail_reads
    }
}

pub fn create_test_state(
    cache: Arc<dyn CacheStore>,
    provider: Arc<dyn LocationProvider>,
) -> AppState {
    AppState::new(cache, provider, TEST_TTL, "http://nominatim.test")
}
