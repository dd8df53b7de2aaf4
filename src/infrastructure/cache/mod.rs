//! Cache backends for serialized search results.
//!
//! Both implement [`crate::domain::repositories::CacheStore`]:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process fallback when Redis is not configured

mod memory_cache;
mod redis_cache;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
