//! Cache key derivation for search queries.
//!
//! A [`CacheKey`] is the path-segment escaped form of the raw search term.
//! Escaping keeps keys uniform and loggable regardless of what the caller
//! typed, and is the sole identifier used against the cache store.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;

/// Bytes escaped inside a single path segment.
///
/// Letters, digits, unreserved marks and `$ & + : = @` pass through. Of the
/// reserved characters, `/ ; , ?` are escaped along with `%`, space and every
/// non-ASCII byte.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Normalized identifier of a cached search result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the cache key for a raw search query.
    ///
    /// Pure and infallible: the same query always yields the same key, and the
    /// empty query yields the empty key.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocode_proxy::domain::cache_key::CacheKey;
    ///
    /// assert_eq!(CacheKey::normalize("new york").as_str(), "new%20york");
    /// assert_eq!(CacheKey::normalize("a/b?c").as_str(), "a%2Fb%3Fc");
    /// ```
    pub fn normalize(query: &str) -> Self {
        Self(utf8_percent_encode(query, PATH_SEGMENT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
