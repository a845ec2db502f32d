//! Response memoization.

use std::collections::BTreeMap;

use md5::{Digest, Md5};
use moka::future::Cache;
use serde_json::Value;

/// Process-lifetime store of parsed JSON bodies keyed by request signature.
///
/// Entries never expire. Without a size bound nothing is ever evicted.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, Value>,
}

impl ResponseCache {
    /// Cache that keeps every response.
    #[must_use]
    pub fn unbounded() -> Self {
        Self { inner: Cache::builder().build() }
    }

    /// Cache that evicts once `max_size` entries are held.
    #[must_use]
    pub fn bounded(max_size: u64) -> Self {
        Self { inner: Cache::builder().max_capacity(max_size).build() }
    }

    pub(crate) fn with_capacity(max_size: Option<u64>) -> Self {
        max_size.map_or_else(Self::unbounded, Self::bounded)
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, value: Value) {
        self.inner.insert(key, value).await;
    }

    /// Drop the entry for `key`, if any.
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache").field("entries", &self.inner.entry_count()).finish()
    }
}

/// Generate cache key.
///
/// Two requests with the same method, resolved URL and header set collide;
/// anything else differs.
pub(crate) fn cache_key(method: &str, url: &str, headers: &BTreeMap<String, String>) -> String {
    let mut hasher = Md5::new();
    hasher.update(method.as_bytes());
    hasher.update(b"|");
    hasher.update(url.as_bytes());
    hasher.update(b"|");

    for (k, v) in headers {
        hasher.update(k.as_bytes());
        hasher.update(b":");
        hasher.update(v.as_bytes());
        hasher.update(b"\n");
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_cache_key_is_stable() {
        let h = headers(&[("accept", "application/json"), ("x-trace", "1")]);
        let reordered = headers(&[("x-trace", "1"), ("accept", "application/json")]);
        assert_eq!(cache_key("GET", "https://a/works", &h), cache_key("GET", "https://a/works", &reordered));
    }

    #[test]
    fn test_cache_key_distinguishes_requests() {
        let h = headers(&[("accept", "application/json")]);
        let base = cache_key("GET", "https://a/works?page=1", &h);
        assert_ne!(base, cache_key("GET", "https://a/works?page=2", &h));
        assert_ne!(base, cache_key("POST", "https://a/works?page=1", &h));
        assert_ne!(base, cache_key("GET", "https://a/works?page=1", &headers(&[("accept", "text/html")])));
    }

    #[tokio::test]
    async fn test_insert_get_invalidate() {
        let cache = ResponseCache::unbounded();
        cache.insert("k".to_string(), serde_json::json!({"a": 1})).await;
        assert!(cache.contains("k"));
        assert_eq!(cache.get("k").await, Some(serde_json::json!({"a": 1})));

        cache.invalidate("k").await;
        assert!(!cache.contains("k"));
        assert_eq!(cache.get("k").await, None);
    }
}
