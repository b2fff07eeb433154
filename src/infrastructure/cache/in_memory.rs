//! In-memory TTL cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::{DEFAULT_TTL, TtlCache};

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Serialized JSON value
    data: String,
    /// Expiration timestamp (millis since epoch)
    expires_at: u64,
}

/// Thread-safe in-memory cache with a fixed per-instance TTL
///
/// moka provides the concurrent map and evicts on its own schedule; the
/// explicit `expires_at` stamp guarantees an expired entry is never
/// returned even before moka's maintenance has run.
#[derive(Debug)]
pub struct InMemoryTtlCache {
    cache: MokaCache<String, CacheEntry>,
    ttl: Duration,
}

impl InMemoryTtlCache {
    /// Creates a cache with the default 30-second TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with the given TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        let cache = MokaCache::builder().time_to_live(ttl).build();

        Self { cache, ttl }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        Self::current_time_millis() > entry.expires_at
    }
}

impl Default for InMemoryTtlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TtlCache for InMemoryTtlCache {
    async fn put_raw(&self, key: &str, value: String) {
        let entry = CacheEntry {
            data: value,
            expires_at: Self::current_time_millis() + self.ttl.as_millis() as u64,
        };

        self.cache.insert(key.to_string(), entry).await;
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        match self.cache.get(key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(key).await;
                    return None;
                }

                Some(entry.data)
            }
            None => None,
        }
    }

    async fn remove(&self, key: &str) {
        self.cache.remove(key).await;
    }

    async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    async fn contains_key(&self, key: &str) -> bool {
        match self.cache.get(key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(key).await;
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    async fn size(&self) -> usize {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::TtlCacheExt;

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = InMemoryTtlCache::new();

        cache.put("key1", &"value1").await;

        let result: Option<String> = cache.get("key1").await;
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryTtlCache::new();

        let result: Option<String> = cache.get("missing").await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = InMemoryTtlCache::new();

        cache.put("key1", &"old").await;
        cache.put("key1", &"new").await;

        let result: Option<String> = cache.get("key1").await;
        assert_eq!(result, Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = InMemoryTtlCache::new();

        cache.put("key1", &"value1").await;
        cache.remove("key1").await;

        let result: Option<String> = cache.get("key1").await;
        assert!(result.is_none());
        assert!(!cache.contains_key("key1").await);
    }

    #[tokio::test]
    async fn test_ttl_expiration_evicts() {
        let cache = InMemoryTtlCache::with_ttl(Duration::from_millis(50));

        cache.put("key1", &"value1").await;
        assert!(cache.contains_key("key1").await);

        tokio::time::sleep(Duration::from_millis(100)).await;

        let result: Option<String> = cache.get("key1").await;
        assert!(result.is_none());
        assert!(!cache.contains_key("key1").await);
    }

    #[tokio::test]
    async fn test_size_skips_expired_entries() {
        let cache = InMemoryTtlCache::with_ttl(Duration::from_millis(50));

        cache.put("key1", &"value1").await;
        cache.put("key2", &"value2").await;
        assert_eq!(cache.size().await, 2);

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(cache.size().await, 0);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = InMemoryTtlCache::new();

        cache.put("key1", &"value1").await;
        cache.put("key2", &"value2").await;

        cache.clear().await;

        assert_eq!(cache.size().await, 0);
        let result: Option<String> = cache.get("key1").await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_complex_types() {
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        struct TestData {
            name: String,
            values: Vec<i32>,
        }

        let cache = InMemoryTtlCache::new();
        let data = TestData {
            name: "test".to_string(),
            values: vec![1, 2, 3],
        };

        cache.put("complex", &data).await;

        let result: Option<TestData> = cache.get("complex").await;
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_concurrent_access() {
        use std::sync::Arc;

        let cache = Arc::new(InMemoryTtlCache::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                let key = format!("key{}", i % 4);
                cache.put(&key, &i).await;
                let _: Option<i32> = cache.get(&key).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert!(cache.size().await <= 4);
    }
}
