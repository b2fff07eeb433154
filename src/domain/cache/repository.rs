//! Time-boxed cache contract

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// Fixed time-to-live applied to every cache entry
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Cache keys used by the domain services
///
/// All of them are invalidated, not overwritten, on any mutation that
/// could change their value.
pub mod keys {
    pub const LEADERS_ALL: &str = "leaders:all";
    pub const PARTS_ALL: &str = "parts:all";
    pub const PARTS_ACTIVE: &str = "parts:active";
    pub const SYSTEM_STATS: &str = "system:stats";
}

/// In-memory key-value cache with a fixed per-instance TTL
///
/// Values are JSON strings internally so the trait stays dyn-compatible;
/// use `TtlCacheExt` for typed access. The cache is best-effort by
/// contract: operations are infallible and an entry is never returned
/// after its TTL has elapsed, regardless of access pattern. Expiry is
/// enforced lazily on access, there is no background sweep.
#[async_trait]
pub trait TtlCache: Send + Sync + Debug {
    /// Stores a raw JSON value, overwriting any prior value and timestamp
    async fn put_raw(&self, key: &str, value: String);

    /// Returns the raw value if present and not expired; evicts on expiry
    async fn get_raw(&self, key: &str) -> Option<String>;

    /// Unconditionally evicts the entry if present
    async fn remove(&self, key: &str);

    /// Evicts everything; used by full-system resets
    async fn clear(&self);

    /// True only if the key is present and not expired
    async fn contains_key(&self, key: &str) -> bool;

    /// Evicts all expired entries, then returns the live entry count
    async fn size(&self) -> usize;
}

/// Extension trait providing typed get/put operations
pub trait TtlCacheExt: TtlCache {
    /// Gets a typed value from the cache
    ///
    /// Returns `None` when the key is absent, expired, or the stored
    /// value does not deserialize as `V` (a stale entry of another shape
    /// is treated the same as a miss, never an error).
    fn get<'a, V>(&'a self, key: &'a str) -> impl std::future::Future<Output = Option<V>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            let raw = self.get_raw(key).await?;
            serde_json::from_str(&raw).ok()
        }
    }

    /// Puts a typed value into the cache
    fn put<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
    ) -> impl std::future::Future<Output = ()> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            match serde_json::to_string(value) {
                Ok(raw) => self.put_raw(key, raw).await,
                Err(e) => warn!(key, error = %e, "Skipping cache put, value failed to serialize"),
            }
        }
    }
}

// Blanket implementation for all types implementing TtlCache
impl<T: TtlCache + ?Sized> TtlCacheExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache for testing; no expiry, plain map semantics
    #[derive(Debug, Default)]
    pub struct MockTtlCache {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MockTtlCache {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry<V: Serialize>(self, key: &str, value: &V) -> Self {
            let raw = serde_json::to_string(value).unwrap();
            self.entries.lock().unwrap().insert(key.to_string(), raw);
            self
        }
    }

    #[async_trait]
    impl TtlCache for MockTtlCache {
        async fn put_raw(&self, key: &str, value: String) {
            self.entries.lock().unwrap().insert(key.to_string(), value);
        }

        async fn get_raw(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        async fn remove(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }

        async fn clear(&self) {
            self.entries.lock().unwrap().clear();
        }

        async fn contains_key(&self, key: &str) -> bool {
            self.entries.lock().unwrap().contains_key(key)
        }

        async fn size(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }
}
