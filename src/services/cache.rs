use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

/// Keys for the request layer's in-memory query cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    MovieDetails(u64),
    Feed(&'static str),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::MovieDetails(id) => write!(f, "movie:{}", id),
            CacheKey::Feed(name) => write!(f, "feed:{}", name),
        }
    }
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-process TTL cache for metadata lookups. Values are stored as JSON so
/// one cache serves every response type.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key` if present and not expired
    pub async fn get_from_cache<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(&key.to_string())?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        serde_json::from_str(&entry.value).ok()
    }

    /// Stores `value` under `key` without blocking the caller. Expired
    /// entries are pruned on each write.
    pub fn set_in_background<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(key = %key, error = %err, "Failed to serialize cache value");
                return;
            }
        };

        let entries = Arc::clone(&self.entries);
        let key = key.to_string();
        tokio::spawn(async move {
            let mut entries = entries.write().await;
            let now = Instant::now();
            entries.retain(|_, entry| entry.expires_at > now);
            entries.insert(
                key,
                CacheEntry {
                    value: json,
                    expires_at: now + Duration::from_secs(ttl),
                },
            );
        });
    }
}

/// Checks the cache for a value; on a miss, runs the block, caches the
/// result in the background, and returns it.
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await {
            $crate::error::AppResult::Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            $crate::error::AppResult::Ok(value)
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    // set_in_background spawns a task; yield until the write lands
    async fn wait_for<T: DeserializeOwned>(cache: &QueryCache, key: &CacheKey) -> Option<T> {
        for _ in 0..50 {
            if let Some(value) = cache.get_from_cache(key).await {
                return Some(value);
            }
            tokio::task::yield_now().await;
        }
        None
    }

    #[tokio::test]
    async fn stores_and_returns_values() {
        let cache = QueryCache::new();
        let key = CacheKey::MovieDetails(603);
        cache.set_in_background(&key, &"payload".to_string(), 60);

        assert_eq!(wait_for::<String>(&cache, &key).await.as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn misses_on_unknown_keys() {
        let cache = QueryCache::new();
        assert_eq!(
            cache.get_from_cache::<String>(&CacheKey::Feed("trending")).await,
            None
        );
    }

    #[tokio::test]
    async fn expired_entries_are_not_returned() {
        let cache = QueryCache::new();
        let key = CacheKey::MovieDetails(603);
        cache.set_in_background(&key, &"payload".to_string(), 0);

        // Give the write task a chance to run, then the entry is already stale
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
        assert_eq!(cache.get_from_cache::<String>(&key).await, None);
    }

    #[tokio::test]
    async fn keys_are_namespaced_by_variant() {
        assert_eq!(CacheKey::MovieDetails(603).to_string(), "movie:603");
        assert_eq!(CacheKey::Feed("popular").to_string(), "feed:popular");
    }
}
