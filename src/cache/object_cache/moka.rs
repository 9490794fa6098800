use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::CacheConfig;
use crate::declare_object_cache_plugin;
use crate::errors::Result;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _now: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// 进程内缓存，支持按条目设置 TTL
pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let inner = Cache::builder()
            .max_capacity(config.memory.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default TTL: {}s",
            config.memory.max_capacity, config.default_ttl
        );
        Ok(Self {
            inner,
            default_ttl: Duration::from_secs(config.default_ttl),
        })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => {
                debug!("Cache hit: {}", key);
                CacheResult::Found(entry.value)
            }
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemoryConfig, RedisConfig};
    use std::sync::Arc;

    fn cache() -> Arc<dyn ObjectCache> {
        let config = CacheConfig {
            cache_type: "moka".to_string(),
            default_ttl: 60,
            redis: RedisConfig {
                url: String::new(),
                key_prefix: String::new(),
                pool_size: 1,
            },
            memory: MemoryConfig { max_capacity: 100 },
        };
        Arc::new(MokaCacheWrapper::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = cache();
        cache
            .insert_raw("user:abc".to_string(), "{}".to_string(), 0)
            .await;
        assert_eq!(cache.get_raw("user:abc").await, CacheResult::Found("{}".to_string()));

        cache.remove("user:abc").await;
        assert_eq!(cache.get_raw("user:abc").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let cache = cache();
        cache.insert("n".to_string(), &vec![1, 2, 3], 0).await;
        assert_eq!(cache.get::<Vec<i32>>("n").await, CacheResult::Found(vec![1, 2, 3]));
        assert_eq!(cache.get::<String>("n").await, CacheResult::ExistsButNoValue);
    }

    #[tokio::test]
    async fn test_per_entry_ttl() {
        let cache = cache();
        cache.insert_raw("short".to_string(), "v".to_string(), 1).await;
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
    }
}
