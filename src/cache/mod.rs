//! 对象缓存
//!
//! 通过注册表按名称选择后端（`moka` 进程内缓存或 `redis`），启动时由
//! `register::register_builtin_plugins` 注册内置实现。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端可用但读取失败（连接错误、反序列化失败等）
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// `ttl` 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    warn!("Failed to deserialize cached value for '{}': {}", key, e);
                    CacheResult::ExistsButNoValue
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert<T: Serialize + Sync>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => warn!("Failed to serialize value for cache key '{}': {}", key, e),
        }
    }
}

/// 为缓存后端生成注册表使用的构造函数 `plugin_constructor()`
///
/// 后端类型需要提供 `fn new(&CacheConfig) -> Result<Self>`（可以是 async）。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    (@ctor $name:literal, $ty:ty, |$config:ident| $build:expr) => {
        impl $ty {
            pub const PLUGIN_NAME: &'static str = $name;

            pub fn plugin_constructor() -> $crate::cache::register::ObjectCacheConstructor {
                fn build() -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let $config = &$crate::config::AppConfig::get().cache;
                        let cache: Box<dyn $crate::cache::ObjectCache> = Box::new($build);
                        Ok::<_, $crate::errors::SchoolSystemError>(cache)
                    })
                }
                std::sync::Arc::new(build)
            }
        }
    };
    ($name:literal, $ty:ty, async) => {
        $crate::declare_object_cache_plugin!(@ctor $name, $ty, |config| <$ty>::new(config).await?);
    };
    ($name:literal, $ty:ty) => {
        $crate::declare_object_cache_plugin!(@ctor $name, $ty, |config| <$ty>::new(config)?);
    };
}
