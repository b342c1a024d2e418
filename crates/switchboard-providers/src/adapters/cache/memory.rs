//! Memory cache adapter
//!
//! Concurrent in-process cache built on moka, bounded by entry count.
//! Entries expire after their own TTL, or the configured default.
//!
//! ```toml
//! [adapters.cache]
//! max_capacity = 5000
//! ttl_secs = 300
//! ```

use crate::constants::{CACHE_CATEGORY, CACHE_DEFAULT_CAPACITY};
use crate::ports::cache::{CacheBackend, CacheEntryConfig};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use switchboard_application::catalog::{ADAPTERS, AdapterEntry, settings_from_value};
use switchboard_domain::error::Result;
use switchboard_domain::ports::Adapter;
use switchboard_domain::value_objects::{AdapterCapability, AdapterMetadata, AdapterStatus};
use tracing::debug;
use uuid::Uuid;

const MEMORY_CACHE_MODULE_ID: Uuid = Uuid::from_u128(0x5b1f_6a0e_8c2d_4e71_9f03_c0f1_0000_0101);

/// Settings paired with [`MemoryCache`], read from `[adapters.cache]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemoryCacheSettings {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Default time to live in seconds; entries never expire when unset
    pub ttl_secs: Option<u64>,
}

impl Default for MemoryCacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: CACHE_DEFAULT_CAPACITY,
            ttl_secs: None,
        }
    }
}

#[derive(Clone)]
struct CachedValue {
    json: Arc<str>,
    ttl: Option<Duration>,
}

struct EntryExpiry {
    default_ttl: Option<Duration>,
}

impl Expiry<String, CachedValue> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl.or(self.default_ttl)
    }

    // Overwrites restart the clock with the new entry's TTL
    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl.or(self.default_ttl)
    }
}

/// In-process cache
#[derive(Clone)]
pub struct MemoryCache {
    cache: Cache<String, CachedValue>,
    settings: MemoryCacheSettings,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(MemoryCacheSettings::default())
    }
}

impl MemoryCache {
    /// Create a cache from its settings
    pub fn new(settings: MemoryCacheSettings) -> Self {
        let cache = Cache::builder()
            .max_capacity(settings.max_capacity)
            .expire_after(EntryExpiry {
                default_ttl: settings.ttl_secs.map(Duration::from_secs),
            })
            .build();
        Self { cache, settings }
    }

    /// Settings the cache was built with
    pub fn settings(&self) -> &MemoryCacheSettings {
        &self.settings
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).await.map(|value| value.json.to_string()))
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let value = CachedValue {
            json: Arc::from(value),
            ttl: config.ttl,
        };
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn size(&self) -> Result<usize> {
        // entry_count lags until pending maintenance runs
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl Adapter for MemoryCache {
    fn category(&self) -> &str {
        CACHE_CATEGORY
    }

    fn provider_name(&self) -> &str {
        "memory"
    }

    async fn init(&self) -> Result<()> {
        debug!(
            max_capacity = self.settings.max_capacity,
            ttl_secs = ?self.settings.ttl_secs,
            "Memory cache ready"
        );
        Ok(())
    }

    fn metadata() -> Option<AdapterMetadata> {
        Some(memory_cache_metadata())
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("settings", &self.settings)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

fn memory_cache_metadata() -> AdapterMetadata {
    AdapterMetadata::new(MEMORY_CACHE_MODULE_ID, "Memory Cache", CACHE_CATEGORY, "memory")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_status(AdapterStatus::Stable)
        .with_capability(AdapterCapability::AsyncOperations)
        .with_capability(AdapterCapability::Ttl)
        .with_required_package("moka")
        .with_description("In-process cache with capacity bound and TTL")
        .with_settings_type("MemoryCacheSettings")
}

#[linkme::distributed_slice(ADAPTERS)]
pub static MEMORY_CACHE_ADAPTER: AdapterEntry = AdapterEntry {
    category: CACHE_CATEGORY,
    name: "memory",
    type_name: "Cache",
    package: env!("CARGO_PKG_NAME"),
    module: module_path!(),
    source_path: file!(),
    description: "In-process cache (moka)",
    metadata: Some(memory_cache_metadata),
    settings: Some(settings_from_value::<MemoryCacheSettings>),
    factory: |ctx| {
        let settings = ctx
            .settings_as::<MemoryCacheSettings>()
            .map(|settings| settings.as_ref().clone())
            .unwrap_or_default();
        Ok(Arc::new(MemoryCache::new(settings)))
    },
};
