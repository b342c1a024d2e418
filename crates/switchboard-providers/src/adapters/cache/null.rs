//! Null cache adapter
//!
//! Accepts every write and stores nothing. Useful for disabling caching
//! through the manifest without touching call sites.

use crate::constants::CACHE_CATEGORY;
use crate::ports::cache::{CacheBackend, CacheEntryConfig};
use async_trait::async_trait;
use std::sync::Arc;
use switchboard_application::catalog::{ADAPTERS, AdapterEntry};
use switchboard_domain::error::Result;
use switchboard_domain::ports::Adapter;
use switchboard_domain::value_objects::{AdapterMetadata, AdapterStatus};
use uuid::Uuid;

const NULL_CACHE_MODULE_ID: Uuid = Uuid::from_u128(0x5b1f_6a0e_8c2d_4e71_9f03_c0f1_0000_0102);

/// Cache that never holds anything
#[derive(Debug, Clone, Default)]
pub struct NullCache;

impl NullCache {
    /// Create a null cache
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for NullCache {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn size(&self) -> Result<usize> {
        Ok(0)
    }

    fn backend_name(&self) -> &str {
        "null"
    }
}

#[async_trait]
impl Adapter for NullCache {
    fn category(&self) -> &str {
        CACHE_CATEGORY
    }

    fn provider_name(&self) -> &str {
        "null"
    }

    fn metadata() -> Option<AdapterMetadata> {
        Some(null_cache_metadata())
    }
}

fn null_cache_metadata() -> AdapterMetadata {
    AdapterMetadata::new(NULL_CACHE_MODULE_ID, "Null Cache", CACHE_CATEGORY, "null")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_status(AdapterStatus::Stable)
        .with_description("Cache that stores nothing")
}

#[linkme::distributed_slice(ADAPTERS)]
pub static NULL_CACHE_ADAPTER: AdapterEntry = AdapterEntry {
    category: CACHE_CATEGORY,
    name: "null",
    type_name: "Cache",
    package: env!("CARGO_PKG_NAME"),
    module: module_path!(),
    source_path: file!(),
    description: "No-op cache",
    metadata: Some(null_cache_metadata),
    settings: None,
    factory: |_ctx| Ok(Arc::new(NullCache::new())),
};
