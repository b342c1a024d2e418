//! Cache Port
//!
//! Contract shared by every adapter of the `cache` category. Values are
//! stored as JSON; [`CacheBackendExt`] adds typed access on top.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use switchboard_domain::error::Result;

/// Per-entry options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntryConfig {
    /// Time to live, falling back to the backend default when unset
    pub ttl: Option<Duration>,
}

impl CacheEntryConfig {
    /// Options with the backend defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time to live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Key/value cache backend
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Raw JSON stored under a key
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Store raw JSON under a key
    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()>;

    /// Remove a key, returning whether it was present
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Whether a key is present
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Remove every entry
    async fn clear(&self) -> Result<()>;

    /// Number of entries
    async fn size(&self) -> Result<usize>;

    /// Backend name for diagnostics
    fn backend_name(&self) -> &str;
}

/// Typed helpers over [`CacheBackend`]
#[async_trait]
pub trait CacheBackendExt: CacheBackend {
    /// Deserialize the value stored under a key
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.get_json(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value
    async fn set<T: Serialize + Sync>(&self, key: &str, value: &T, config: CacheEntryConfig) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.set_json(key, &json, config).await
    }
}

impl<B: CacheBackend + ?Sized> CacheBackendExt for B {}
