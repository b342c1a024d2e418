//! Cache Adapters
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`MemoryCache`] | Local | In-process cache with capacity bound and TTL |
//! | [`NullCache`] | Testing | Accepts writes, stores nothing |
//!
//! Pick one in the adapters manifest with `cache: memory` or `cache: null`.

#[cfg(feature = "cache-memory")]
pub mod memory;
pub mod null;

#[cfg(feature = "cache-memory")]
pub use memory::{MemoryCache, MemoryCacheSettings};
pub use null::NullCache;

use crate::ports::cache::CacheBackend;
use std::sync::Arc;
use switchboard_domain::ports::Adapter;

/// View a resolved `cache` adapter through the [`CacheBackend`] contract
///
/// Returns `None` when the instance is not one of this crate's cache adapters.
pub fn cache_backend(adapter: Arc<dyn Adapter>) -> Option<Arc<dyn CacheBackend>> {
    #[cfg(feature = "cache-memory")]
    let adapter = match adapter.downcast_arc::<MemoryCache>() {
        Ok(memory) => return Some(memory as Arc<dyn CacheBackend>),
        Err(other) => other,
    };
    adapter
        .downcast_arc::<NullCache>()
        .ok()
        .map(|null| null as Arc<dyn CacheBackend>)
}
