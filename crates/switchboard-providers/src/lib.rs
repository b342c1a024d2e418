//! Provider Implementations - Switchboard
//!
//! Concrete adapters living under the `adapters/<category>/<provider>.rs`
//! convention. Each one submits an [`AdapterEntry`] to the catalog, so linking
//! this crate is enough to make its providers resolvable.
//!
//! ## Available Adapters
//!
//! | Category | Provider | Description |
//! |----------|----------|-------------|
//! | cache | memory | In-process cache backed by moka (feature `cache-memory`) |
//! | cache | null | Stores nothing, every lookup misses |
//!
//! [`AdapterEntry`]: switchboard_application::catalog::AdapterEntry

pub mod adapters;
pub mod constants;
pub mod ports;

pub use adapters::cache::{NullCache, cache_backend};
#[cfg(feature = "cache-memory")]
pub use adapters::cache::{MemoryCache, MemoryCacheSettings};
pub use ports::cache::{CacheBackend, CacheEntryConfig};
