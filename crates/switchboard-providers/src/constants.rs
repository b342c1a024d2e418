//! Provider constants

// ============================================================================
// CACHE
// ============================================================================

/// Category served by cache adapters
pub const CACHE_CATEGORY: &str = "cache";

/// Default maximum number of entries held by the memory cache
pub const CACHE_DEFAULT_CAPACITY: u64 = 10_000;
