//! Null cache adapter tests

use switchboard_providers::{CacheBackend, CacheEntryConfig, NullCache};

#[tokio::test]
async fn test_null_cache_stores_nothing() {
    let cache = NullCache::new();

    cache.set_json("key", "1", CacheEntryConfig::new()).await.unwrap();

    assert!(cache.get_json("key").await.unwrap().is_none());
    assert!(!cache.exists("key").await.unwrap());
    assert!(!cache.delete("key").await.unwrap());
    assert_eq!(cache.size().await.unwrap(), 0);
    assert_eq!(cache.backend_name(), "null");
}
