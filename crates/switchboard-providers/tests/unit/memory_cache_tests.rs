//! Memory cache adapter tests

use serde::{Deserialize, Serialize};
use std::time::Duration;
use switchboard_providers::ports::cache::CacheBackendExt;
use switchboard_providers::{CacheBackend, CacheEntryConfig, MemoryCache, MemoryCacheSettings};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    hits: u32,
}

#[tokio::test]
async fn test_memory_cache_basic_operations() {
    let cache = MemoryCache::default();

    cache
        .set_json("greeting", "\"hello\"", CacheEntryConfig::new())
        .await
        .unwrap();

    assert!(cache.exists("greeting").await.unwrap());
    assert_eq!(
        cache.get_json("greeting").await.unwrap().as_deref(),
        Some("\"hello\"")
    );
    assert_eq!(cache.size().await.unwrap(), 1);

    assert!(cache.delete("greeting").await.unwrap());
    assert!(!cache.delete("greeting").await.unwrap());
    assert!(cache.get_json("greeting").await.unwrap().is_none());
}

#[tokio::test]
async fn test_memory_cache_typed_values() {
    let cache = MemoryCache::default();
    let session = Session {
        user: "ada".to_string(),
        hits: 3,
    };

    cache
        .set("session:1", &session, CacheEntryConfig::new())
        .await
        .unwrap();
    let loaded: Option<Session> = cache.get("session:1").await.unwrap();

    assert_eq!(loaded, Some(session));
}

#[tokio::test]
async fn test_memory_cache_clear() {
    let cache = MemoryCache::default();
    for key in ["a", "b", "c"] {
        cache.set_json(key, "1", CacheEntryConfig::new()).await.unwrap();
    }

    cache.clear().await.unwrap();

    assert_eq!(cache.size().await.unwrap(), 0);
    assert!(!cache.exists("a").await.unwrap());
}

#[tokio::test]
async fn test_memory_cache_entry_ttl_expires() {
    let cache = MemoryCache::default();
    let short = CacheEntryConfig::new().with_ttl(Duration::from_millis(50));

    cache.set_json("short", "1", short).await.unwrap();
    cache.set_json("long", "2", CacheEntryConfig::new()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(cache.get_json("short").await.unwrap().is_none());
    assert!(cache.get_json("long").await.unwrap().is_some());
}

#[tokio::test]
async fn test_memory_cache_overwrite_applies_new_ttl() {
    let cache = MemoryCache::default();
    let short = CacheEntryConfig::new().with_ttl(Duration::from_millis(50));

    cache.set_json("shrinks", "1", CacheEntryConfig::new()).await.unwrap();
    cache.set_json("shrinks", "2", short.clone()).await.unwrap();
    cache.set_json("grows", "1", short).await.unwrap();
    cache.set_json("grows", "2", CacheEntryConfig::new()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(cache.get_json("shrinks").await.unwrap().is_none());
    assert_eq!(cache.get_json("grows").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_memory_cache_default_ttl_from_settings() {
    let cache = MemoryCache::new(MemoryCacheSettings {
        ttl_secs: Some(0),
        ..MemoryCacheSettings::default()
    });

    cache.set_json("gone", "1", CacheEntryConfig::new()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(cache.get_json("gone").await.unwrap().is_none());
}

#[test]
fn test_memory_cache_settings_defaults() {
    let settings = MemoryCacheSettings::default();
    assert_eq!(settings.max_capacity, 10_000);
    assert!(settings.ttl_secs.is_none());

    let partial: MemoryCacheSettings =
        serde_json::from_value(serde_json::json!({ "ttl_secs": 30 })).unwrap();
    assert_eq!(partial.max_capacity, 10_000);
    assert_eq!(partial.ttl_secs, Some(30));
}
