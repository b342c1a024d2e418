//! Unit tests for adapter descriptors

use std::collections::HashSet;
use switchboard_domain::value_objects::{AdapterDescriptor, AdapterMetadata};
use uuid::Uuid;

fn redis() -> AdapterDescriptor {
    AdapterDescriptor::new(
        "redis",
        "Cache",
        "cache",
        "myapp",
        "myapp::adapters::cache::redis",
    )
}

#[test]
fn test_equality_ignores_flags_and_metadata() {
    let mut enabled = redis();
    enabled.enabled = true;
    enabled.installed = true;
    let with_metadata = redis().with_metadata(AdapterMetadata::new(
        Uuid::from_u128(7),
        "Redis Cache",
        "cache",
        "redis",
    ));

    assert_eq!(redis(), enabled);
    assert_eq!(redis(), with_metadata);
}

#[test]
fn test_equality_uses_identity_fields() {
    let mut other_package = redis();
    other_package.package = "other".to_string();
    assert_ne!(redis(), other_package);

    let mut other_module = redis();
    other_module.module = "other::adapters::cache::redis".to_string();
    assert_ne!(redis(), other_module);
}

#[test]
fn test_hash_consistent_with_equality() {
    let mut set = HashSet::new();
    set.insert(redis());
    let mut enabled = redis();
    enabled.enabled = true;
    set.insert(enabled);
    assert_eq!(set.len(), 1);
}

#[test]
fn test_fingerprint_includes_metadata_id() {
    let first = redis().with_metadata(AdapterMetadata::new(Uuid::from_u128(1), "a", "cache", "redis"));
    let second = redis().with_metadata(AdapterMetadata::new(Uuid::from_u128(2), "a", "cache", "redis"));

    assert_eq!(first, second);
    assert_ne!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint(), first.clone().fingerprint());
}

#[test]
fn test_registry_key_normalizes_module() {
    let mut descriptor = redis();
    descriptor.module = "MyApp.adapters.cache.redis".to_string();
    assert_eq!(
        descriptor.registry_key(),
        ("cache".to_string(), "myapp::adapters::cache::redis".to_string())
    );
}

#[test]
fn test_matches_provider_case_insensitive() {
    assert!(redis().matches_provider("Redis"));
    assert!(redis().matches_provider(" redis "));
    assert!(!redis().matches_provider("memory"));
}
