//! Dependency Container Tests

use std::sync::Arc;
use switchboard_domain::error::Error;
use switchboard_infrastructure::container::{Container, ContainerKey};

#[derive(Debug, Clone, PartialEq)]
struct Endpoint(String);

#[derive(Debug)]
struct Pool {
    size: usize,
}

#[test]
fn test_set_and_get() {
    let container = Container::new();
    container.set("endpoint", Endpoint("db:5432".to_string()));

    let endpoint: Endpoint = container.get("endpoint").expect("stored");
    assert_eq!(endpoint, Endpoint("db:5432".to_string()));
    assert!(container.contains("endpoint"));
    assert_eq!(container.len(), 1);
}

#[test]
fn test_set_overwrites() {
    let container = Container::new();
    container.set("size", 1_usize);
    container.set("size", 2_usize);
    assert_eq!(container.get::<usize, _>("size").expect("stored"), 2);
}

#[test]
fn test_missing_and_mismatched() {
    let container = Container::new();
    assert!(matches!(
        container.get::<usize, _>("absent"),
        Err(Error::DependencyMissing { .. })
    ));

    container.set("size", 1_usize);
    assert!(matches!(
        container.get::<String, _>("size"),
        Err(Error::ContainerTypeMismatch { .. })
    ));
    assert!(container.try_get::<String, _>("size").is_none());
}

#[tokio::test]
async fn test_deferred_value_requires_async_get() {
    let container = Container::new();
    container.set_deferred("pool", async { Ok(Arc::new(Pool { size: 4 })) });

    assert!(matches!(
        container.get::<Arc<Pool>, _>("pool"),
        Err(Error::AsyncValueRequested { .. })
    ));

    let pool: Arc<Pool> = container.get_async("pool").await.expect("awaited");
    assert_eq!(pool.size, 4);

    // Resolved deferred slots become ready
    let again: Arc<Pool> = container.get("pool").expect("ready now");
    assert!(Arc::ptr_eq(&pool, &again));
}

#[tokio::test]
async fn test_failed_deferred_value() {
    let container = Container::new();
    container.set_deferred::<_, usize, _>("size", async { Err(Error::internal("unreachable host")) });

    let err = container.get_async::<usize, _>("size").await.expect_err("failed");
    assert!(err.to_string().contains("unreachable host"));
}

#[test]
fn test_get_or_insert_with_constructs_once() {
    let container = Container::new();
    let mut calls = 0;
    for _ in 0..3 {
        let value = container
            .get_or_insert_with("answer", || {
                calls += 1;
                Ok(42_u32)
            })
            .expect("value");
        assert_eq!(value, 42);
    }
    assert_eq!(calls, 1);
}

#[test]
fn test_get_or_insert_with_replaces_placeholder() {
    let container = Container::new();
    container.set_placeholder("answer");

    let value = container
        .get_or_insert_with("answer", || Ok(7_u32))
        .expect("constructed");
    assert_eq!(value, 7);
    assert!(!container.is_placeholder("answer"));
}

#[test]
fn test_get_or_insert_with_error_leaves_slot_empty() {
    let container = Container::new();
    let result = container.get_or_insert_with::<u32, _, _>("answer", || {
        Err(Error::internal("factory failed"))
    });
    assert!(result.is_err());
    assert!(!container.contains("answer"));
}

#[test]
fn test_type_keyed_registration_and_inject() {
    let container = Container::new();
    container.register(Arc::new(Pool { size: 8 }));
    container.register(Arc::new(Endpoint("db".to_string())));

    let description = container
        .inject(|(pool, endpoint): (Arc<Pool>, Arc<Endpoint>)| format!("{}x{}", endpoint.0, pool.size))
        .expect("injected");
    assert_eq!(description, "dbx8");
    assert!(container.contains(ContainerKey::of::<Pool>()));
}

#[test]
fn test_inject_missing_dependency() {
    let container = Container::new();
    let result = container.inject(|(pool,): (Arc<Pool>,)| pool.size);
    assert!(matches!(result, Err(Error::DependencyMissing { .. })));
}

#[test]
fn test_remove_and_clear() {
    let container = Container::new();
    container.set("a", 1_u8);
    container.set("b", 2_u8);

    assert!(container.remove("a"));
    assert!(!container.remove("a"));
    container.clear();
    assert!(container.is_empty());
}

#[test]
fn test_global_is_shared() {
    let one = Container::global();
    let two = Container::global();
    assert!(Arc::ptr_eq(&one, &two));
}
