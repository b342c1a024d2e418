//! Single-category resolution

use crate::fixtures::{
    RedisCache, SimpleSearch, app_config, config_for, settings_dir, write_adapter_source,
};
use tempfile::TempDir;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use switchboard_application::builtins::{ConfigAdapter, TracingLogger};
use switchboard_domain::error::Error;
use switchboard_domain::ports::Adapter;
use switchboard_infrastructure::resolver::AdapterSession;

#[tokio::test]
async fn test_single_candidate_resolves_without_manifest() {
    let settings = settings_dir(None);
    let session = AdapterSession::new(app_config(settings.path()));

    let search = session
        .resolve_as::<SimpleSearch>("search")
        .await
        .expect("unambiguous default");
    assert_eq!(search.provider_name(), "simple");
}

#[tokio::test]
async fn test_manifest_selects_among_siblings() {
    let settings = settings_dir(Some("cache: redis\n"));
    let session = AdapterSession::new(app_config(settings.path()));

    let cache = session.resolve("CACHE").await.expect("redis selected");
    assert_eq!(cache.provider_name(), "redis");
    assert!(cache.downcast_arc::<RedisCache>().is_ok());
}

#[tokio::test]
async fn test_yaml_extension_is_accepted() {
    let settings = settings_dir(None);
    std::fs::write(settings.path().join("adapters.yaml"), "cache: Memory\n").expect("manifest");
    let session = AdapterSession::new(app_config(settings.path()));

    let cache = session.resolve("cache").await.expect("memory selected");
    assert_eq!(cache.provider_name(), "memory");
}

#[tokio::test]
async fn test_ambiguous_category_is_not_found() {
    let settings = settings_dir(None);
    let session = AdapterSession::new(app_config(settings.path()));

    let err = session.resolve("cache").await.expect_err("two candidates");
    match err {
        Error::DescriptorNotFound {
            category,
            manifest_key,
        } => {
            assert_eq!(category, "cache");
            assert_eq!(manifest_key, "cache");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unknown_provider_is_not_found() {
    let settings = settings_dir(Some("cache: nonexistent\n"));
    let session = AdapterSession::new(app_config(settings.path()));

    let err = session.resolve("cache").await.expect_err("unknown provider");
    assert!(matches!(err, Error::DescriptorNotFound { .. }));
    assert!(err.to_string().contains("'cache: <provider>'"));
}

#[tokio::test]
async fn test_malformed_manifest_means_no_selections() {
    let settings = settings_dir(Some("cache: [redis, memory\n"));
    let session = AdapterSession::new(app_config(settings.path()));

    // Unparsable manifest: the single-candidate category still defaults
    assert!(session.resolve("search").await.is_ok());
    assert!(session.resolve("cache").await.is_err());
}

#[tokio::test]
async fn test_null_manifest_entry_is_dropped() {
    let settings = settings_dir(Some("cache: ~\nsearch: simple\n"));
    let session = AdapterSession::new(app_config(settings.path()));

    assert!(session.resolve("search").await.is_ok());
    assert!(matches!(
        session.resolve("cache").await,
        Err(Error::DescriptorNotFound { .. })
    ));
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let settings = settings_dir(Some("cache: redis\n"));
    let session = AdapterSession::new(app_config(settings.path()));

    let first = session.resolve_as::<RedisCache>("cache").await.expect("first");
    let second = session.resolve_as::<RedisCache>("cache").await.expect("second");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.inits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_settings_attached_to_shared_config() {
    let settings = settings_dir(Some("cache: redis\n"));
    let config = config_for(settings.path())
        .with_adapter_settings("cache", json!({ "url": "redis://cache.internal:6380" }))
        .build();
    let session = AdapterSession::new(config);

    let cache = session.resolve_as::<RedisCache>("cache").await.expect("redis");
    assert_eq!(cache.url, "redis://cache.internal:6380");

    let attached = session
        .shared_config()
        .settings_as::<crate::fixtures::RedisSettings>("cache")
        .expect("settings attached");
    assert_eq!(attached.url, "redis://cache.internal:6380");
}

#[tokio::test]
async fn test_malformed_settings_are_swallowed() {
    let settings = settings_dir(Some("cache: redis\n"));
    let config = config_for(settings.path())
        .with_adapter_settings("cache", json!({ "url": 5 }))
        .build();
    let session = AdapterSession::new(config);

    let cache = session.resolve_as::<RedisCache>("cache").await.expect("redis");
    assert_eq!(cache.url, "redis://localhost:6379");
    assert!(session.shared_config().settings("cache").is_none());
}

#[tokio::test]
async fn test_init_failure_is_installation_failed() {
    let settings = settings_dir(None);
    let session = AdapterSession::new(app_config(settings.path()));

    let err = session.resolve("broken").await.expect_err("init fails");
    assert!(matches!(err, Error::InstallationFailed { ref category, .. } if category == "broken"));
    assert!(!err.is_soft_failure());
}

#[tokio::test]
async fn test_factory_failure_is_installation_failed() {
    let settings = settings_dir(None);
    let session = AdapterSession::new(app_config(settings.path()));

    let err = session.resolve("exploding").await.expect_err("factory fails");
    assert!(matches!(err, Error::InstallationFailed { .. }));
    assert!(err.to_string().contains("constructing 'factory' failed"));
}

#[tokio::test]
async fn test_discovered_without_implementation_is_not_installed() {
    let settings = settings_dir(None);
    let root = tempfile::TempDir::new().expect("root");
    let app = root.path().join("app");
    crate::fixtures::write_adapter_source(&app, "ghost", "phantom");
    let config = config_for(settings.path()).with_adapters_root(&app).build();
    let session = AdapterSession::new(config);

    let err = session.resolve("ghost").await.expect_err("no implementation linked");
    match err {
        Error::AdapterNotInstalled { category, module } => {
            assert_eq!(category, "ghost");
            assert_eq!(module, "app::adapters::ghost::phantom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_builtins_resolve_before_discovery() {
    let settings = settings_dir(None);
    let session = AdapterSession::new(app_config(settings.path()));

    let config = session.resolve_as::<ConfigAdapter>("config").await.expect("config");
    assert!(Arc::ptr_eq(&config, &session.shared_config()));

    let logger = session.resolve_as::<TracingLogger>("logger").await.expect("logger");
    logger.info("logger resolved");
}

#[tokio::test]
async fn test_testing_mode_returns_inert_adapter() {
    let settings = settings_dir(Some("cache: redis\n"));
    let config = config_for(settings.path()).with_testing(true).build();
    let session = AdapterSession::new(config);

    let cache = session.resolve("cache").await.expect("inert");
    assert_eq!(cache.provider_name(), "inert");
    assert_eq!(cache.category(), "cache");
    assert!(session.registry().list_all().is_empty());

    let anything = session.resolve("nonexistent").await.expect("inert");
    assert_eq!(anything.provider_name(), "inert");
}

#[tokio::test]
async fn test_try_resolve_unknown_is_none() {
    let settings = settings_dir(None);
    let session = AdapterSession::new(app_config(settings.path()));

    assert!(session.try_resolve("nonexistent", None).await.is_none());
    assert!(session.try_resolve("cache", Some("nonexistent")).await.is_none());
}

#[tokio::test]
async fn test_try_resolve_specific_provider() {
    let settings = settings_dir(Some("cache: redis\n"));
    let session = AdapterSession::new(app_config(settings.path()));

    let memory = session
        .try_resolve("cache", Some("memory"))
        .await
        .expect("memory provider");
    assert_eq!(memory.provider_name(), "memory");

    let enabled = session.resolve("cache").await.expect("enabled");
    assert_eq!(enabled.provider_name(), "redis");

    let same = session.try_resolve("cache", Some("REDIS")).await.expect("redis");
    assert!(Arc::ptr_eq(&enabled, &same));
}

#[tokio::test]
async fn test_get_class_does_not_instantiate() {
    let settings = settings_dir(Some("cache: redis\n"));
    let session = AdapterSession::new(app_config(settings.path()));

    let entry = session.get_class("cache", None).await.expect("enabled entry");
    assert_eq!(entry.name, "redis");
    assert!(!session.container().contains(entry.identity()));

    let memory = session.get_class("cache", Some("Memory")).await.expect("sibling entry");
    assert_eq!(memory.name, "memory");

    assert!(matches!(
        session.get_class("queue", None).await,
        Err(Error::DescriptorNotFound { .. })
    ));
}

#[tokio::test]
async fn test_late_discovery_scans_configured_roots() {
    let settings = settings_dir(None);
    let project = TempDir::new().expect("project dir");
    write_adapter_source(project.path(), "ghost", "phantom");
    let session = AdapterSession::builder()
        .with_config(config_for(settings.path()).with_late_discovery(true).build())
        .with_late_discovery_roots([project.path()])
        .build();

    let err = session.resolve("ghost").await.expect_err("no linked entry");
    match err {
        Error::AdapterNotInstalled { category, module } => {
            assert_eq!(category, "ghost");
            assert!(module.ends_with("::adapters::ghost::phantom"), "{module}");
        }
        other => panic!("unexpected error: {other}"),
    }
    let listed = session.list_all().await.expect("configured");
    assert!(listed.iter().any(|d| d.category == "ghost" && d.name == "phantom"));
}

#[tokio::test]
async fn test_late_discovery_disabled_ignores_roots() {
    let settings = settings_dir(None);
    let project = TempDir::new().expect("project dir");
    write_adapter_source(project.path(), "ghost", "phantom");
    let session = AdapterSession::builder()
        .with_config(app_config(settings.path()))
        .with_late_discovery_roots([project.path()])
        .build();

    let err = session.resolve("ghost").await.expect_err("not scanned");
    assert!(matches!(err, Error::DescriptorNotFound { .. }), "{err}");
    assert!(session.registry().get_by_category("ghost").is_none());
}
