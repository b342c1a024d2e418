//! Adapters Manifest Tests

use std::fs;
use std::path::Path;
use switchboard_domain::error::Error;
use switchboard_infrastructure::config::{load_manifest, manifest_path, parse_manifest};
use tempfile::TempDir;

#[test]
fn test_parse_normalizes_entries() {
    let selections = parse_manifest(
        "Cache: Redis\n' Queue ': '  RabbitMQ  '\nstorage: ~\n",
        Path::new("adapters.yml"),
    )
    .expect("parsed");

    assert_eq!(selections.len(), 2);
    assert_eq!(selections.get("cache"), Some("redis"));
    assert_eq!(selections.get("queue"), Some("rabbitmq"));
    assert_eq!(selections.get("storage"), None);
}

#[test]
fn test_parse_empty_content() {
    let selections = parse_manifest("   \n", Path::new("adapters.yml")).expect("parsed");
    assert!(selections.is_empty());
}

#[test]
fn test_parse_rejects_nested_content() {
    let err = parse_manifest("cache:\n  provider: redis\n", Path::new("adapters.yml"))
        .expect_err("nested mapping");
    assert!(matches!(err, Error::ConfigurationMalformed { .. }));

    assert!(parse_manifest("- redis\n- memory\n", Path::new("adapters.yml")).is_err());
}

#[test]
fn test_manifest_path_prefers_yml() {
    let temp = TempDir::new().expect("temp dir");
    assert!(manifest_path(temp.path()).is_none());

    fs::write(temp.path().join("adapters.yaml"), "cache: memory\n").expect("write");
    assert_eq!(
        manifest_path(temp.path()),
        Some(temp.path().join("adapters.yaml"))
    );

    fs::write(temp.path().join("adapters.yml"), "cache: redis\n").expect("write");
    assert_eq!(
        manifest_path(temp.path()),
        Some(temp.path().join("adapters.yml"))
    );
}

#[tokio::test]
async fn test_load_manifest_first_found_wins() {
    let temp = TempDir::new().expect("temp dir");
    fs::write(temp.path().join("adapters.yml"), "cache: redis\n").expect("write");
    fs::write(temp.path().join("adapters.yaml"), "cache: memory\n").expect("write");

    let selections = load_manifest(temp.path()).await;
    assert_eq!(selections.get("cache"), Some("redis"));
}

#[tokio::test]
async fn test_load_manifest_is_tolerant() {
    let temp = TempDir::new().expect("temp dir");
    assert!(load_manifest(temp.path()).await.is_empty());
    assert!(load_manifest(Path::new("/nonexistent/settings")).await.is_empty());

    fs::write(temp.path().join("adapters.yml"), "cache: [unclosed\n").expect("write");
    assert!(load_manifest(temp.path()).await.is_empty());
}
