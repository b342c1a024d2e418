//! Discovery Scanner Tests

use std::fs;
use std::path::Path;
use switchboard_application::registry::AdapterRegistry;
use switchboard_infrastructure::discovery::AdapterScanner;
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, "// adapter\n").expect("write file");
}

fn sample_tree() -> TempDir {
    let temp = TempDir::new().expect("temp dir");
    let adapters = temp.path().join("shop").join("adapters");
    touch(&adapters.join("cache").join("redis.rs"));
    touch(&adapters.join("cache").join("memory.rs"));
    touch(&adapters.join("cache").join("mod.rs"));
    touch(&adapters.join("cache").join("_helpers.rs"));
    touch(&adapters.join("cache").join("README.md"));
    touch(&adapters.join("cache").join(".hidden.rs"));
    touch(&adapters.join("_internal").join("secret.rs"));
    touch(&adapters.join("vector_db").join("milvus.rs"));
    touch(&adapters.join("queue").join("nested").join("deep.rs"));
    temp
}

#[test]
fn test_scan_derives_descriptors() {
    let temp = sample_tree();
    let descriptors = AdapterScanner::new(temp.path().join("shop")).scan();

    let names: Vec<(&str, &str)> = descriptors
        .iter()
        .map(|d| (d.category.as_str(), d.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![("cache", "memory"), ("cache", "redis"), ("vector_db", "milvus")]
    );

    let milvus = &descriptors[2];
    assert_eq!(milvus.type_name, "VectorDb");
    assert_eq!(milvus.package, "shop");
    assert_eq!(milvus.module, "shop::adapters::vector_db::milvus");
    assert!(!milvus.enabled && !milvus.installed);
    assert!(
        milvus
            .source_path
            .as_ref()
            .is_some_and(|p| p.ends_with("adapters/vector_db/milvus.rs"))
    );
}

#[test]
fn test_scan_accepts_adapters_dir_directly() {
    let temp = sample_tree();
    let scanner = AdapterScanner::new(temp.path().join("shop").join("adapters"));
    assert_eq!(scanner.scan().len(), 3);
}

#[test]
fn test_missing_root_is_empty() {
    let scanner = AdapterScanner::new("/nonexistent/switchboard/root");
    assert!(scanner.scan().is_empty());
}

#[test]
fn test_crate_source_tree_uses_crate_name() {
    let temp = TempDir::new().expect("temp dir");
    let crate_dir = temp.path().join("my-adapters");
    touch(&crate_dir.join("src").join("adapters").join("cache").join("memory.rs"));

    let descriptors = AdapterScanner::new(crate_dir.join("src")).scan();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].package, "my_adapters");
    assert_eq!(descriptors[0].module, "my_adapters::adapters::cache::memory");
}

#[tokio::test]
async fn test_scan_async_matches_scan() {
    let temp = sample_tree();
    let scanner = AdapterScanner::new(temp.path().join("shop"));
    assert_eq!(scanner.scan_async().await, scanner.scan());
}

#[tokio::test]
async fn test_discover_into_is_idempotent() {
    let temp = sample_tree();
    let registry = AdapterRegistry::new();
    let scanner = AdapterScanner::new(temp.path().join("shop"));

    assert_eq!(scanner.discover_into(&registry).await, 3);
    assert_eq!(scanner.discover_into(&registry).await, 3);

    assert_eq!(registry.list_all().len(), 3);
    assert_eq!(registry.candidates("cache").len(), 2);
    assert!(registry.lock_count() >= 2);
}

#[test]
fn test_scan_dotted_package_directory() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path().join("project-1.2");
    touch(&root.join("adapters").join("cache").join("redis.rs"));

    let descriptors = AdapterScanner::new(root.clone()).scan();

    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].package, "project_1_2");
    assert_eq!(descriptors[0].module, "project_1_2::adapters::cache::redis");
    assert_eq!(descriptors[0].category, "cache");
}
