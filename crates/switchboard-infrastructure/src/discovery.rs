//! Discovery Scanner
//!
//! Turns the directory convention into descriptors:
//!
//! ```text
//! <root>/adapters/
//! ├── cache/
//! │   ├── memory.rs      → cache/memory
//! │   ├── redis.rs       → cache/redis
//! │   ├── _shared.rs     (reserved prefix, skipped)
//! │   └── mod.rs         (module index, skipped)
//! └── queue/
//!     └── rabbitmq.rs    → queue/rabbitmq
//! ```
//!
//! Discovery is optional: a missing root yields no descriptors, never an error.

use crate::constants::DISCOVERY_MAX_DEPTH;
use std::path::{Path, PathBuf};
use switchboard_application::registry::AdapterRegistry;
use switchboard_domain::constants::{
    ADAPTERS_DIR, MODULE_INDEX_STEM, MODULE_PATH_SEGMENTS, RESERVED_PREFIX, SOURCE_EXTENSION,
};
use switchboard_domain::value_objects::{
    AdapterDescriptor, normalize_module_path, type_name_for_category,
};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory name of a Rust crate's source tree
const SOURCE_DIR: &str = "src";

/// Scans an adapters root for candidate implementations
#[derive(Debug, Clone)]
pub struct AdapterScanner {
    root: PathBuf,
}

impl AdapterScanner {
    /// Scanner for a root directory
    ///
    /// The root is either a directory containing `adapters/` or the
    /// `adapters` directory itself.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding one subdirectory per category
    pub fn adapters_dir(&self) -> PathBuf {
        if self.root.file_name().is_some_and(|name| name == ADAPTERS_DIR) {
            self.root.clone()
        } else {
            self.root.join(ADAPTERS_DIR)
        }
    }

    /// Walk the adapters directory and derive descriptors
    pub fn scan(&self) -> Vec<AdapterDescriptor> {
        let adapters_dir = self.adapters_dir();
        if !adapters_dir.is_dir() {
            debug!(dir = %adapters_dir.display(), "Adapters directory not found, nothing discovered");
            return Vec::new();
        }

        let mut descriptors: Vec<AdapterDescriptor> = WalkDir::new(&adapters_dir)
            .min_depth(1)
            .max_depth(DISCOVERY_MAX_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_ignored(entry))
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.depth() == DISCOVERY_MAX_DEPTH && entry.file_type().is_file())
            .filter_map(|entry| descriptor_for_path(entry.path()))
            .collect();

        descriptors.dedup_by(|a, b| a.registry_key() == b.registry_key());
        debug!(
            dir = %adapters_dir.display(),
            count = descriptors.len(),
            "Adapter discovery finished"
        );
        descriptors
    }

    /// [`scan`](Self::scan) on the blocking pool
    pub async fn scan_async(&self) -> Vec<AdapterDescriptor> {
        let scanner = self.clone();
        match tokio::task::spawn_blocking(move || scanner.scan()).await {
            Ok(descriptors) => descriptors,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Adapter discovery task failed");
                Vec::new()
            }
        }
    }

    /// Scan and merge the result into a registry
    ///
    /// Returns the number of descriptors merged.
    pub async fn discover_into(&self, registry: &AdapterRegistry) -> usize {
        let descriptors = self.scan_async().await;
        registry.merge(descriptors)
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with(RESERVED_PREFIX) || name.starts_with('.')
}

/// Derive a descriptor from `.../<package>/adapters/<category>/<provider>.rs`
///
/// Returns `None` for module indexes, foreign extensions, and categories
/// that do not survive module path normalization (e.g. `vector-db`).
pub fn descriptor_for_path(path: &Path) -> Option<AdapterDescriptor> {
    if path.extension().is_none_or(|ext| ext != SOURCE_EXTENSION) {
        return None;
    }
    let provider = path.file_stem()?.to_str()?;
    if provider == MODULE_INDEX_STEM || provider.starts_with(RESERVED_PREFIX) {
        return None;
    }
    let category_dir = path.parent()?;
    let category = category_dir.file_name()?.to_str()?;
    let adapters_dir = category_dir.parent()?;
    if adapters_dir.file_name().is_none_or(|name| name != ADAPTERS_DIR) {
        return None;
    }
    let package = owning_package(adapters_dir.parent()?)?;

    let segments = [package.as_str(), ADAPTERS_DIR, category, provider];
    debug_assert_eq!(segments.len(), MODULE_PATH_SEGMENTS);
    let module = normalize_module_path(&segments.join("::"));

    // Counted from the end: `<package>::adapters::<category>::<provider>`
    let module_category = module.rsplit("::").nth(1).unwrap_or_default();
    if module_category != category.to_lowercase() {
        warn!(
            path = %path.display(),
            module = %module,
            "Discarding adapter whose category does not match its directory"
        );
        return None;
    }

    Some(
        AdapterDescriptor::new(
            provider,
            type_name_for_category(category),
            category,
            package,
            module,
        )
        .with_source_path(path),
    )
}

/// Package owning an `adapters/` directory
///
/// Inside a crate's `src/` the crate directory names the package, so
/// discovered module paths line up with `module_path!()` of compiled adapters.
/// Dots and dashes become underscores so the package stays one path segment.
fn owning_package(dir: &Path) -> Option<String> {
    let name = dir.file_name()?.to_str()?;
    let package = if name == SOURCE_DIR {
        dir.parent()?.file_name()?.to_str()?
    } else {
        name
    };
    Some(package.replace(['-', '.'], "_"))
}
