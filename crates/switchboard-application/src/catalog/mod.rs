//! Adapter Catalog
//!
//! Compile-time self-registration of adapter implementations.
//! Each implementation submits an [`AdapterEntry`] into the [`ADAPTERS`]
//! distributed slice; the catalog is the Rust stand-in for importing a module
//! by path.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Adapter Registration Flow                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(ADAPTERS)]   │
//! │                        static ENTRY: AdapterEntry = ...         │
//! │                              ↓                                  │
//! │  2. Registry seeds:    descriptors from ADAPTERS.iter()         │
//! │                              ↓                                  │
//! │  3. Manifest selects:  "cache: memory" → enabled descriptor     │
//! │                              ↓                                  │
//! │  4. Resolver loads:    find_by_module(descriptor.module)        │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering an Adapter
//!
//! ```ignore
//! use switchboard_application::catalog::{ADAPTERS, AdapterEntry};
//!
//! #[linkme::distributed_slice(ADAPTERS)]
//! static MEMORY_QUEUE: AdapterEntry = AdapterEntry {
//!     category: "queue",
//!     name: "memory",
//!     type_name: "Queue",
//!     package: env!("CARGO_PKG_NAME"),
//!     module: module_path!(),
//!     source_path: file!(),
//!     description: "In-process queue",
//!     metadata: None,
//!     settings: None,
//!     factory: |_ctx| Ok(std::sync::Arc::new(MemoryQueue::default())),
//! };
//! ```

mod entry;

pub use entry::{
    AdapterEntry, AdapterFactory, AdapterFactoryContext, SettingsFactory, settings_from_value,
};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path};
use switchboard_domain::value_objects::normalize_module_path;

// Auto-collection via linkme distributed slices - adapters submit entries at compile time
#[linkme::distributed_slice]
pub static ADAPTERS: [AdapterEntry] = [..];

/// Number of trailing path components compared by source-path lookup
/// (`adapters/<category>/<provider>.rs`)
const SOURCE_PATH_TAIL: usize = 3;

/// All linked catalog entries
pub fn entries() -> impl Iterator<Item = &'static AdapterEntry> {
    ADAPTERS.iter()
}

/// Find an entry by module path (normalized comparison)
pub fn find_by_module(module: &str) -> Option<&'static AdapterEntry> {
    let wanted = normalize_module_path(module);
    ADAPTERS
        .iter()
        .find(|entry| normalize_module_path(entry.module) == wanted)
}

/// Find an entry by the source file it was compiled from
///
/// Compares the trailing `adapters/<category>/<provider>.rs` components, so a
/// descriptor discovered on disk matches the entry compiled from that file.
pub fn find_by_source_path(path: &Path) -> Option<&'static AdapterEntry> {
    let wanted = path_tail(path);
    if wanted.len() < SOURCE_PATH_TAIL {
        return None;
    }
    ADAPTERS
        .iter()
        .find(|entry| path_tail(Path::new(entry.source_path)) == wanted)
}

/// Find an entry by category and provider name (case-insensitive)
pub fn find(category: &str, provider: &str) -> Option<&'static AdapterEntry> {
    ADAPTERS.iter().find(|entry| {
        entry.category.eq_ignore_ascii_case(category.trim())
            && entry.name.eq_ignore_ascii_case(provider.trim())
    })
}

fn path_tail(path: &Path) -> Vec<String> {
    let components: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_lowercase()),
            _ => None,
        })
        .collect();
    let skip = components.len().saturating_sub(SOURCE_PATH_TAIL);
    components.into_iter().skip(skip).collect()
}

/// List every linked adapter grouped by category
///
/// Useful for diagnostics and configuration validation.
pub fn list_available_adapters() -> AvailableAdapters {
    let mut by_category: BTreeMap<String, Vec<(&'static str, &'static str)>> = BTreeMap::new();
    for entry in ADAPTERS.iter() {
        by_category
            .entry(entry.category.to_lowercase())
            .or_default()
            .push((entry.name, entry.description));
    }
    for providers in by_category.values_mut() {
        providers.sort_by_key(|(name, _)| *name);
    }
    AvailableAdapters { by_category }
}

/// Available adapters by category
#[derive(Debug, Clone, Default)]
pub struct AvailableAdapters {
    /// Category → (provider name, description)
    pub by_category: BTreeMap<String, Vec<(&'static str, &'static str)>>,
}

impl AvailableAdapters {
    /// Provider names registered for a category
    pub fn providers(&self, category: &str) -> Vec<&'static str> {
        self.by_category
            .get(&category.to_lowercase())
            .map(|providers| providers.iter().map(|(name, _)| *name).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for AvailableAdapters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available Adapters:")?;
        for (category, providers) in &self.by_category {
            writeln!(f)?;
            writeln!(f, "{}:", category)?;
            for (name, desc) in providers {
                writeln!(f, "  - {}: {}", name, desc)?;
            }
        }
        Ok(())
    }
}
