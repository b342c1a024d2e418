//! Adapter descriptor
//!
//! Registry record describing one candidate implementation for a category.

use super::metadata::AdapterMetadata;
use crate::constants::MODULE_PATH_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Registry record for one candidate implementation
///
/// Identity is value-based on (name, type name, category, package, module).
/// Flags, metadata and source path do not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterDescriptor {
    /// Provider name (e.g. "redis")
    pub name: String,
    /// Implementation type name (e.g. "Cache")
    pub type_name: String,
    /// Category served (e.g. "cache")
    pub category: String,
    /// Owning package
    pub package: String,
    /// Fully-qualified module path
    pub module: String,
    /// Selected for its category
    pub enabled: bool,
    /// Marked installed by selection
    pub installed: bool,
    /// Attached metadata
    pub metadata: Option<AdapterMetadata>,
    /// Source file the descriptor was derived from
    pub source_path: Option<PathBuf>,
}

impl AdapterDescriptor {
    /// Create a disabled, uninstalled descriptor
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        category: impl Into<String>,
        package: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            category: category.into(),
            package: package.into(),
            module: module.into(),
            enabled: false,
            installed: false,
            metadata: None,
            source_path: None,
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: AdapterMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Record the source path
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Module path in canonical form
    pub fn normalized_module(&self) -> String {
        normalize_module_path(&self.module)
    }

    /// Key under which rescans replace instead of duplicate
    pub fn registry_key(&self) -> (String, String) {
        (self.category.to_lowercase(), self.normalized_module())
    }

    /// Case-insensitive provider name match
    pub fn matches_provider(&self, provider: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(provider.trim())
    }

    /// Whether the descriptor belongs to a category (case-insensitive)
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }

    /// Stable fingerprint of identity plus the metadata module id
    ///
    /// Two descriptors that compare equal but carry different metadata ids
    /// have different fingerprints.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        if let Some(metadata) = &self.metadata {
            metadata.module_id.hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl PartialEq for AdapterDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_name == other.type_name
            && self.category == other.category
            && self.package == other.package
            && self.module == other.module
    }
}

impl Eq for AdapterDescriptor {}

impl Hash for AdapterDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.type_name.hash(state);
        self.category.hash(state);
        self.package.hash(state);
        self.module.hash(state);
    }
}

/// Canonical module path: lowercase, `::`-separated, `-` replaced by `_`
///
/// Accepts `.`- and `/`-separated input and drops a trailing `.rs`.
pub fn normalize_module_path(module: &str) -> String {
    let trimmed = module.trim();
    let trimmed = trimmed.strip_suffix(".rs").unwrap_or(trimmed);
    trimmed
        .split(|c| c == '.' || c == '/' || c == '\\' || c == ':')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_lowercase().replace('-', "_"))
        .collect::<Vec<_>>()
        .join(MODULE_PATH_SEPARATOR)
}

/// Implementation type name for a category (`vector_db` → `VectorDb`)
pub fn type_name_for_category(category: &str) -> String {
    category
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}
