//! Selection Engine
//!
//! Applies a category → provider mapping to the registry. At most one
//! descriptor per category ends up enabled; ambiguity is never auto-resolved.
//!
//! | Situation                         | Outcome                         |
//! |-----------------------------------|---------------------------------|
//! | manifest names a known provider   | that descriptor enabled+installed |
//! | manifest names an unknown provider| category unmatched (none enabled) |
//! | no entry, single candidate        | candidate enabled (default)     |
//! | no entry, several candidates      | category unresolved             |

use crate::registry::AdapterRegistry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use switchboard_domain::value_objects::{AdapterDescriptor, FrameworkVersion};
use tracing::{debug, info, warn};

/// Category → provider mapping read from the adapters manifest
///
/// Keys and values are stored trimmed and lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterSelections {
    entries: BTreeMap<String, String>,
}

impl AdapterSelections {
    /// Empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selection, normalizing both sides
    ///
    /// Blank keys or values are ignored.
    pub fn insert(&mut self, category: &str, provider: &str) {
        let category = category.trim().to_lowercase();
        let provider = provider.trim().to_lowercase();
        if category.is_empty() || provider.is_empty() {
            return;
        }
        self.entries.insert(category, provider);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, category: &str, provider: &str) -> Self {
        self.insert(category, provider);
        self
    }

    /// Provider selected for a category
    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .get(&category.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Whether no selections are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of selections
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate selections in category order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for AdapterSelections {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selections = Self::new();
        for (category, provider) in iter {
            selections.insert(category.as_ref(), provider.as_ref());
        }
        selections
    }
}

/// Outcome of one selection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// Category → provider chosen through the manifest
    pub selected: BTreeMap<String, String>,
    /// Category → provider enabled as the only candidate
    pub defaulted: BTreeMap<String, String>,
    /// Categories with several candidates and no manifest entry
    pub unresolved: BTreeSet<String>,
    /// Category → provider named by the manifest but not registered
    pub unmatched: BTreeMap<String, String>,
}

impl SelectionReport {
    /// Provider enabled for a category, explicit or default
    pub fn enabled_provider(&self, category: &str) -> Option<&str> {
        let key = category.to_lowercase();
        self.selected
            .get(&key)
            .or_else(|| self.defaulted.get(&key))
            .map(String::as_str)
    }

    /// Number of categories with an enabled descriptor
    pub fn enabled_count(&self) -> usize {
        self.selected.len() + self.defaulted.len()
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} selected, {} defaulted, {} unresolved, {} unmatched",
            self.selected.len(),
            self.defaulted.len(),
            self.unresolved.len(),
            self.unmatched.len()
        )
    }
}

/// Apply selections to a descriptor list in place
///
/// Flags are reset first, so the result depends only on the list contents and
/// the mapping.
pub fn select(descriptors: &mut [AdapterDescriptor], selections: &AdapterSelections) -> SelectionReport {
    let mut report = SelectionReport::default();
    let mut by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for (index, descriptor) in descriptors.iter_mut().enumerate() {
        descriptor.enabled = false;
        descriptor.installed = false;
        by_category
            .entry(descriptor.category.to_lowercase())
            .or_default()
            .push(index);
    }

    for (category, indices) in by_category {
        if let Some(provider) = selections.get(&category) {
            let chosen = indices
                .iter()
                .copied()
                .find(|&index| descriptors[index].matches_provider(provider));
            match chosen {
                Some(index) => {
                    descriptors[index].enabled = true;
                    descriptors[index].installed = true;
                    report.selected.insert(category, provider.to_string());
                }
                None => {
                    report.unmatched.insert(category, provider.to_string());
                }
            }
        } else if let [index] = indices.as_slice() {
            descriptors[*index].enabled = true;
            report
                .defaulted
                .insert(category, descriptors[*index].name.to_lowercase());
        } else {
            report.unresolved.insert(category);
        }
    }

    report
}

/// Applies manifest selections to a registry
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    framework_version: Option<String>,
}

impl SelectionEngine {
    /// Engine checking metadata compatibility against a framework version
    ///
    /// An unparsable version disables the check.
    pub fn new(framework_version: &str) -> Self {
        Self {
            framework_version: FrameworkVersion::parse(framework_version)
                .map(|_| framework_version.trim().to_string()),
        }
    }

    /// Reset flags, apply selections, and rebuild the registry caches
    pub fn apply(
        &self,
        registry: &AdapterRegistry,
        selections: &AdapterSelections,
    ) -> SelectionReport {
        let mut report = SelectionReport::default();
        let snapshot = registry.update(|descriptors| {
            report = select(descriptors, selections);
        });

        for (category, provider) in &report.unmatched {
            warn!(
                category = %category,
                provider = %provider,
                "Manifest selects an unknown provider"
            );
        }
        for category in &report.unresolved {
            debug!(category = %category, "Several candidates and no selection, left unresolved");
        }
        if let Some(current) = &self.framework_version {
            for descriptor in snapshot.descriptors().iter().filter(|d| d.enabled) {
                let Some(metadata) = &descriptor.metadata else {
                    continue;
                };
                if !metadata.is_compatible_with(current) {
                    warn!(
                        category = %descriptor.category,
                        provider = %descriptor.name,
                        adapter_version = %metadata.version,
                        framework_version = %current,
                        "Enabled adapter declares an incompatible framework version"
                    );
                }
            }
        }

        info!(
            selected = report.selected.len(),
            defaulted = report.defaulted.len(),
            unresolved = report.unresolved.len(),
            unmatched = report.unmatched.len(),
            "Adapter selection applied"
        );
        report
    }
}
