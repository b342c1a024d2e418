//! Adapter Registry
//!
//! Ordered descriptor list for one execution context plus two derived caches,
//! `enabled-by-category` and `installed-by-category`.
//!
//! Every mutation builds a new [`RegistrySnapshot`] (descriptors and caches
//! together) and publishes it with a single atomic swap, so readers never
//! observe a list whose caches are stale.
//!
//! Absence is a normal outcome here: lookups return `None`, never an error.

use crate::builtins::builtin_descriptors;
use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use switchboard_domain::value_objects::AdapterDescriptor;
use tokio::sync::Mutex;
use tracing::debug;

/// Immutable view of the registry
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    descriptors: Vec<AdapterDescriptor>,
    enabled: BTreeMap<String, AdapterDescriptor>,
    installed: BTreeMap<String, AdapterDescriptor>,
    seeded: bool,
}

impl RegistrySnapshot {
    fn build(descriptors: Vec<AdapterDescriptor>, seeded: bool) -> Self {
        let mut enabled = BTreeMap::new();
        let mut installed = BTreeMap::new();
        for descriptor in &descriptors {
            let key = descriptor.category.to_lowercase();
            if descriptor.enabled {
                enabled
                    .entry(key.clone())
                    .or_insert_with(|| descriptor.clone());
            }
            if descriptor.installed {
                installed.entry(key).or_insert_with(|| descriptor.clone());
            }
        }
        Self {
            descriptors,
            enabled,
            installed,
            seeded,
        }
    }

    /// All descriptors in registration order
    pub fn descriptors(&self) -> &[AdapterDescriptor] {
        &self.descriptors
    }

    /// Whether built-ins have been seeded
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Enabled descriptor for a category, from the cache
    pub fn enabled(&self, category: &str) -> Option<&AdapterDescriptor> {
        self.enabled.get(&category.trim().to_lowercase())
    }

    /// Installed descriptor for a category, from the cache
    pub fn installed(&self, category: &str) -> Option<&AdapterDescriptor> {
        self.installed.get(&category.trim().to_lowercase())
    }
}

/// Registry scoped to one execution context
pub struct AdapterRegistry {
    snapshot: ArcSwap<RegistrySnapshot>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AdapterRegistry {
    /// Create an empty, unseeded registry
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(RegistrySnapshot::default()),
            locks: DashMap::new(),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snapshot.load_full()
    }

    /// Seed built-ins on first use and return the live list
    pub fn ensure_initialized(&self) -> Vec<AdapterDescriptor> {
        let builtins = builtin_descriptors();
        self.snapshot.rcu(|current| {
            if current.seeded {
                return Arc::clone(current);
            }
            let mut descriptors = builtins.clone();
            for descriptor in current.descriptors.iter() {
                let key = descriptor.registry_key();
                descriptors.retain(|existing| existing.registry_key() != key);
                descriptors.push(descriptor.clone());
            }
            Arc::new(RegistrySnapshot::build(descriptors, true))
        });
        for descriptor in &builtins {
            self.category_lock(&descriptor.category);
        }
        self.snapshot.load().descriptors.clone()
    }

    /// Descriptor for a category
    ///
    /// Checks the enabled cache, then the installed cache, then scans the
    /// list for a descriptor flagged enabled or installed.
    pub fn get_by_category(&self, category: &str) -> Option<AdapterDescriptor> {
        let snapshot = self.snapshot.load();
        snapshot
            .enabled(category)
            .or_else(|| snapshot.installed(category))
            .or_else(|| {
                snapshot
                    .descriptors
                    .iter()
                    .find(|d| d.in_category(category) && (d.enabled || d.installed))
            })
            .cloned()
    }

    /// Every descriptor registered for a category, enabled or not
    pub fn candidates(&self, category: &str) -> Vec<AdapterDescriptor> {
        self.snapshot
            .load()
            .descriptors
            .iter()
            .filter(|d| d.in_category(category))
            .cloned()
            .collect()
    }

    /// Enabled descriptors, one per category
    pub fn list_enabled(&self) -> Vec<AdapterDescriptor> {
        self.snapshot.load().enabled.values().cloned().collect()
    }

    /// Installed descriptors, one per category
    pub fn list_installed(&self) -> Vec<AdapterDescriptor> {
        self.snapshot.load().installed.values().cloned().collect()
    }

    /// All descriptors in registration order
    pub fn list_all(&self) -> Vec<AdapterDescriptor> {
        self.snapshot.load().descriptors.clone()
    }

    /// Repopulate both caches from the current list
    pub fn rebuild_caches(&self) {
        self.snapshot.rcu(|current| {
            RegistrySnapshot::build(current.descriptors.clone(), current.seeded)
        });
    }

    /// Merge descriptors, replacing entries with the same category and module
    ///
    /// Metadata of a replaced entry is carried over when the newcomer has none.
    /// Returns the number of descriptors merged.
    pub fn merge(&self, incoming: Vec<AdapterDescriptor>) -> usize {
        if incoming.is_empty() {
            return 0;
        }
        self.snapshot.rcu(|current| {
            let mut descriptors = current.descriptors.clone();
            for descriptor in &incoming {
                let key = descriptor.registry_key();
                let mut merged = descriptor.clone();
                if let Some(position) = descriptors.iter().position(|d| d.registry_key() == key)
                {
                    let replaced = descriptors.remove(position);
                    if merged.metadata.is_none() {
                        merged.metadata = replaced.metadata;
                    }
                }
                descriptors.retain(|d| d.registry_key() != key);
                descriptors.push(merged);
            }
            RegistrySnapshot::build(descriptors, current.seeded)
        });
        for descriptor in &incoming {
            self.category_lock(&descriptor.category);
        }
        debug!(count = incoming.len(), "Merged adapter descriptors");
        incoming.len()
    }

    /// Mutate the descriptor list and rebuild caches
    ///
    /// `f` may run more than once under contention and must be deterministic.
    pub fn update<F>(&self, mut f: F) -> Arc<RegistrySnapshot>
    where
        F: FnMut(&mut Vec<AdapterDescriptor>),
    {
        self.snapshot.rcu(|current| {
            let mut descriptors = current.descriptors.clone();
            f(&mut descriptors);
            RegistrySnapshot::build(descriptors, current.seeded)
        });
        self.snapshot.load_full()
    }

    /// Lock serializing resolution of a category
    ///
    /// Created on first use and reused for the registry's lifetime.
    pub fn category_lock(&self, category: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(category.trim().to_lowercase())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of categories holding a lock
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    /// Drop all descriptors and re-arm built-in seeding
    ///
    /// Category locks survive so in-flight resolutions stay serialized.
    pub fn reset(&self) {
        self.snapshot.store(Arc::new(RegistrySnapshot::default()));
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot.load();
        f.debug_struct("AdapterRegistry")
            .field("descriptors", &snapshot.descriptors.len())
            .field("enabled", &snapshot.enabled.keys().collect::<Vec<_>>())
            .field("locks", &self.locks.len())
            .finish()
    }
}
