//! Catalog entry types

use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use switchboard_domain::error::Result;
use switchboard_domain::ports::{Adapter, AdapterSettings};
use switchboard_domain::value_objects::{AdapterDescriptor, AdapterMetadata};

/// Factory creating an adapter instance
pub type AdapterFactory = fn(&AdapterFactoryContext) -> Result<Arc<dyn Adapter>>;

/// Factory creating the settings object paired with an adapter
///
/// Receives the `[adapters.<category>]` configuration section, if any.
pub type SettingsFactory = fn(Option<&serde_json::Value>) -> Result<Arc<dyn AdapterSettings>>;

/// Inputs available to an adapter factory
#[derive(Debug, Clone)]
pub struct AdapterFactoryContext {
    /// Category being resolved
    pub category: String,
    /// Provider name being constructed
    pub provider: String,
    /// Settings built for the category, when the entry pairs a settings type
    pub settings: Option<Arc<dyn AdapterSettings>>,
}

impl AdapterFactoryContext {
    /// Create a context without settings
    pub fn new(category: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            provider: provider.into(),
            settings: None,
        }
    }

    /// Attach settings
    pub fn with_settings(mut self, settings: Arc<dyn AdapterSettings>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Settings downcast to the paired concrete type
    pub fn settings_as<T: AdapterSettings>(&self) -> Option<Arc<T>> {
        self.settings
            .clone()
            .and_then(|settings| settings.downcast_arc::<T>().ok())
    }
}

/// Catalog entry for one adapter implementation
///
/// Implementation and settings type are paired here at registration time.
pub struct AdapterEntry {
    /// Category served (e.g. "cache")
    pub category: &'static str,
    /// Provider name (e.g. "memory")
    pub name: &'static str,
    /// Implementation type name
    pub type_name: &'static str,
    /// Owning package
    pub package: &'static str,
    /// Module path, normally `module_path!()`
    pub module: &'static str,
    /// Source file, normally `file!()`
    pub source_path: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Metadata attached to the implementation type
    pub metadata: Option<fn() -> AdapterMetadata>,
    /// Paired settings type
    pub settings: Option<SettingsFactory>,
    /// Instance factory
    pub factory: AdapterFactory,
}

impl AdapterEntry {
    /// Descriptor for this entry, disabled and uninstalled
    pub fn descriptor(&self) -> AdapterDescriptor {
        let mut descriptor = AdapterDescriptor::new(
            self.name,
            self.type_name,
            self.category,
            self.package.replace('-', "_"),
            self.module,
        )
        .with_source_path(PathBuf::from(self.source_path));
        if let Some(metadata) = self.metadata {
            descriptor = descriptor.with_metadata(metadata());
        }
        descriptor
    }

    /// Metadata attached to the implementation, if any
    pub fn metadata(&self) -> Option<AdapterMetadata> {
        self.metadata.map(|metadata| metadata())
    }

    /// Whether a settings type is paired with the implementation
    pub fn has_settings(&self) -> bool {
        self.settings.is_some()
    }

    /// Identity used as the dependency container key
    pub fn identity(&self) -> String {
        switchboard_domain::value_objects::normalize_module_path(self.module)
    }
}

impl fmt::Debug for AdapterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterEntry")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("module", &self.module)
            .field("has_settings", &self.has_settings())
            .finish()
    }
}

/// Build a settings object from an optional config section
///
/// A missing section yields `S::default()`.
///
/// ```ignore
/// settings: Some(settings_from_value::<MemoryCacheSettings>),
/// ```
pub fn settings_from_value<S>(value: Option<&serde_json::Value>) -> Result<Arc<dyn AdapterSettings>>
where
    S: DeserializeOwned + Default + AdapterSettings,
{
    let settings = match value {
        Some(value) => serde_json::from_value::<S>(value.clone())?,
        None => S::default(),
    };
    Ok(Arc::new(settings))
}
