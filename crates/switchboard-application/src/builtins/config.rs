//! Built-in configuration adapter
//!
//! The shared configuration object. Settings built for resolved adapters are
//! attached here under their category name.

use crate::catalog::{ADAPTERS, AdapterEntry};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use switchboard_domain::constants::{BUILTIN_PACKAGE, CONFIG_CATEGORY, CONFIG_PROVIDER};
use switchboard_domain::ports::{Adapter, AdapterSettings};
use switchboard_domain::value_objects::{AdapterMetadata, AdapterStatus};
use uuid::Uuid;

const CONFIG_MODULE_ID: Uuid = Uuid::from_u128(0x5b1f_6a0e_8c2d_4e71_9f03_c0f1_0000_0001);

/// Shared configuration adapter
#[derive(Debug)]
pub struct ConfigAdapter {
    framework_version: String,
    deployed: bool,
    testing: bool,
    settings: DashMap<String, Arc<dyn AdapterSettings>>,
}

impl ConfigAdapter {
    /// Create a configuration adapter for a framework version
    pub fn new(framework_version: impl Into<String>) -> Self {
        Self {
            framework_version: framework_version.into(),
            deployed: false,
            testing: false,
            settings: DashMap::new(),
        }
    }

    /// Set the deployed flag
    pub fn with_deployed(mut self, deployed: bool) -> Self {
        self.deployed = deployed;
        self
    }

    /// Set the testing/offline flag
    pub fn with_testing(mut self, testing: bool) -> Self {
        self.testing = testing;
        self
    }

    /// Framework version adapters are checked against
    pub fn framework_version(&self) -> &str {
        &self.framework_version
    }

    /// Whether the process runs deployed
    pub fn deployed(&self) -> bool {
        self.deployed
    }

    /// Whether the process runs in testing/offline mode
    pub fn testing(&self) -> bool {
        self.testing
    }

    /// Attach settings under a category name, replacing earlier ones
    pub fn attach_settings(&self, category: &str, settings: Arc<dyn AdapterSettings>) {
        self.settings.insert(category.to_lowercase(), settings);
    }

    /// Settings attached for a category
    pub fn settings(&self, category: &str) -> Option<Arc<dyn AdapterSettings>> {
        self.settings
            .get(&category.to_lowercase())
            .map(|entry| entry.value().clone())
    }

    /// Settings for a category downcast to their concrete type
    pub fn settings_as<T: AdapterSettings>(&self, category: &str) -> Option<Arc<T>> {
        self.settings(category)
            .and_then(|settings| settings.downcast_arc::<T>().ok())
    }

    /// Drop all attached settings
    pub fn clear_settings(&self) {
        self.settings.clear();
    }

    /// Categories that carry attached settings
    pub fn settings_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.settings.iter().map(|entry| entry.key().clone()).collect();
        categories.sort();
        categories
    }
}

impl Default for ConfigAdapter {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

#[async_trait]
impl Adapter for ConfigAdapter {
    fn category(&self) -> &str {
        CONFIG_CATEGORY
    }

    fn provider_name(&self) -> &str {
        CONFIG_PROVIDER
    }

    fn metadata() -> Option<AdapterMetadata> {
        Some(config_metadata())
    }
}

fn config_metadata() -> AdapterMetadata {
    AdapterMetadata::new(CONFIG_MODULE_ID, "Settings", CONFIG_CATEGORY, CONFIG_PROVIDER)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_status(AdapterStatus::Stable)
        .with_description("Shared configuration holding per-category adapter settings")
}

#[linkme::distributed_slice(ADAPTERS)]
pub static CONFIG_ADAPTER: AdapterEntry = AdapterEntry {
    category: CONFIG_CATEGORY,
    name: CONFIG_PROVIDER,
    type_name: "Config",
    package: BUILTIN_PACKAGE,
    module: module_path!(),
    source_path: file!(),
    description: "Shared configuration (built-in)",
    metadata: Some(config_metadata),
    settings: None,
    factory: |_ctx| Ok(Arc::new(ConfigAdapter::default())),
};
