//! Adapter metadata
//!
//! Static information an implementation attaches to itself: identity,
//! provenance, compatibility window and capabilities.

use super::version::FrameworkVersion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Maturity of an adapter implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterStatus {
    /// Early development, API may change
    Alpha,
    /// Feature complete, still stabilising
    Beta,
    /// Production ready
    #[default]
    Stable,
    /// Scheduled for removal
    Deprecated,
    /// Unsupported experiment
    Experimental,
}

impl AdapterStatus {
    /// Lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Stable => "stable",
            Self::Deprecated => "deprecated",
            Self::Experimental => "experimental",
        }
    }
}

impl fmt::Display for AdapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability tags an adapter can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterCapability {
    AsyncOperations,
    ConnectionPooling,
    Transactions,
    Ttl,
    Persistence,
    Streaming,
    PubSub,
    Compression,
    Encryption,
    Metrics,
    Reconnection,
    Batching,
}

impl AdapterCapability {
    /// Snake-case tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsyncOperations => "async_operations",
            Self::ConnectionPooling => "connection_pooling",
            Self::Transactions => "transactions",
            Self::Ttl => "ttl",
            Self::Persistence => "persistence",
            Self::Streaming => "streaming",
            Self::PubSub => "pub_sub",
            Self::Compression => "compression",
            Self::Encryption => "encryption",
            Self::Metrics => "metrics",
            Self::Reconnection => "reconnection",
            Self::Batching => "batching",
        }
    }
}

impl fmt::Display for AdapterCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to an adapter implementation
///
/// # Example
///
/// ```
/// use switchboard_domain::value_objects::{AdapterCapability, AdapterMetadata};
/// use uuid::Uuid;
///
/// let metadata = AdapterMetadata::new(Uuid::nil(), "Memory Cache", "cache", "memory")
///     .with_version("1.0.0")
///     .with_min_framework_version("0.1.0")
///     .with_capability(AdapterCapability::Ttl);
///
/// assert!(metadata.is_compatible_with("0.2.0"));
/// assert_eq!(metadata.capability_names(), vec!["ttl".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterMetadata {
    /// Stable module id
    pub module_id: Uuid,
    /// Display name
    pub name: String,
    /// Category the implementation serves
    pub category: String,
    /// Provider name (e.g. "redis", "memory")
    pub provider: String,
    /// Semantic version of the implementation
    pub version: String,
    /// Minimum compatible framework version
    pub min_framework_version: String,
    /// Maximum compatible framework version, if bounded
    pub max_framework_version: Option<String>,
    /// Maturity status
    pub status: AdapterStatus,
    /// Capability tags
    pub capabilities: BTreeSet<AdapterCapability>,
    /// External packages the implementation needs
    pub required_packages: Vec<String>,
    /// Free-form description
    pub description: String,
    /// Name of the paired settings type, if any
    pub settings_type: Option<String>,
}

impl AdapterMetadata {
    /// Create metadata with defaults for the optional fields
    pub fn new(
        module_id: Uuid,
        name: impl Into<String>,
        category: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            module_id,
            name: name.into(),
            category: category.into(),
            provider: provider.into(),
            version: "0.1.0".to_string(),
            min_framework_version: "0.1.0".to_string(),
            max_framework_version: None,
            status: AdapterStatus::default(),
            capabilities: BTreeSet::new(),
            required_packages: Vec::new(),
            description: String::new(),
            settings_type: None,
        }
    }

    /// Set the implementation version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the minimum framework version
    pub fn with_min_framework_version(mut self, version: impl Into<String>) -> Self {
        self.min_framework_version = version.into();
        self
    }

    /// Set the maximum framework version
    pub fn with_max_framework_version(mut self, version: impl Into<String>) -> Self {
        self.max_framework_version = Some(version.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: AdapterStatus) -> Self {
        self.status = status;
        self
    }

    /// Add a capability
    pub fn with_capability(mut self, capability: AdapterCapability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Add a required external package
    pub fn with_required_package(mut self, package: impl Into<String>) -> Self {
        self.required_packages.push(package.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the paired settings type name
    pub fn with_settings_type(mut self, settings_type: impl Into<String>) -> Self {
        self.settings_type = Some(settings_type.into());
        self
    }

    /// Capability tags as strings, in stable order
    pub fn capability_names(&self) -> Vec<String> {
        self.capabilities
            .iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }

    /// Whether `current` lies inside the declared compatibility window
    ///
    /// Unparsable versions are never compatible.
    pub fn is_compatible_with(&self, current: &str) -> bool {
        let Some(current) = FrameworkVersion::parse(current) else {
            return false;
        };
        let Some(min) = FrameworkVersion::parse(&self.min_framework_version) else {
            return false;
        };
        if current < min {
            return false;
        }
        match &self.max_framework_version {
            Some(max) => FrameworkVersion::parse(max).is_some_and(|max| current <= max),
            None => true,
        }
    }

    /// Human-readable report
    pub fn render_report(&self) -> String {
        let capabilities = self.capability_names();
        let mut report = String::new();
        report.push_str(&format!("Adapter: {}\n", self.name));
        report.push_str(&format!("Provider: {}\n", self.provider));
        report.push_str(&format!("Category: {}\n", self.category));
        report.push_str(&format!("Version: {}\n", self.version));
        report.push_str(&format!("Status: {}\n", self.status));
        report.push_str(&format!(
            "Capabilities ({}): {}\n",
            capabilities.len(),
            join_or_none(&capabilities)
        ));
        report.push_str(&format!(
            "Dependencies ({}): {}\n",
            self.required_packages.len(),
            join_or_none(&self.required_packages)
        ));
        report
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
