//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Switchboard
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// No enabled, installed or discoverable descriptor exists for a category
    #[error(
        "No adapter found for category '{category}'. Set '{manifest_key}: <provider>' in the adapters manifest"
    )]
    DescriptorNotFound {
        /// The category that was requested
        category: String,
        /// Manifest key that selects a provider for the category
        manifest_key: String,
    },

    /// A descriptor exists but its implementation is not linked into the binary
    #[error("Adapter '{module}' for category '{category}' is not installed")]
    AdapterNotInstalled {
        /// The category that was requested
        category: String,
        /// Module path recorded on the descriptor
        module: String,
    },

    /// Any other failure while installing an adapter
    #[error("Failed to install adapter for category '{category}': {message}")]
    InstallationFailed {
        /// The category being resolved
        category: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Manifest present but unparsable
    ///
    /// Selection never surfaces this; it is logged and treated as "no selections".
    #[error("Malformed adapters manifest {path}: {message}")]
    ConfigurationMalformed {
        /// Path of the manifest
        path: String,
        /// Parser message
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A deferred container value was requested synchronously
    #[error("Container value '{key}' is asynchronous; use get_async")]
    AsyncValueRequested {
        /// Container key
        key: String,
    },

    /// A container value exists but has a different type
    #[error("Container value '{key}' is not a {expected}")]
    ContainerTypeMismatch {
        /// Container key
        key: String,
        /// Requested type name
        expected: &'static str,
    },

    /// An injected dependency is missing from the container
    #[error("Dependency '{key}' is not registered in the container")]
    DependencyMissing {
        /// Container key
        key: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a descriptor-not-found error for a category
    pub fn descriptor_not_found<S: Into<String>>(category: S) -> Self {
        let category = category.into();
        Self::DescriptorNotFound {
            manifest_key: category.clone(),
            category,
        }
    }

    /// Create an adapter-not-installed error
    pub fn not_installed<C: Into<String>, M: Into<String>>(category: C, module: M) -> Self {
        Self::AdapterNotInstalled {
            category: category.into(),
            module: module.into(),
        }
    }

    /// Create an installation failure
    pub fn installation<C: Into<String>, S: Into<String>>(category: C, message: S) -> Self {
        Self::InstallationFailed {
            category: category.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an installation failure with source
    pub fn installation_with_source<
        C: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        category: C,
        message: S,
        source: E,
    ) -> Self {
        Self::InstallationFailed {
            category: category.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether batch resolution may skip this failure instead of aborting
    pub fn is_soft_failure(&self) -> bool {
        matches!(
            self,
            Self::DescriptorNotFound { .. } | Self::AdapterNotInstalled { .. }
        )
    }
}

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
