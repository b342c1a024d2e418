//! # Switchboard
//!
//! Configuration-driven adapter registry and dependency resolution.
//!
//! An application picks one implementation per capability category (cache,
//! queue, logger, ...) in `settings/adapters.yml`, and asks an
//! [`AdapterSession`] for it by category name:
//!
//! ```ignore
//! use switchboard::{AdapterSession, cache};
//!
//! // settings/adapters.yml:
//! //   cache: memory
//! let session = switchboard::open(None)?;
//! let backend = cache(&session).await?;
//! backend.set_json("answer", "42", Default::default()).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Descriptors, metadata, adapter ports and errors
//! - `application` - Adapter catalog, registry and selection engine
//! - `infrastructure` - Configuration, discovery, container and resolver
//! - `providers` - Adapters shipped with the framework

// Force-link switchboard-providers so its catalog registrations are included
extern crate switchboard_providers;

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Domain layer - descriptors, metadata, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use switchboard_domain::*;
}

/// Application layer - catalog, registry and selection
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use switchboard_application::*;
}

/// Infrastructure layer - configuration, discovery, container and resolver
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use switchboard_infrastructure::*;
}

/// Adapters shipped with the framework
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use switchboard_providers::*;
}

pub use domain::error::{Error, Result};
pub use domain::ports::{Adapter, AdapterSettings};
pub use domain::value_objects::{AdapterDescriptor, AdapterMetadata};
pub use application::{AdapterEntry, AdapterSelections, SelectionReport, list_available_adapters};
pub use infrastructure::{AdapterSession, AppConfig, ConfigBuilder, ConfigLoader, Container};
pub use providers::{CacheBackend, CacheEntryConfig};

/// Session configured from `switchboard.toml` and the environment
///
/// Uses `config_path` when given, otherwise the default lookup locations.
/// Logging is left to the host; call
/// [`init_logging`](infrastructure::init_logging) first to see resolver output.
pub fn open(config_path: Option<&Path>) -> Result<AdapterSession> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    debug!(settings_dir = %config.settings_dir.display(), "Opening adapter session");
    Ok(AdapterSession::new(config))
}

/// Resolve the `cache` category as a [`CacheBackend`]
pub async fn cache(session: &AdapterSession) -> Result<Arc<dyn CacheBackend>> {
    let adapter = session.resolve(providers::constants::CACHE_CATEGORY).await?;
    providers::cache_backend(adapter).ok_or_else(|| Error::ContainerTypeMismatch {
        key: providers::constants::CACHE_CATEGORY.to_string(),
        expected: "dyn CacheBackend",
    })
}
