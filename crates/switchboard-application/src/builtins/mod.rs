//! Built-in adapters
//!
//! The `config` and `logger` categories exist before any discovery runs.

pub mod config;
pub mod inert;
pub mod logger;

pub use config::{CONFIG_ADAPTER, ConfigAdapter};
pub use inert::InertAdapter;
pub use logger::{LOGGER_ADAPTER, TracingLogger};

use crate::catalog::AdapterEntry;
use switchboard_domain::value_objects::AdapterDescriptor;

/// Catalog entries of the built-in adapters
pub fn builtin_entries() -> [&'static AdapterEntry; 2] {
    [&CONFIG_ADAPTER, &LOGGER_ADAPTER]
}

/// Descriptors seeded into every fresh registry
pub fn builtin_descriptors() -> Vec<AdapterDescriptor> {
    builtin_entries()
        .iter()
        .map(|entry| entry.descriptor())
        .collect()
}
