//! Configuration
//!
//! Application configuration loading and the adapters manifest reader.

pub mod loader;
pub mod manifest;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use manifest::{load_manifest, manifest_path, parse_manifest};
pub use types::{AppConfig, LoggingConfig};
