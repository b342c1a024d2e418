//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SETTINGS_DIR, LOG_MAX_FILES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Application configuration
///
/// Loaded by [`ConfigLoader`](super::ConfigLoader) from defaults,
/// `switchboard.toml` and `SWITCHBOARD_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `adapters.yml` / `adapters.yaml`
    pub settings_dir: PathBuf,

    /// Root scanned for `adapters/<category>/<provider>.rs`
    pub adapters_root: Option<PathBuf>,

    /// Version adapter metadata is checked against
    pub framework_version: String,

    /// Testing/offline mode: resolution returns inert stand-ins
    pub testing: bool,

    /// Deployed flag exposed to adapters through the config adapter
    pub deployed: bool,

    /// Scan `<cwd>/adapters` and `<cwd>/../adapters` when a category is missing
    pub late_discovery: bool,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Per-category settings sections (`[adapters.cache]`)
    pub adapters: BTreeMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Settings section for a category
    pub fn adapter_section(&self, category: &str) -> Option<&serde_json::Value> {
        self.adapters.get(&category.trim().to_lowercase())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_dir: PathBuf::from(DEFAULT_SETTINGS_DIR),
            adapters_root: None,
            framework_version: env!("CARGO_PKG_VERSION").to_string(),
            testing: false,
            deployed: false,
            late_discovery: true,
            logging: LoggingConfig::default(),
            adapters: BTreeMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,

    /// Maximum number of rotated files to keep
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
            max_files: LOG_MAX_FILES,
        }
    }
}
