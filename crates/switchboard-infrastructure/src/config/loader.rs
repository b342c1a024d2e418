//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values through Figment.

use crate::config::{AppConfig, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_NESTING, CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    DEPLOYED_ENV_VAR,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};
use switchboard_domain::error::{Error, Result};
use switchboard_domain::value_objects::FrameworkVersion;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix, `__` separating nested keys
    ///    (e.g. `SWITCHBOARD_LOGGING__LEVEL`)
    ///
    /// A truthy `DEPLOYED` variable also sets [`AppConfig::deployed`].
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment
            .merge(Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_NESTING));

        let mut app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        if env_flag(DEPLOYED_ENV_VAR) {
            app_config.deployed = true;
        }

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Reload configuration
    pub fn reload(&self) -> Result<AppConfig> {
        self.load()
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// `1`, `true`, `yes` or `on`, case-insensitive
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Whether an environment variable is set to a truthy value
pub fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| is_truthy(&value))
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    if config.settings_dir.as_os_str().is_empty() {
        return Err(Error::configuration("Settings directory cannot be empty"));
    }
    parse_log_level(&config.logging.level)?;
    if FrameworkVersion::parse(&config.framework_version).is_none() {
        return Err(Error::configuration(format!(
            "Framework version '{}' has no numeric component",
            config.framework_version
        )));
    }
    if config.adapters.keys().any(|key| key.trim().is_empty()) {
        return Err(Error::configuration("Adapter settings section with an empty category"));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manifest directory
    pub fn with_settings_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.settings_dir = dir.into();
        self
    }

    /// Set the discovery root
    pub fn with_adapters_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.config.adapters_root = Some(root.into());
        self
    }

    /// Set the framework version
    pub fn with_framework_version<S: Into<String>>(mut self, version: S) -> Self {
        self.config.framework_version = version.into();
        self
    }

    /// Set testing/offline mode
    pub fn with_testing(mut self, testing: bool) -> Self {
        self.config.testing = testing;
        self
    }

    /// Set the deployed flag
    pub fn with_deployed(mut self, deployed: bool) -> Self {
        self.config.deployed = deployed;
        self
    }

    /// Enable or disable late discovery
    pub fn with_late_discovery(mut self, enabled: bool) -> Self {
        self.config.late_discovery = enabled;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Add a settings section for a category
    pub fn with_adapter_settings(mut self, category: &str, settings: serde_json::Value) -> Self {
        self.config
            .adapters
            .insert(category.trim().to_lowercase(), settings);
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
