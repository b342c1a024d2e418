//! Structured logging with tracing
//!
//! Centralized subscriber setup: level filter, text or JSON output and an
//! optional daily-rolling log file.

use crate::constants::{DEFAULT_LOG_FILE_PREFIX, LOG_FILTER_ENV_VAR};
use crate::error_ext::ErrorContext;
use std::path::Path;
use switchboard_domain::error::{Error, Result};

pub use crate::config::LoggingConfig;
use tracing::{Level, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the provided configuration
///
/// `SWITCHBOARD_LOG` overrides the configured level with a full filter
/// directive. Fails if a global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = file_appender(&config)?;

    // json/text layers have different types, hence the separate branches
    let installed = if config.json_format {
        let stdout = fmt::layer().json().with_target(true).with_thread_names(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    } else {
        let stdout = fmt::layer().with_target(true).with_thread_names(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    };

    installed.map_err(|e| Error::Configuration {
        message: format!("Failed to install log subscriber: {}", e),
        source: None,
    })?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Daily-rolling appender for `file_output`, keeping at most `max_files` files
///
/// Returns `None` when file output is not configured.
pub fn file_appender(config: &LoggingConfig) -> Result<Option<RollingFileAppender>> {
    let Some(path) = &config.file_output else {
        return Ok(None);
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(DEFAULT_LOG_FILE_PREFIX);

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(config.max_files.max(1))
        .build(dir)
        .config_context(format!("Failed to open log file in {}", dir.display()))
        .map(Some)
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::Configuration {
            message: format!(
                "Invalid log level: {}. Use trace, debug, info, warn, or error",
                level
            ),
            source: None,
        }),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
