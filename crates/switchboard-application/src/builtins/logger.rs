//! Built-in logging adapter backed by `tracing`

use crate::catalog::{ADAPTERS, AdapterEntry};
use async_trait::async_trait;
use std::sync::Arc;
use switchboard_domain::constants::{BUILTIN_PACKAGE, LOGGER_CATEGORY, LOGGER_PROVIDER};
use switchboard_domain::error::Result;
use switchboard_domain::ports::Adapter;
use switchboard_domain::value_objects::{AdapterMetadata, AdapterStatus};
use tracing::{Level, debug, error, info, trace, warn};
use uuid::Uuid;

const LOGGER_MODULE_ID: Uuid = Uuid::from_u128(0x5b1f_6a0e_8c2d_4e71_9f03_c0f1_0000_0002);

/// Logger adapter forwarding to the global `tracing` subscriber
///
/// Subscriber installation belongs to the host application; this adapter
/// only emits events.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a logger
    pub fn new() -> Self {
        Self
    }

    /// Emit a message at the given level
    pub fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => error!(target: "switchboard::logger", "{}", message),
            Level::WARN => warn!(target: "switchboard::logger", "{}", message),
            Level::INFO => info!(target: "switchboard::logger", "{}", message),
            Level::DEBUG => debug!(target: "switchboard::logger", "{}", message),
            _ => trace!(target: "switchboard::logger", "{}", message),
        }
    }

    /// Emit an info message
    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    /// Emit a warning
    pub fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    /// Emit an error
    pub fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }
}

#[async_trait]
impl Adapter for TracingLogger {
    fn category(&self) -> &str {
        LOGGER_CATEGORY
    }

    fn provider_name(&self) -> &str {
        LOGGER_PROVIDER
    }

    async fn init(&self) -> Result<()> {
        debug!("Logger adapter ready");
        Ok(())
    }

    fn metadata() -> Option<AdapterMetadata> {
        Some(logger_metadata())
    }
}

fn logger_metadata() -> AdapterMetadata {
    AdapterMetadata::new(LOGGER_MODULE_ID, "Tracing Logger", LOGGER_CATEGORY, LOGGER_PROVIDER)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_status(AdapterStatus::Stable)
        .with_required_package("tracing")
        .with_description("Forwards log calls to the tracing subscriber")
}

#[linkme::distributed_slice(ADAPTERS)]
pub static LOGGER_ADAPTER: AdapterEntry = AdapterEntry {
    category: LOGGER_CATEGORY,
    name: LOGGER_PROVIDER,
    type_name: "Logger",
    package: BUILTIN_PACKAGE,
    module: module_path!(),
    source_path: file!(),
    description: "Tracing logger (built-in)",
    metadata: Some(logger_metadata),
    settings: None,
    factory: |_ctx| Ok(Arc::new(TracingLogger::new())),
};
