//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Discovery and manifest naming conventions are defined in
//! `switchboard_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "switchboard.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "switchboard";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SWITCHBOARD";

/// Separator for nested keys in environment variables (`SWITCHBOARD_LOGGING__LEVEL`)
pub const CONFIG_ENV_NESTING: &str = "__";

/// Environment variable flagging a deployed process
pub const DEPLOYED_ENV_VAR: &str = "DEPLOYED";

/// Environment variable forcing testing/offline mode on every session
pub const TESTING_ENV_VAR: &str = "SWITCHBOARD_TESTING";

/// Default directory holding the adapters manifest
pub const DEFAULT_SETTINGS_DIR: &str = "settings";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV_VAR: &str = "SWITCHBOARD_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

/// Log file name prefix when `file_output` has no usable stem
pub const DEFAULT_LOG_FILE_PREFIX: &str = "switchboard";

// ============================================================================
// DISCOVERY CONSTANTS
// ============================================================================

/// Directory depth walked below an adapters root (`<category>/<provider>.rs`)
pub const DISCOVERY_MAX_DEPTH: usize = 2;
