//! Domain layer constants
//!
//! Naming conventions shared by discovery, selection and resolution.

// ============================================================================
// DISCOVERY CONVENTIONS
// ============================================================================

/// Directory holding one subdirectory per category
pub const ADAPTERS_DIR: &str = "adapters";

/// Entries starting with this prefix are never treated as adapters
pub const RESERVED_PREFIX: &str = "_";

/// Source file extension of adapter modules
pub const SOURCE_EXTENSION: &str = "rs";

/// Module files that declare submodules rather than providers
pub const MODULE_INDEX_STEM: &str = "mod";

/// Number of trailing path segments forming a module path
/// (`package::adapters::category::provider`)
pub const MODULE_PATH_SEGMENTS: usize = 4;

/// Separator between module path segments
pub const MODULE_PATH_SEPARATOR: &str = "::";

// ============================================================================
// MANIFEST CONVENTIONS
// ============================================================================

/// Accepted manifest filenames, in lookup order
pub const MANIFEST_FILENAMES: [&str; 2] = ["adapters.yml", "adapters.yaml"];

// ============================================================================
// BUILT-IN CATEGORIES
// ============================================================================

/// Category of the configuration provider
pub const CONFIG_CATEGORY: &str = "config";

/// Provider name of the built-in configuration adapter
pub const CONFIG_PROVIDER: &str = "settings";

/// Category of the logging provider
pub const LOGGER_CATEGORY: &str = "logger";

/// Provider name of the built-in logging adapter
pub const LOGGER_PROVIDER: &str = "tracing";

/// Package name recorded on built-in descriptors
pub const BUILTIN_PACKAGE: &str = "switchboard";
