//! Domain Value Objects
//!
//! Immutable value objects describing adapters.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`AdapterDescriptor`] | Registry record for one candidate implementation |
//! | [`AdapterMetadata`] | Identity, compatibility window and capabilities |
//! | [`FrameworkVersion`] | Numeric-first version used for compatibility checks |

/// Adapter descriptor
pub mod descriptor;
/// Adapter metadata
pub mod metadata;
/// Version comparison
pub mod version;

pub use descriptor::{AdapterDescriptor, normalize_module_path, type_name_for_category};
pub use metadata::{AdapterCapability, AdapterMetadata, AdapterStatus};
pub use version::FrameworkVersion;
