//! # Switchboard Domain
//!
//! Value objects, ports and the error taxonomy shared by every Switchboard
//! layer. Nothing here performs I/O.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Descriptors, metadata, version comparison |
//! | [`ports`] | `Adapter` and `AdapterSettings` traits |
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Discovery, manifest and built-in naming conventions |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{Adapter, AdapterSettings};
pub use value_objects::{AdapterDescriptor, AdapterMetadata};
