//! Application Layer - Switchboard
//!
//! Adapter catalog, built-in adapters, the per-context registry and the
//! selection engine. Nothing here touches the filesystem; discovery, the
//! manifest reader and the resolver live in `switchboard-infrastructure`.
//!
//! ## Architecture
//!
//! The application layer:
//! - Declares the [`catalog::ADAPTERS`] slice implementations register into
//! - Seeds the built-in `config` and `logger` categories
//! - Keeps descriptors and their derived caches in [`registry::AdapterRegistry`]
//! - Applies manifest selections through [`selection::SelectionEngine`]
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `switchboard-domain`: descriptors, metadata and adapter ports
//! - Pure Rust libraries for async, serialization, etc.

pub mod builtins;
pub mod catalog;
pub mod registry;
pub mod selection;

pub use builtins::{ConfigAdapter, InertAdapter, TracingLogger};
pub use catalog::{ADAPTERS, AdapterEntry, AdapterFactoryContext, list_available_adapters};
pub use registry::{AdapterRegistry, RegistrySnapshot};
pub use selection::{AdapterSelections, SelectionEngine, SelectionReport};
