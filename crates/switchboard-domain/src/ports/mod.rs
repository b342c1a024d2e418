//! Domain Port Interfaces
//!
//! Contracts implemented by providers and consumed by the resolver.

/// Adapter and settings ports
pub mod adapter;

pub use adapter::{Adapter, AdapterSettings, extract_metadata};
