//! Category contracts implemented by the adapters in this crate

pub mod cache;
