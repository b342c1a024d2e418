//! Adapters, one directory per category

pub mod cache;
