//! Adapter Port
//!
//! Contract every pluggable implementation fulfils, plus the marker trait for
//! the settings object an implementation may be paired with.

use crate::error::Result;
use crate::value_objects::AdapterMetadata;
use async_trait::async_trait;
use downcast_rs::{DowncastSync, impl_downcast};
use std::fmt;

/// A resolved implementation of a category
///
/// Resolution hands out `Arc<dyn Adapter>`; consumers recover the concrete
/// type with [`downcast_arc`](Adapter::downcast_arc).
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use switchboard_domain::ports::Adapter;
///
/// #[derive(Debug)]
/// struct MemoryQueue;
///
/// #[async_trait]
/// impl Adapter for MemoryQueue {
///     fn category(&self) -> &str {
///         "queue"
///     }
///
///     fn provider_name(&self) -> &str {
///         "memory"
///     }
/// }
/// ```
#[async_trait]
pub trait Adapter: DowncastSync + fmt::Debug {
    /// Category this instance serves
    fn category(&self) -> &str;

    /// Provider name for diagnostics
    fn provider_name(&self) -> &str;

    /// Optional initialization hook, run once per instance after construction
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    /// Metadata attached to the implementation type
    fn metadata() -> Option<AdapterMetadata>
    where
        Self: Sized,
    {
        None
    }
}

impl_downcast!(sync Adapter);

/// Settings object paired with an adapter implementation
pub trait AdapterSettings: DowncastSync + fmt::Debug {}

impl_downcast!(sync AdapterSettings);

impl<T> AdapterSettings for T where T: Send + Sync + fmt::Debug + 'static {}

/// Extract the metadata attached to an implementation type
pub fn extract_metadata<A: Adapter>() -> Option<AdapterMetadata> {
    A::metadata()
}
