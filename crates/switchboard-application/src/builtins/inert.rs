//! Inert stand-in returned in testing/offline mode

use async_trait::async_trait;
use switchboard_domain::ports::Adapter;

/// Adapter that does nothing
///
/// Handed out instead of real implementations when the process runs in
/// testing/offline mode; constructing it performs no I/O.
#[derive(Debug, Clone)]
pub struct InertAdapter {
    category: String,
}

impl InertAdapter {
    /// Create a stand-in for a category
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

#[async_trait]
impl Adapter for InertAdapter {
    fn category(&self) -> &str {
        &self.category
    }

    fn provider_name(&self) -> &str {
        "inert"
    }
}
