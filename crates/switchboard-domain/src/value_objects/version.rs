//! Framework version comparison
//!
//! Versions are compared numerically, component by component. Each component
//! keeps only its leading digits, so pre-release tags such as `1.2.0rc1` or
//! `2.0.0-beta` order like their release (`1.2.0`, `2.0.0`).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Numeric-first version used for compatibility checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkVersion {
    parts: Vec<u64>,
}

impl FrameworkVersion {
    /// Parse a version string
    ///
    /// Returns `None` when no component carries any digits.
    pub fn parse(version: &str) -> Option<Self> {
        let trimmed = version.trim().trim_start_matches(['v', 'V']);
        let mut parts = Vec::new();
        let mut any_digits = false;

        for component in trimmed.split('.') {
            let digits: String = component
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if digits.is_empty() {
                parts.push(0);
            } else {
                any_digits = true;
                parts.push(digits.parse().unwrap_or(u64::MAX));
            }
            // "1.2.0rc1.5" stops at the tagged component
            if digits.len() != component.len() {
                break;
            }
        }

        any_digits.then_some(Self { parts })
    }

    /// Numeric components
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for FrameworkVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrameworkVersion {}

impl PartialOrd for FrameworkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrameworkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}
