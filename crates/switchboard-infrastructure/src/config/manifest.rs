//! Adapters manifest reader
//!
//! The manifest is a flat YAML mapping of category to provider name:
//!
//! ```yaml
//! cache: redis
//! queue: rabbitmq
//! storage: ~        # null entries are ignored
//! ```
//!
//! Reading never fails. A missing, unreadable or malformed manifest yields
//! empty selections and a warning.

use figment::Figment;
use figment::providers::{Format, Yaml};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use switchboard_application::selection::AdapterSelections;
use switchboard_domain::constants::MANIFEST_FILENAMES;
use switchboard_domain::error::{Error, Result};
use tracing::{debug, warn};

/// First manifest file present in a settings directory
pub fn manifest_path(settings_dir: &Path) -> Option<PathBuf> {
    MANIFEST_FILENAMES
        .iter()
        .map(|name| settings_dir.join(name))
        .find(|path| path.is_file())
}

/// Parse manifest content
///
/// Fails with [`Error::ConfigurationMalformed`] when the content is not a flat
/// string mapping.
pub fn parse_manifest(content: &str, path: &Path) -> Result<AdapterSelections> {
    if content.trim().is_empty() {
        return Ok(AdapterSelections::new());
    }
    let raw: BTreeMap<String, Option<String>> = Figment::from(Yaml::string(content))
        .extract()
        .map_err(|e| Error::ConfigurationMalformed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(raw
        .into_iter()
        .filter_map(|(category, provider)| provider.map(|provider| (category, provider)))
        .collect())
}

/// Load selections from the settings directory
pub async fn load_manifest(settings_dir: &Path) -> AdapterSelections {
    let Some(path) = manifest_path(settings_dir) else {
        debug!(dir = %settings_dir.display(), "No adapters manifest found");
        return AdapterSelections::new();
    };

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Adapters manifest unreadable, using no selections");
            return AdapterSelections::new();
        }
    };

    match parse_manifest(&content, &path) {
        Ok(selections) => {
            debug!(path = %path.display(), count = selections.len(), "Adapters manifest loaded");
            selections
        }
        Err(e) => {
            warn!(error = %e, "Adapters manifest ignored, using no selections");
            AdapterSelections::new()
        }
    }
}
