//! Adapter Resolver
//!
//! [`AdapterSession`] owns the state of one execution context: registry,
//! resolved-instance cache and dependency container. Resolution of a
//! category is serialized by that category's lock, so concurrent callers
//! share a single construction and a single `init`.
//!
//! ```ignore
//! let session = AdapterSession::new(ConfigLoader::new().load()?);
//! let cache = session.resolve_as::<MemoryCache>("cache").await?;
//! let batch = session.resolve_many(["cache", "queue"]).await?;
//! ```

use crate::config::loader::env_flag;
use crate::config::{AppConfig, load_manifest};
use crate::constants::TESTING_ENV_VAR;
use crate::container::{Container, ContainerKey};
use crate::discovery::AdapterScanner;
use dashmap::{DashMap, DashSet};
use futures::future::try_join_all;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use switchboard_application::builtins::{CONFIG_ADAPTER, ConfigAdapter, InertAdapter};
use switchboard_application::catalog::{self, AdapterEntry, AdapterFactoryContext};
use switchboard_application::registry::AdapterRegistry;
use switchboard_application::selection::{SelectionEngine, SelectionReport};
use switchboard_domain::error::{Error, Result};
use switchboard_domain::ports::{Adapter, AdapterSettings};
use switchboard_domain::value_objects::AdapterDescriptor;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

/// Constructed adapter plus its one-shot init marker
///
/// Stored in the container under the implementation identity, so every
/// session sharing a container sees the same instance and init state.
#[derive(Clone)]
pub struct ResolvedInstance {
    adapter: Arc<dyn Adapter>,
    initialized: Arc<OnceCell<()>>,
}

impl ResolvedInstance {
    fn new(adapter: Arc<dyn Adapter>) -> Self {
        Self {
            adapter,
            initialized: Arc::new(OnceCell::new()),
        }
    }

    /// The adapter
    pub fn adapter(&self) -> Arc<dyn Adapter> {
        Arc::clone(&self.adapter)
    }

    /// Whether `init` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    async fn ensure_initialized(&self, category: &str) -> Result<()> {
        self.initialized
            .get_or_try_init(|| async {
                self.adapter.init().await.map_err(|e| match e {
                    Error::InstallationFailed { .. } => e,
                    other => Error::installation_with_source(
                        category,
                        "initialization failed",
                        other,
                    ),
                })
            })
            .await
            .map(|_| ())
    }
}

impl fmt::Debug for ResolvedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedInstance")
            .field("adapter", &self.adapter)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[derive(Clone)]
struct CachedAdapter {
    module: String,
    adapter: Arc<dyn Adapter>,
}

/// One execution context for adapter resolution
pub struct AdapterSession {
    config: AppConfig,
    registry: AdapterRegistry,
    container: Arc<Container>,
    shared_config: Arc<ConfigAdapter>,
    engine: SelectionEngine,
    configured: Mutex<bool>,
    resolved: DashMap<String, CachedAdapter>,
    owned_keys: DashSet<ContainerKey>,
    late_roots: Option<Vec<PathBuf>>,
}

impl AdapterSession {
    /// Session with a private container
    pub fn new(config: AppConfig) -> Self {
        Self::builder().with_config(config).build()
    }

    /// Session builder
    pub fn builder() -> AdapterSessionBuilder {
        AdapterSessionBuilder::default()
    }

    fn from_parts(
        mut config: AppConfig,
        container: Arc<Container>,
        late_roots: Option<Vec<PathBuf>>,
    ) -> Self {
        if !config.testing && env_flag(TESTING_ENV_VAR) {
            debug!(var = TESTING_ENV_VAR, "Testing mode detected from environment");
            config.testing = true;
        }
        let shared_config = Arc::new(
            ConfigAdapter::new(config.framework_version.clone())
                .with_deployed(config.deployed)
                .with_testing(config.testing),
        );
        let session = Self {
            engine: SelectionEngine::new(&config.framework_version),
            config,
            registry: AdapterRegistry::new(),
            container,
            shared_config,
            configured: Mutex::new(false),
            resolved: DashMap::new(),
            owned_keys: DashSet::new(),
            late_roots,
        };
        session.seed_container();
        session
    }

    /// Make the configuration injectable by type
    ///
    /// A container shared with another session keeps that session's entry.
    fn seed_container(&self) {
        let key = ContainerKey::of::<ConfigAdapter>();
        if !self.container.contains(key.clone()) {
            self.container.register(Arc::clone(&self.shared_config));
            self.owned_keys.insert(key);
        }
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared configuration adapter
    pub fn shared_config(&self) -> Arc<ConfigAdapter> {
        Arc::clone(&self.shared_config)
    }

    /// Registry of this session
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Dependency container backing this session
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// Apply configuration once: catalog, discovery, selection
    pub async fn ensure_configured(&self) -> Result<()> {
        let mut configured = self.configured.lock().await;
        if *configured {
            return Ok(());
        }

        self.registry.ensure_initialized();
        let linked: Vec<AdapterDescriptor> =
            catalog::entries().map(AdapterEntry::descriptor).collect();
        self.registry.merge(linked);

        if let Some(root) = &self.config.adapters_root {
            let discovered = AdapterScanner::new(root).discover_into(&self.registry).await;
            debug!(root = %root.display(), discovered, "Adapters root scanned");
        }

        let report = self.apply_selection().await;
        info!(
            descriptors = self.registry.list_all().len(),
            enabled = report.enabled_count(),
            "Adapter session configured"
        );
        *configured = true;
        Ok(())
    }

    async fn apply_selection(&self) -> SelectionReport {
        let selections = load_manifest(&self.config.settings_dir).await;
        self.engine.apply(&self.registry, &selections)
    }

    /// Resolve the adapter enabled for a category
    pub async fn resolve(&self, category: &str) -> Result<Arc<dyn Adapter>> {
        let category = category.trim().to_lowercase();
        if self.config.testing {
            debug!(category = %category, "Testing mode, handing out inert adapter");
            return Ok(Arc::new(InertAdapter::new(category)));
        }
        self.ensure_configured().await?;

        let lock = self.registry.category_lock(&category);
        let _guard = lock.lock().await;

        let descriptor = match self.registry.get_by_category(&category) {
            Some(descriptor) => descriptor,
            None => self.late_discovery(&category).await?,
        };
        let module = descriptor.normalized_module();

        if let Some(cached) = self.resolved.get(&category) {
            if cached.module == module {
                return Ok(Arc::clone(&cached.adapter));
            }
        }

        let entry = load_entry(&category, &descriptor)?;
        let adapter = self.install(&category, entry).await?;
        self.resolved.insert(
            category.clone(),
            CachedAdapter {
                module,
                adapter: Arc::clone(&adapter),
            },
        );
        debug!(category = %category, provider = %entry.name, "Adapter resolved");
        Ok(adapter)
    }

    /// Resolve and downcast to the concrete adapter type
    pub async fn resolve_as<T: Adapter>(&self, category: &str) -> Result<Arc<T>> {
        self.resolve(category)
            .await?
            .downcast_arc::<T>()
            .map_err(|_| Error::ContainerTypeMismatch {
                key: category.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Resolve several categories concurrently
    ///
    /// Categories without a usable descriptor are skipped with a warning; any
    /// other failure aborts the batch.
    pub async fn resolve_many<I, S>(&self, categories: I) -> Result<Vec<(String, Arc<dyn Adapter>)>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requests = categories.into_iter().map(|category| {
            let category = category.as_ref().trim().to_lowercase();
            async move {
                match self.resolve(&category).await {
                    Ok(adapter) => Ok(Some((category, adapter))),
                    Err(e) if e.is_soft_failure() => {
                        warn!(category = %category, error = %e, "Skipping unavailable adapter");
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
        });
        let resolved = try_join_all(requests).await?;
        Ok(resolved.into_iter().flatten().collect())
    }

    /// Resolve, returning `None` instead of failing
    ///
    /// With a provider, that provider's instance is returned even when a
    /// sibling is enabled for the category.
    pub async fn try_resolve(
        &self,
        category: &str,
        provider: Option<&str>,
    ) -> Option<Arc<dyn Adapter>> {
        let result = match provider {
            None => self.resolve(category).await,
            Some(provider) => self.resolve_provider(category, provider).await,
        };
        match result {
            Ok(adapter) => Some(adapter),
            Err(e) => {
                debug!(category = %category, error = %e, "Adapter not resolved");
                None
            }
        }
    }

    /// Resolve a specific provider of a category
    ///
    /// Does not change which instance [`resolve`](Self::resolve) returns.
    pub async fn resolve_provider(&self, category: &str, provider: &str) -> Result<Arc<dyn Adapter>> {
        let category = category.trim().to_lowercase();
        if self.config.testing {
            return Ok(Arc::new(InertAdapter::new(category)));
        }
        let enabled = self
            .get_class(&category, None)
            .await
            .ok()
            .filter(|entry| entry.name.eq_ignore_ascii_case(provider.trim()));
        if enabled.is_some() {
            return self.resolve(&category).await;
        }

        let entry = self.get_class(&category, Some(provider)).await?;
        let lock = self.registry.category_lock(&category);
        let _guard = lock.lock().await;
        self.install(&category, entry).await
    }

    /// Catalog entry for a category without instantiating it
    ///
    /// Without a provider, the enabled (else installed) descriptor is used.
    pub async fn get_class(
        &self,
        category: &str,
        provider: Option<&str>,
    ) -> Result<&'static AdapterEntry> {
        self.ensure_configured().await?;
        let category = category.trim().to_lowercase();

        let descriptor = match provider {
            None => self.registry.get_by_category(&category),
            Some(provider) => self
                .registry
                .candidates(&category)
                .into_iter()
                .find(|d| d.matches_provider(provider)),
        };
        match descriptor {
            Some(descriptor) => load_entry(&category, &descriptor),
            None => provider
                .and_then(|provider| catalog::find(&category, provider))
                .ok_or_else(|| Error::descriptor_not_found(category)),
        }
    }

    /// Re-read the manifest and re-apply selection
    ///
    /// Cached instances whose module is no longer enabled are dropped.
    pub async fn reconfigure(&self) -> Result<SelectionReport> {
        self.ensure_configured().await?;
        let report = self.apply_selection().await;
        self.resolved.retain(|category, cached| {
            self.registry
                .get_by_category(category)
                .is_some_and(|d| d.normalized_module() == cached.module)
        });
        Ok(report)
    }

    /// Discard everything session-scoped
    ///
    /// The next resolution re-runs configuration from scratch.
    pub async fn reset(&self) {
        let mut configured = self.configured.lock().await;
        self.resolved.clear();
        self.registry.reset();
        for key in self.owned_keys.iter() {
            self.container.remove(key.key().clone());
        }
        self.owned_keys.clear();
        self.shared_config.clear_settings();
        self.seed_container();
        *configured = false;
        debug!("Adapter session reset");
    }

    /// Enabled descriptors
    pub async fn list_enabled(&self) -> Result<Vec<AdapterDescriptor>> {
        self.ensure_configured().await?;
        Ok(self.registry.list_enabled())
    }

    /// Installed descriptors
    pub async fn list_installed(&self) -> Result<Vec<AdapterDescriptor>> {
        self.ensure_configured().await?;
        Ok(self.registry.list_installed())
    }

    /// All descriptors in registration order
    pub async fn list_all(&self) -> Result<Vec<AdapterDescriptor>> {
        self.ensure_configured().await?;
        Ok(self.registry.list_all())
    }

    /// Scan the late discovery roots, re-select and retry
    ///
    /// Roots default to `<cwd>` and `<cwd>/..`.
    async fn late_discovery(&self, category: &str) -> Result<AdapterDescriptor> {
        if !self.config.late_discovery {
            return Err(Error::descriptor_not_found(category));
        }
        let mut merged = 0;
        let roots = self.late_roots.clone().unwrap_or_else(late_discovery_roots);
        for root in roots {
            merged += AdapterScanner::new(root).discover_into(&self.registry).await;
        }
        if merged > 0 {
            debug!(category = %category, merged, "Late discovery found descriptors");
            self.apply_selection().await;
        }
        self.registry
            .get_by_category(category)
            .ok_or_else(|| Error::descriptor_not_found(category))
    }

    /// Construct (or reuse) the singleton for an entry and run `init` once
    async fn install(&self, category: &str, entry: &'static AdapterEntry) -> Result<Arc<dyn Adapter>> {
        // The `config` category is always this session's own configuration
        if entry.identity() == CONFIG_ADAPTER.identity() {
            let config: Arc<dyn Adapter> = self.shared_config.clone();
            return Ok(config);
        }

        let settings = self.build_settings(category, entry);
        let key = ContainerKey::named(entry.identity());

        let instance = self
            .container
            .get_or_insert_with(key.clone(), || {
                let mut ctx = AdapterFactoryContext::new(category, entry.name);
                if let Some(settings) = settings {
                    ctx = ctx.with_settings(settings);
                }
                let adapter = (entry.factory)(&ctx).map_err(|e| match e {
                    Error::InstallationFailed { .. } => e,
                    other => Error::installation_with_source(
                        category,
                        format!("constructing '{}' failed", entry.name),
                        other,
                    ),
                })?;
                debug!(category = %category, provider = %entry.name, "Adapter constructed");
                Ok(ResolvedInstance::new(adapter))
            })
            .map_err(|e| match e {
                Error::ContainerTypeMismatch { .. } | Error::AsyncValueRequested { .. } => {
                    Error::installation_with_source(category, "container slot unusable", e)
                }
                other => other,
            })?;
        self.owned_keys.insert(key);

        instance.ensure_initialized(category).await?;
        Ok(instance.adapter())
    }

    /// Build the paired settings and attach them to the shared configuration
    fn build_settings(
        &self,
        category: &str,
        entry: &AdapterEntry,
    ) -> Option<Arc<dyn AdapterSettings>> {
        let factory = entry.settings?;
        match factory(self.config.adapter_section(category)) {
            Ok(settings) => {
                self.shared_config
                    .attach_settings(category, Arc::clone(&settings));
                Some(settings)
            }
            Err(e) => {
                debug!(category = %category, error = %e, "Adapter settings not built, using none");
                None
            }
        }
    }
}

impl fmt::Debug for AdapterSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterSession")
            .field("registry", &self.registry)
            .field("resolved", &self.resolved.len())
            .field("testing", &self.config.testing)
            .finish()
    }
}

/// Load the implementation behind a descriptor
///
/// Module path first, recorded source path second.
fn load_entry(category: &str, descriptor: &AdapterDescriptor) -> Result<&'static AdapterEntry> {
    catalog::find_by_module(&descriptor.module)
        .or_else(|| {
            descriptor
                .source_path
                .as_deref()
                .and_then(catalog::find_by_source_path)
        })
        .ok_or_else(|| Error::not_installed(category, descriptor.module.clone()))
}

fn late_discovery_roots() -> Vec<PathBuf> {
    let Ok(cwd) = std::env::current_dir() else {
        return Vec::new();
    };
    let mut roots = vec![cwd.clone()];
    if let Some(parent) = cwd.parent() {
        roots.push(parent.to_path_buf());
    }
    roots
}

/// Builder for [`AdapterSession`]
#[derive(Debug, Default)]
pub struct AdapterSessionBuilder {
    config: Option<AppConfig>,
    container: Option<Arc<Container>>,
    late_roots: Option<Vec<PathBuf>>,
}

impl AdapterSessionBuilder {
    /// Application configuration (defaults otherwise)
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share a container with other sessions
    pub fn with_container(mut self, container: Arc<Container>) -> Self {
        self.container = Some(container);
        self
    }

    /// Roots scanned when a category is missing at resolution time
    pub fn with_late_discovery_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.late_roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    /// Build the session
    pub fn build(self) -> AdapterSession {
        AdapterSession::from_parts(
            self.config.unwrap_or_default(),
            self.container.unwrap_or_default(),
            self.late_roots,
        )
    }
}
