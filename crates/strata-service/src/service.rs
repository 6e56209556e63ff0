//! Core Extraction Service implementation

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strata_domain::{QueryResult, SourceLoader};
use strata_extractor::Extractor;
use strata_gatekeeper::{Gatekeeper, GatekeeperError};
use strata_registry::ConfigurationRegistry;
use tokio::sync::OwnedMutexGuard;
use tokio::time::timeout;
use tracing::{debug, info, warn};

type CacheKey = (String, String);

/// Loads sources, extracts them, and caches the results
///
/// At most one load runs at a time. Callers that arrive while a load is in
/// flight wait for it and then re-check the cache, so concurrent requests for
/// the same `(source, configuration)` pair trigger a single load. A load that
/// outlives its deadline keeps the gate until it actually finishes.
pub struct ExtractionService<L: SourceLoader> {
    loader: Arc<L>,
    registry: ConfigurationRegistry,
    extractor: Extractor,
    gatekeeper: Gatekeeper,
    config: ServiceConfig,
    cache: Mutex<HashMap<CacheKey, Arc<QueryResult>>>,
    load_gate: Arc<tokio::sync::Mutex<()>>,
    loads_started: AtomicUsize,
}

impl<L> ExtractionService<L>
where
    L: SourceLoader + Send + Sync + 'static,
    L::Store: Send + 'static,
    L::Error: Display + Send + 'static,
{
    /// Create a new Extraction Service
    pub fn new(
        loader: L,
        registry: ConfigurationRegistry,
        extractor: Extractor,
        config: ServiceConfig,
    ) -> Self {
        Self {
            loader: Arc::new(loader),
            registry,
            extractor,
            gatekeeper: Gatekeeper::new(config.result_validation.clone()),
            config,
            cache: Mutex::new(HashMap::new()),
            load_gate: Arc::new(tokio::sync::Mutex::new(())),
            loads_started: AtomicUsize::new(0),
        }
    }

    /// Registry the service resolves configuration ids against
    pub fn registry(&self) -> &ConfigurationRegistry {
        &self.registry
    }

    /// Service configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Extract `source` with the configuration registered as `configuration_id`
    ///
    /// Returns the cached result when there is one.
    pub async fn load_and_extract(
        &self,
        source: &str,
        configuration_id: &str,
    ) -> Result<Arc<QueryResult>, ServiceError> {
        let mapping = self
            .registry
            .get(configuration_id)
            .ok_or_else(|| ServiceError::ConfigurationNotFound(configuration_id.to_string()))?;

        let key = (source.to_string(), configuration_id.to_string());
        if let Some(hit) = self.cached(&key) {
            debug!("Cache hit for {} with '{}'", source, configuration_id);
            return Ok(hit);
        }

        let gate = Arc::clone(&self.load_gate).lock_owned().await;

        // Filled by the load we were waiting on
        if let Some(hit) = self.cached(&key) {
            debug!("Cache filled while waiting for {}", source);
            return Ok(hit);
        }

        let (store, _gate) = self.load(source, gate).await?;
        let result = self.extractor.extract(Some(&store), &mapping)?;

        if self.config.validate_results {
            self.gatekeeper
                .ensure_valid_result(&result)
                .map_err(|e| match e {
                    GatekeeperError::ResultValidationFailed(reasons) => {
                        ServiceError::ResultValidationFailed(reasons)
                    }
                    GatekeeperError::ConfigurationInvalid(violations) => {
                        ServiceError::ConfigurationInvalid(violations)
                    }
                })?;
        }

        for diagnostic in &result.diagnostics {
            debug!("{}: {}", source, diagnostic);
        }
        info!(
            "Extracted {} with '{}': {}",
            source,
            configuration_id,
            result.summary()
        );

        let result = Arc::new(result);
        self.lock_cache().insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// Drop the cached result for the pair, then extract again
    pub async fn refresh(
        &self,
        source: &str,
        configuration_id: &str,
    ) -> Result<Arc<QueryResult>, ServiceError> {
        self.lock_cache()
            .remove(&(source.to_string(), configuration_id.to_string()));
        self.load_and_extract(source, configuration_id).await
    }

    /// Extract `source` with the registry's active configuration
    pub async fn extract_active(&self, source: &str) -> Result<Arc<QueryResult>, ServiceError> {
        let id = self.registry.active_id();
        self.load_and_extract(source, &id).await
    }

    /// Drop every cached result for `source`, returning how many were dropped
    pub fn invalidate(&self, source: &str) -> usize {
        let mut cache = self.lock_cache();
        let before = cache.len();
        cache.retain(|(cached_source, _), _| cached_source != source);
        before - cache.len()
    }

    /// Drop every cached result
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Number of cached results
    pub fn cached_len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Number of loads started since creation
    pub fn loads_started(&self) -> usize {
        self.loads_started.load(Ordering::SeqCst)
    }

    fn cached(&self, key: &CacheKey) -> Option<Arc<QueryResult>> {
        self.lock_cache().get(key).cloned()
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<CacheKey, Arc<QueryResult>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the loader on the blocking pool
    ///
    /// The gate travels with the blocking task and comes back with its
    /// output. If the deadline fires first, the task still owns the gate and
    /// releases it only when the loader returns.
    async fn load(
        &self,
        source: &str,
        gate: OwnedMutexGuard<()>,
    ) -> Result<(L::Store, OwnedMutexGuard<()>), ServiceError> {
        self.loads_started.fetch_add(1, Ordering::SeqCst);
        info!("Loading {}", source);

        let loader = Arc::clone(&self.loader);
        let owned = source.to_string();
        let task = tokio::task::spawn_blocking(move || (loader.load(&owned), gate));

        let joined = match self.config.load_timeout() {
            Some(deadline) => match timeout(deadline, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    warn!("Loading {} timed out after {:?}", source, deadline);
                    return Err(ServiceError::LoadTimedOut {
                        source_id: source.to_string(),
                        after_secs: self.config.load_timeout_secs,
                    });
                }
            },
            None => task.await,
        };

        let (loaded, gate) = joined.map_err(|e| ServiceError::LoadFailed {
            source_id: source.to_string(),
            cause: format!("Task join error: {}", e),
        })?;

        let store = loaded.map_err(|e| {
            warn!("Loading {} failed: {}", source, e);
            ServiceError::LoadFailed {
                source_id: source.to_string(),
                cause: e.to_string(),
            }
        })?;
        Ok((store, gate))
    }
}
