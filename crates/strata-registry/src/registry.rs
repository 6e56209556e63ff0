//! Configuration registry

use crate::builtins::{self, DEFAULT_ID};
use crate::document::{parse_document, render_document, DocumentFormat};
use crate::RegistryError;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use strata_domain::{MappingConfiguration, TargetAttribute};
use strata_gatekeeper::ensure_valid_mapping;
use tracing::{debug, info, warn};

/// Picker metadata for one registered configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSummary {
    /// Registry id
    pub id: String,

    /// Configuration name
    pub name: String,

    /// Entity type ids, in rule order
    pub entity_type_ids: Vec<String>,

    /// Distinct property target attributes, sorted
    pub target_attributes: Vec<TargetAttribute>,

    /// Relationship display labels, in rule order
    pub relationship_labels: Vec<String>,

    /// Namespace prefixes, sorted
    pub namespace_prefixes: Vec<String>,

    /// Whether this is the active configuration
    pub active: bool,

    /// Whether this id is one of the built-ins
    pub builtin: bool,
}

#[derive(Debug)]
struct RegistryState {
    configs: BTreeMap<String, MappingConfiguration>,
    active: String,
}

impl RegistryState {
    fn seeded(all_builtins: bool) -> Self {
        let configs = if all_builtins {
            builtins::builtins()
                .into_iter()
                .map(|(id, config)| (id.to_string(), config))
                .collect()
        } else {
            BTreeMap::from([(DEFAULT_ID.to_string(), builtins::default_configuration())])
        };

        Self {
            configs,
            active: DEFAULT_ID.to_string(),
        }
    }
}

/// Named, validated mapping configurations with one active selection
///
/// Cloning the registry shares the underlying state. Mutations take a write
/// lock, so concurrent writers are serialized and readers always see a
/// complete configuration set.
#[derive(Debug, Clone)]
pub struct ConfigurationRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl ConfigurationRegistry {
    /// Create a registry seeded with every built-in, `default` active
    pub fn new() -> Self {
        Self::with_builtins()
    }

    /// Create a registry seeded with every built-in, `default` active
    pub fn with_builtins() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::seeded(true))),
        }
    }

    /// Create a registry holding only the default configuration
    pub fn empty_with_default() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::seeded(false))),
        }
    }

    // A panic while holding the lock cannot leave a half-applied mutation
    // behind, so a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and store a configuration, replacing any existing entry
    ///
    /// Nothing is stored when validation fails.
    pub fn register(
        &self,
        id: impl Into<String>,
        config: MappingConfiguration,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if let Err(e) = ensure_valid_mapping(&config) {
            warn!("Rejected configuration '{}': {}", id, e);
            return Err(e.into());
        }

        let replaced = self.write().configs.insert(id.clone(), config).is_some();
        if replaced {
            info!("Replaced configuration '{}'", id);
        } else {
            info!("Registered configuration '{}'", id);
        }
        Ok(())
    }

    /// A copy of the configuration registered under `id`
    pub fn get(&self, id: &str) -> Option<MappingConfiguration> {
        self.read().configs.get(id).cloned()
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &str) -> bool {
        self.read().configs.contains_key(id)
    }

    /// Make `id` the active configuration
    pub fn set_active(&self, id: &str) -> Result<(), RegistryError> {
        let mut state = self.write();
        if !state.configs.contains_key(id) {
            return Err(RegistryError::ConfigurationNotFound(id.to_string()));
        }
        state.active = id.to_string();
        debug!("Active configuration is now '{}'", id);
        Ok(())
    }

    /// Id of the active configuration
    pub fn active_id(&self) -> String {
        self.read().active.clone()
    }

    /// A copy of the active configuration
    ///
    /// Falls back to the built-in default if the active id is not registered.
    pub fn active(&self) -> MappingConfiguration {
        let state = self.read();
        match state.configs.get(&state.active) {
            Some(config) => config.clone(),
            None => {
                warn!(
                    "Active configuration '{}' is missing; using the default",
                    state.active
                );
                state
                    .configs
                    .get(DEFAULT_ID)
                    .cloned()
                    .unwrap_or_else(builtins::default_configuration)
            }
        }
    }

    /// Remove a configuration, returning whether an entry existed
    ///
    /// Removing the active configuration makes `default` active again.
    pub fn remove(&self, id: &str) -> Result<bool, RegistryError> {
        if id == DEFAULT_ID {
            return Err(RegistryError::CannotRemoveDefault);
        }

        let mut state = self.write();
        let removed = state.configs.remove(id).is_some();
        if removed {
            info!("Removed configuration '{}'", id);
            if state.active == id {
                state.active = DEFAULT_ID.to_string();
            }
        }
        Ok(removed)
    }

    /// Copy the configuration `source_id` to `new_id`
    ///
    /// The copy is validated and stored exactly as [`register`](Self::register)
    /// does. Transforms are plain data and are copied with the rules.
    pub fn clone_configuration(&self, source_id: &str, new_id: &str) -> Result<(), RegistryError> {
        let source = self
            .get(source_id)
            .ok_or_else(|| RegistryError::SourceNotFound(source_id.to_string()))?;
        self.register(new_id, source)
    }

    /// Registered ids, sorted
    pub fn list_ids(&self) -> Vec<String> {
        self.read().configs.keys().cloned().collect()
    }

    /// Number of registered configurations
    pub fn len(&self) -> usize {
        self.read().configs.len()
    }

    /// Whether the registry is empty (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.read().configs.is_empty()
    }

    /// Picker metadata for every configuration, sorted by id
    pub fn summaries(&self) -> Vec<ConfigurationSummary> {
        let state = self.read();
        state
            .configs
            .iter()
            .map(|(id, config)| ConfigurationSummary {
                id: id.clone(),
                name: config.name.clone(),
                entity_type_ids: config
                    .entity_types
                    .iter()
                    .map(|rule| rule.type_id.clone())
                    .collect(),
                target_attributes: config.target_attributes(),
                relationship_labels: config
                    .relationship_rules
                    .iter()
                    .map(|rule| rule.display_label.clone())
                    .collect(),
                namespace_prefixes: config.namespace_prefixes.keys().cloned().collect(),
                active: *id == state.active,
                builtin: builtins::is_builtin(id),
            })
            .collect()
    }

    /// Export a configuration as a TOML document
    pub fn export_as_text(&self, id: &str) -> Result<String, RegistryError> {
        self.export_as(id, DocumentFormat::Toml)
    }

    /// Export a configuration in the given format
    pub fn export_as(&self, id: &str, format: DocumentFormat) -> Result<String, RegistryError> {
        let config = self
            .get(id)
            .ok_or_else(|| RegistryError::ConfigurationNotFound(id.to_string()))?;
        render_document(&config, format)
    }

    /// Parse, validate, and register a document
    ///
    /// JSON is recognized by a leading `{`; anything else is read as TOML.
    pub fn import_from_text(&self, id: &str, text: &str) -> Result<(), RegistryError> {
        self.import_as(id, text, DocumentFormat::detect(text))
    }

    /// Parse a document in the given format, then validate and register it
    pub fn import_as(
        &self,
        id: &str,
        text: &str,
        format: DocumentFormat,
    ) -> Result<(), RegistryError> {
        let config = parse_document(text, format)?;
        self.register(id, config)
    }

    /// Import a document from disk
    pub fn load_file(&self, id: &str, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Importing '{}' from {}", id, path.display());
        self.import_from_text(id, &text)
    }

    /// Restore exactly the built-in set with `default` active
    pub fn reset(&self) {
        *self.write() = RegistryState::seeded(true);
        info!("Configuration registry reset to built-ins");
    }
}

impl Default for ConfigurationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
