//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::entities::extract_entities;
use crate::error::ExtractorError;
use crate::layers::extract_layers;
use crate::links::extract_cross_layer_links;
use crate::relationships::extract_relationships;
use strata_domain::{Diagnostic, MappingConfiguration, QueryResult, TripleStore};
use strata_gatekeeper::ensure_valid_mapping;
use tracing::{debug, info, warn};

/// The Extractor turns a triple store into a [`QueryResult`]
///
/// Extraction is a pure function of the store and the mapping: the Extractor
/// holds only its tuning and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an Extractor with the given tuning
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { config })
    }

    /// Engine tuning
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run all four passes over `store`
    ///
    /// Fails only when no store is given or the mapping does not validate.
    /// Items with missing or malformed data are dropped and explained in
    /// [`QueryResult::diagnostics`].
    pub fn extract<S: TripleStore + ?Sized>(
        &self,
        store: Option<&S>,
        mapping: &MappingConfiguration,
    ) -> Result<QueryResult, ExtractorError> {
        let store = store.ok_or(ExtractorError::NoDataLoaded)?;
        ensure_valid_mapping(mapping)?;

        info!(
            "Extracting with '{}' over {} statements",
            mapping.name,
            store.len()
        );

        let mut diagnostics = Vec::new();
        let entities = extract_entities(store, mapping, &self.config, &mut diagnostics);
        let relationships = extract_relationships(store, mapping);
        let layers = extract_layers(store, mapping, &self.config, &mut diagnostics);
        let cross_layer_links = extract_cross_layer_links(store, mapping);

        let mut result = QueryResult {
            entities,
            relationships,
            layers,
            cross_layer_links,
            configuration_used: mapping.name.clone(),
            diagnostics,
        };

        if self.config.check_layer_consistency && !result.layers.is_empty() {
            for key in result.orphan_layer_keys() {
                warn!("Layer key {:?} has no matching layer", key);
                result.diagnostics.push(Diagnostic::OrphanLayerKey { key });
            }
        }

        debug!("Diagnostics: {}", result.diagnostics.len());
        info!("Extraction complete: {}", result.summary());
        Ok(result)
    }
}
