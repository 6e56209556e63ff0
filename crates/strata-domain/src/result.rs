//! Query result model
//!
//! A [`QueryResult`] is produced fresh by every extraction call and is not
//! mutated afterwards. Callers that need fresh data extract again.

use crate::{AttributeValue, TargetAttribute};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Neutral layer color used when a layer has no color mapping
pub const DEFAULT_LAYER_COLOR: u32 = 0x88_8888;

/// Layer height used when a layer has no height mapping
pub const DEFAULT_LAYER_HEIGHT: f64 = 0.0;

/// A materialized node
///
/// Only exists when label, a full position, and a layer key were resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedEntity {
    /// Subject IRI
    pub id: String,

    /// Entity type id from the matching entity type rule
    pub type_id: String,

    /// Display label
    pub label: String,

    /// `(x, y, z)` position
    pub position: [f64; 3],

    /// Layer key, never empty
    pub layer_key: String,

    /// Secondary label
    pub subtitle: Option<String>,

    /// Packed RGB color, when a color rule resolved to a number
    pub color: Option<u32>,

    /// Values of rules targeting anything but label/position/layer/subtitle,
    /// keyed by property IRI
    pub extra: BTreeMap<String, AttributeValue>,
}

/// A typed edge
///
/// Subject and object are not checked against the entity list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtractedRelationship {
    /// Subject IRI
    pub subject_id: String,

    /// Predicate IRI
    pub predicate_iri: String,

    /// Object IRI or literal lexical form
    pub object_id: String,

    /// Subject's layer key, empty when it has none
    pub layer_key: String,
}

/// A named group of entities
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLayer {
    /// Layer key
    pub key: String,

    /// Display name
    pub display_name: String,

    /// Packed RGB color
    pub color: u32,

    /// Elevation
    pub height: f64,
}

/// A raw `(source, target)` pair taken verbatim from the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrossLayerLink {
    /// Subject of the linking statement
    pub source_id: String,

    /// Object of the linking statement
    pub target_id: String,
}

/// Something the engine recovered from locally
///
/// Diagnostics never turn an extraction into a failure; they explain why a
/// result holds fewer items than the source suggests.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A typed subject did not become an entity
    EntityDropped {
        /// Subject IRI
        subject: String,
        /// Property IRIs of unsatisfied required rules
        missing_required: Vec<String>,
        /// Attributes still unresolved after all rules ran
        unresolved: Vec<TargetAttribute>,
    },

    /// A layer resource did not become a layer
    LayerDropped {
        /// Layer subject IRI
        subject: String,
        /// Why it was dropped
        reason: String,
    },

    /// A transform rejected its input; the attribute was treated as absent
    TransformFailed {
        /// Subject IRI
        subject: String,
        /// Property IRI
        property: String,
        /// Transform failure message
        message: String,
    },

    /// A single-valued property had several distinct values
    ConflictingValues {
        /// Subject IRI
        subject: String,
        /// Property IRI
        property: String,
        /// Distinct lexical values, in store order
        values: Vec<String>,
    },

    /// A layer key used by an entity or relationship has no layer
    OrphanLayerKey {
        /// The key
        key: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EntityDropped {
                subject,
                missing_required,
                unresolved,
            } => {
                write!(f, "entity <{}> dropped", subject)?;
                if !missing_required.is_empty() {
                    write!(f, "; missing required: {}", missing_required.join(", "))?;
                }
                if !unresolved.is_empty() {
                    let names: Vec<&str> = unresolved.iter().map(|a| a.as_str()).collect();
                    write!(f, "; unresolved: {}", names.join(", "))?;
                }
                Ok(())
            }
            Diagnostic::LayerDropped { subject, reason } => {
                write!(f, "layer <{}> dropped: {}", subject, reason)
            }
            Diagnostic::TransformFailed {
                subject,
                property,
                message,
            } => write!(f, "<{}> <{}>: {}", subject, property, message),
            Diagnostic::ConflictingValues {
                subject,
                property,
                values,
            } => write!(
                f,
                "<{}> <{}> has {} distinct values: {}",
                subject,
                property,
                values.len(),
                values.join(" | ")
            ),
            Diagnostic::OrphanLayerKey { key } => {
                write!(f, "layer key {:?} has no matching layer", key)
            }
        }
    }
}

/// Item counts of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultSummary {
    /// Number of entities
    pub entities: usize,
    /// Number of relationships
    pub relationships: usize,
    /// Number of layers
    pub layers: usize,
    /// Number of cross-layer links
    pub cross_layer_links: usize,
    /// Number of diagnostics
    pub diagnostics: usize,
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entities, {} relationships, {} layers, {} cross-layer links, {} diagnostics",
            self.entities, self.relationships, self.layers, self.cross_layer_links, self.diagnostics
        )
    }
}

/// Output of one extraction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    /// Materialized entities, in type-statement order
    pub entities: Vec<ExtractedEntity>,

    /// Relationships, in store order
    pub relationships: Vec<ExtractedRelationship>,

    /// Layers by key
    pub layers: BTreeMap<String, ExtractedLayer>,

    /// Cross-layer links, in store order
    pub cross_layer_links: Vec<CrossLayerLink>,

    /// Name of the configuration that produced this result
    pub configuration_used: String,

    /// Locally recovered problems
    pub diagnostics: Vec<Diagnostic>,
}

impl QueryResult {
    /// Item counts
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            entities: self.entities.len(),
            relationships: self.relationships.len(),
            layers: self.layers.len(),
            cross_layer_links: self.cross_layer_links.len(),
            diagnostics: self.diagnostics.len(),
        }
    }

    /// Whether nothing at all was extracted
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.relationships.is_empty()
            && self.layers.is_empty()
            && self.cross_layer_links.is_empty()
    }

    /// Look up an entity by subject IRI
    pub fn entity(&self, id: &str) -> Option<&ExtractedEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Layer keys used by entities or relationships that have no layer entry
    ///
    /// Empty relationship keys (subjects without a layer statement) are not
    /// reported.
    pub fn orphan_layer_keys(&self) -> BTreeSet<String> {
        self.entities
            .iter()
            .map(|e| e.layer_key.as_str())
            .chain(self.relationships.iter().map(|r| r.layer_key.as_str()))
            .filter(|key| !key.is_empty() && !self.layers.contains_key(*key))
            .map(str::to_string)
            .collect()
    }

    /// Entity ids as a set, for order-insensitive comparison
    pub fn entity_ids(&self) -> BTreeSet<&str> {
        self.entities.iter().map(|e| e.id.as_str()).collect()
    }

    /// Relationships as a set, for order-insensitive comparison
    pub fn relationship_set(&self) -> BTreeSet<&ExtractedRelationship> {
        self.relationships.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, layer: &str) -> ExtractedEntity {
        ExtractedEntity {
            id: id.to_string(),
            type_id: "t".to_string(),
            label: id.to_string(),
            position: [0.0, 0.0, 0.0],
            layer_key: layer.to_string(),
            subtitle: None,
            color: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_orphan_layer_keys() {
        let mut result = QueryResult::default();
        result.entities.push(entity("a", "L1"));
        result.entities.push(entity("b", "L2"));
        result.relationships.push(ExtractedRelationship {
            subject_id: "c".to_string(),
            predicate_iri: "p".to_string(),
            object_id: "a".to_string(),
            layer_key: String::new(),
        });
        result.layers.insert(
            "L1".to_string(),
            ExtractedLayer {
                key: "L1".to_string(),
                display_name: "Layer 1".to_string(),
                color: DEFAULT_LAYER_COLOR,
                height: DEFAULT_LAYER_HEIGHT,
            },
        );

        let orphans: Vec<_> = result.orphan_layer_keys().into_iter().collect();
        assert_eq!(orphans, vec!["L2".to_string()]);
    }

    #[test]
    fn test_summary_counts() {
        let mut result = QueryResult::default();
        assert!(result.is_empty());
        result.entities.push(entity("a", "L1"));
        result.diagnostics.push(Diagnostic::OrphanLayerKey {
            key: "L1".to_string(),
        });

        let summary = result.summary();
        assert_eq!(summary.entities, 1);
        assert_eq!(summary.diagnostics, 1);
        assert!(!result.is_empty());
        assert!(summary.to_string().starts_with("1 entities"));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::EntityDropped {
            subject: "http://ex.org/a".to_string(),
            missing_required: vec!["http://ex.org/pos".to_string()],
            unresolved: vec![TargetAttribute::Position],
        };
        assert_eq!(
            d.to_string(),
            "entity <http://ex.org/a> dropped; missing required: http://ex.org/pos; unresolved: position"
        );
    }
}
