//! Configuration documents
//!
//! The serialized form of a [`MappingConfiguration`]. Transforms are written
//! as their string ids (`local_name`, `strip_prefix:<p>`, ...), so a document
//! round-trips the complete rule set.

use crate::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use strata_domain::{
    CrossLayerRule, EntityTypeRule, LayerGroupingRule, MappingConfiguration, PropertyRule,
    RelationshipRule, TargetAttribute, Transform,
};

/// Document encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// TOML
    #[default]
    Toml,
    /// JSON
    Json,
}

impl DocumentFormat {
    /// Guess the format of `text`: JSON when it starts with `{`, TOML otherwise
    pub fn detect(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            DocumentFormat::Json
        } else {
            DocumentFormat::Toml
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Toml => f.write_str("toml"),
            DocumentFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(DocumentFormat::Toml),
            "json" => Ok(DocumentFormat::Json),
            other => Err(format!("Unknown document format: {}", other)),
        }
    }
}

/// Serialized mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingDocument {
    /// Human-readable name
    pub name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Prefix to IRI base
    #[serde(default)]
    pub namespace_prefixes: BTreeMap<String, String>,

    /// Layer grouping
    pub layer_grouping: LayerGroupingDocument,

    /// Cross-layer predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_layer: Option<CrossLayerDocument>,

    /// Entity types
    #[serde(default)]
    pub entity_types: Vec<EntityTypeDocument>,

    /// Property rules, in evaluation order
    #[serde(default)]
    pub property_rules: Vec<PropertyRuleDocument>,

    /// Relationship rules
    #[serde(default)]
    pub relationship_rules: Vec<RelationshipDocument>,
}

/// Serialized [`EntityTypeRule`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct EntityTypeDocument {
    pub class_iri: String,
    pub display_label: String,
    pub type_id: String,
}

/// Serialized [`PropertyRule`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PropertyRuleDocument {
    pub property_iri: String,
    pub target: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

/// Serialized [`RelationshipRule`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct RelationshipDocument {
    pub predicate_iri: String,
    pub display_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
}

/// Serialized [`LayerGroupingRule`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct LayerGroupingDocument {
    pub layer_property_iri: String,
    #[serde(default = "default_layer_transform")]
    pub extract_layer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_class_iri: Option<String>,
}

/// Serialized [`CrossLayerRule`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct CrossLayerDocument {
    pub predicate_iri: String,
    pub display_label: String,
}

fn default_layer_transform() -> String {
    Transform::Identity.to_string()
}

impl From<&MappingConfiguration> for MappingDocument {
    fn from(config: &MappingConfiguration) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            namespace_prefixes: config.namespace_prefixes.clone(),
            layer_grouping: LayerGroupingDocument {
                layer_property_iri: config.layer_grouping.layer_property_iri.clone(),
                extract_layer_id: config.layer_grouping.extract_layer_id.to_string(),
                layer_class_iri: config.layer_grouping.layer_class_iri.clone(),
            },
            cross_layer: config.cross_layer.as_ref().map(|rule| CrossLayerDocument {
                predicate_iri: rule.predicate_iri.clone(),
                display_label: rule.display_label.clone(),
            }),
            entity_types: config
                .entity_types
                .iter()
                .map(|rule| EntityTypeDocument {
                    class_iri: rule.class_iri.clone(),
                    display_label: rule.display_label.clone(),
                    type_id: rule.type_id.clone(),
                })
                .collect(),
            property_rules: config
                .property_rules
                .iter()
                .map(|rule| PropertyRuleDocument {
                    property_iri: rule.property_iri.clone(),
                    target: rule.target.as_str().to_string(),
                    required: rule.required,
                    transform: rule.transform.as_ref().map(ToString::to_string),
                })
                .collect(),
            relationship_rules: config
                .relationship_rules
                .iter()
                .map(|rule| RelationshipDocument {
                    predicate_iri: rule.predicate_iri.clone(),
                    display_label: rule.display_label.clone(),
                    style_id: rule.style_id.clone(),
                })
                .collect(),
        }
    }
}

impl TryFrom<MappingDocument> for MappingConfiguration {
    type Error = RegistryError;

    fn try_from(doc: MappingDocument) -> Result<Self, Self::Error> {
        let grouping = &doc.layer_grouping;
        let mut layer_grouping = LayerGroupingRule::new(
            grouping.layer_property_iri.clone(),
            parse_transform(&grouping.extract_layer_id)?,
        );
        layer_grouping.layer_class_iri = grouping.layer_class_iri.clone();

        let mut config = MappingConfiguration::new(doc.name, layer_grouping)
            .with_description(doc.description);
        config.namespace_prefixes = doc.namespace_prefixes;
        config.cross_layer = doc
            .cross_layer
            .map(|rule| CrossLayerRule::new(rule.predicate_iri, rule.display_label));

        for rule in doc.entity_types {
            config = config.with_entity_type(EntityTypeRule::new(
                rule.class_iri,
                rule.display_label,
                rule.type_id,
            ));
        }

        for rule in doc.property_rules {
            let target = rule
                .target
                .parse::<TargetAttribute>()
                .map_err(RegistryError::Parse)?;
            let mut property = if rule.required {
                PropertyRule::required(rule.property_iri, target)
            } else {
                PropertyRule::optional(rule.property_iri, target)
            };
            if let Some(transform) = &rule.transform {
                property = property.with_transform(parse_transform(transform)?);
            }
            config = config.with_property(property);
        }

        for rule in doc.relationship_rules {
            let mut relationship = RelationshipRule::new(rule.predicate_iri, rule.display_label);
            relationship.style_id = rule.style_id;
            config = config.with_relationship(relationship);
        }

        Ok(config)
    }
}

fn parse_transform(id: &str) -> Result<Transform, RegistryError> {
    id.parse::<Transform>().map_err(RegistryError::Parse)
}

/// Write a configuration as a document
pub fn render_document(
    config: &MappingConfiguration,
    format: DocumentFormat,
) -> Result<String, RegistryError> {
    let doc = MappingDocument::from(config);
    match format {
        DocumentFormat::Toml => {
            toml::to_string_pretty(&doc).map_err(|e| RegistryError::Serialize(e.to_string()))
        }
        DocumentFormat::Json => {
            serde_json::to_string_pretty(&doc).map_err(|e| RegistryError::Serialize(e.to_string()))
        }
    }
}

/// Read a configuration from a document
///
/// Only the document shape is checked here; rule consistency is checked on
/// registration.
pub fn parse_document(
    text: &str,
    format: DocumentFormat,
) -> Result<MappingConfiguration, RegistryError> {
    let doc: MappingDocument = match format {
        DocumentFormat::Toml => {
            toml::from_str(text).map_err(|e| RegistryError::Parse(e.to_string()))?
        }
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| RegistryError::Parse(e.to_string()))?
        }
    };
    MappingConfiguration::try_from(doc)
}
