//! Mapping configuration model
//!
//! A [`MappingConfiguration`] is pure data: it tells the extraction engine
//! which classes become entities, which properties fill which attribute
//! slots, which predicates are relationships, and how layers are keyed.
//! Consistency checks live in strata-gatekeeper.

use crate::Transform;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Attribute slot a property rule fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetAttribute {
    /// Display label
    Label,
    /// `(x, y, z)` position
    Position,
    /// Layer membership key
    Layer,
    /// Display color
    Color,
    /// Secondary label
    Subtitle,
    /// Layer elevation
    Height,
    /// Any other attribute, kept in the entity's extra bag
    Custom,
}

impl TargetAttribute {
    /// All variants in declaration order
    pub const ALL: [TargetAttribute; 7] = [
        TargetAttribute::Label,
        TargetAttribute::Position,
        TargetAttribute::Layer,
        TargetAttribute::Color,
        TargetAttribute::Subtitle,
        TargetAttribute::Height,
        TargetAttribute::Custom,
    ];

    /// Stable lowercase name used in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetAttribute::Label => "label",
            TargetAttribute::Position => "position",
            TargetAttribute::Layer => "layer",
            TargetAttribute::Color => "color",
            TargetAttribute::Subtitle => "subtitle",
            TargetAttribute::Height => "height",
            TargetAttribute::Custom => "custom",
        }
    }
}

impl fmt::Display for TargetAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetAttribute::ALL
            .into_iter()
            .find(|attr| attr.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown target attribute: {}", s))
    }
}

/// Maps an RDF class to an entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeRule {
    /// Class IRI asserted via `rdf:type`
    pub class_iri: String,

    /// Human-readable name of the type
    pub display_label: String,

    /// Identifier unique within the configuration
    pub type_id: String,
}

impl EntityTypeRule {
    /// Create a new entity type rule
    pub fn new(
        class_iri: impl Into<String>,
        display_label: impl Into<String>,
        type_id: impl Into<String>,
    ) -> Self {
        Self {
            class_iri: class_iri.into(),
            display_label: display_label.into(),
            type_id: type_id.into(),
        }
    }
}

/// Maps a property to an attribute slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRule {
    /// Property IRI whose object supplies the value
    pub property_iri: String,

    /// Slot the value fills
    pub target: TargetAttribute,

    /// Whether an entity without this property is dropped
    pub required: bool,

    /// Optional conversion applied to the raw object
    pub transform: Option<Transform>,
}

impl PropertyRule {
    /// A required rule without a transform
    pub fn required(property_iri: impl Into<String>, target: TargetAttribute) -> Self {
        Self {
            property_iri: property_iri.into(),
            target,
            required: true,
            transform: None,
        }
    }

    /// An optional rule without a transform
    pub fn optional(property_iri: impl Into<String>, target: TargetAttribute) -> Self {
        Self {
            property_iri: property_iri.into(),
            target,
            required: false,
            transform: None,
        }
    }

    /// Attach a transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Marks a predicate as a relationship between entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRule {
    /// Predicate IRI
    pub predicate_iri: String,

    /// Human-readable label
    pub display_label: String,

    /// Optional renderer style hint
    pub style_id: Option<String>,
}

impl RelationshipRule {
    /// Create a relationship rule without a style
    pub fn new(predicate_iri: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            predicate_iri: predicate_iri.into(),
            display_label: display_label.into(),
            style_id: None,
        }
    }

    /// Attach a style hint
    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }
}

/// How entities are grouped into layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerGroupingRule {
    /// Property carrying each entity's layer membership
    pub layer_property_iri: String,

    /// Normalizes a raw value (or a layer's own IRI) into a layer key
    pub extract_layer_id: Transform,

    /// Class of layer resources; without it no layer map is produced
    pub layer_class_iri: Option<String>,
}

impl LayerGroupingRule {
    /// Create a grouping rule without a layer class
    pub fn new(layer_property_iri: impl Into<String>, extract_layer_id: Transform) -> Self {
        Self {
            layer_property_iri: layer_property_iri.into(),
            extract_layer_id,
            layer_class_iri: None,
        }
    }

    /// Set the layer class
    pub fn with_layer_class(mut self, layer_class_iri: impl Into<String>) -> Self {
        self.layer_class_iri = Some(layer_class_iri.into());
        self
    }
}

/// Marks a predicate whose statements become cross-layer links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossLayerRule {
    /// Predicate IRI
    pub predicate_iri: String,

    /// Human-readable label
    pub display_label: String,
}

impl CrossLayerRule {
    /// Create a cross-layer rule
    pub fn new(predicate_iri: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            predicate_iri: predicate_iri.into(),
            display_label: display_label.into(),
        }
    }
}

/// Declarative schema translating one vocabulary into the generic model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConfiguration {
    /// Human-readable name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Classes that become entities
    pub entity_types: Vec<EntityTypeRule>,

    /// Attribute rules, evaluated in order
    pub property_rules: Vec<PropertyRule>,

    /// Predicates that become relationships
    pub relationship_rules: Vec<RelationshipRule>,

    /// Layer grouping
    pub layer_grouping: LayerGroupingRule,

    /// Optional cross-layer predicate
    pub cross_layer: Option<CrossLayerRule>,

    /// Prefix to IRI base, informational and export use only
    pub namespace_prefixes: BTreeMap<String, String>,
}

impl MappingConfiguration {
    /// Start an empty configuration
    ///
    /// The result is not valid until entity types, the required
    /// label/position/layer rules, and at least one prefix are added.
    pub fn new(name: impl Into<String>, layer_grouping: LayerGroupingRule) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            entity_types: Vec::new(),
            property_rules: Vec::new(),
            relationship_rules: Vec::new(),
            layer_grouping,
            cross_layer: None,
            namespace_prefixes: BTreeMap::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an entity type
    pub fn with_entity_type(mut self, rule: EntityTypeRule) -> Self {
        self.entity_types.push(rule);
        self
    }

    /// Add a property rule
    pub fn with_property(mut self, rule: PropertyRule) -> Self {
        self.property_rules.push(rule);
        self
    }

    /// Add a relationship rule
    pub fn with_relationship(mut self, rule: RelationshipRule) -> Self {
        self.relationship_rules.push(rule);
        self
    }

    /// Set the cross-layer rule
    pub fn with_cross_layer(mut self, rule: CrossLayerRule) -> Self {
        self.cross_layer = Some(rule);
        self
    }

    /// Add a namespace prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>, base: impl Into<String>) -> Self {
        self.namespace_prefixes.insert(prefix.into(), base.into());
        self
    }

    /// Type id configured for `class_iri`, first rule wins
    pub fn type_id_for_class(&self, class_iri: &str) -> Option<&str> {
        self.entity_types
            .iter()
            .find(|rule| rule.class_iri == class_iri)
            .map(|rule| rule.type_id.as_str())
    }

    /// Rules targeting `target`, in declaration order
    pub fn rules_for(&self, target: TargetAttribute) -> impl Iterator<Item = &PropertyRule> {
        self.property_rules
            .iter()
            .filter(move |rule| rule.target == target)
    }

    /// Whether a required rule targets `target`
    pub fn has_required(&self, target: TargetAttribute) -> bool {
        self.rules_for(target).any(|rule| rule.required)
    }

    /// Distinct target attributes used by the property rules, sorted
    pub fn target_attributes(&self) -> Vec<TargetAttribute> {
        let mut targets: Vec<_> = self.property_rules.iter().map(|r| r.target).collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Expand a `prefix:local` name using the configured prefixes
    pub fn expand(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        self.namespace_prefixes
            .get(prefix)
            .map(|base| format!("{}{}", base, local))
    }
}
