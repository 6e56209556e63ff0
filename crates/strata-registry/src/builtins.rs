//! Built-in mapping configurations

use strata_domain::vocab::{RDFS_LABEL, RDFS_NS, RDF_NS};
use strata_domain::{
    CrossLayerRule, EntityTypeRule, LayerGroupingRule, MappingConfiguration, PropertyRule,
    RelationshipRule, TargetAttribute, Transform,
};

/// Id of the protected default configuration
pub const DEFAULT_ID: &str = "default";

/// Ids of every built-in configuration, in registration order
pub const BUILTIN_IDS: [&str; 4] = [DEFAULT_ID, "movies", "organization", "papers"];

const STRATA: &str = "http://strata.dev/ns#";
const MOVIES: &str = "http://example.org/movies#";
const ORG: &str = "http://example.org/org#";
const PAPERS: &str = "http://example.org/papers#";

/// Base IRI of research field resources in the `papers` configuration
pub const PAPER_FIELDS: &str = "http://example.org/papers/fields/";

fn iri(ns: &str, local: &str) -> String {
    format!("{}{}", ns, local)
}

fn with_rdf_prefixes(config: MappingConfiguration) -> MappingConfiguration {
    config.with_prefix("rdf", RDF_NS).with_prefix("rdfs", RDFS_NS)
}

/// Every built-in configuration paired with its id
pub fn builtins() -> Vec<(&'static str, MappingConfiguration)> {
    vec![
        (DEFAULT_ID, default_configuration()),
        ("movies", movies()),
        ("organization", organization()),
        ("papers", papers()),
    ]
}

/// Whether `id` names a built-in configuration
pub fn is_builtin(id: &str) -> bool {
    BUILTIN_IDS.contains(&id)
}

/// The generic Strata vocabulary
///
/// Nodes carry `rdfs:label`, `strata:position` ("x, y, z") and a
/// `strata:layer` pointing at a `strata:Layer` resource.
pub fn default_configuration() -> MappingConfiguration {
    let config = MappingConfiguration::new(
        "Default",
        LayerGroupingRule::new(iri(STRATA, "layer"), Transform::LocalName)
            .with_layer_class(iri(STRATA, "Layer")),
    )
    .with_description("Generic nodes, layers and links in the Strata vocabulary")
    .with_entity_type(EntityTypeRule::new(iri(STRATA, "Node"), "Node", "node"))
    .with_property(PropertyRule::required(RDFS_LABEL, TargetAttribute::Label))
    .with_property(
        PropertyRule::required(iri(STRATA, "position"), TargetAttribute::Position)
            .with_transform(Transform::Vector3),
    )
    .with_property(
        PropertyRule::required(iri(STRATA, "layer"), TargetAttribute::Layer)
            .with_transform(Transform::LocalName),
    )
    .with_property(PropertyRule::optional(
        iri(STRATA, "subtitle"),
        TargetAttribute::Subtitle,
    ))
    .with_property(
        PropertyRule::optional(iri(STRATA, "color"), TargetAttribute::Color)
            .with_transform(Transform::Color),
    )
    .with_property(
        PropertyRule::optional(iri(STRATA, "height"), TargetAttribute::Height)
            .with_transform(Transform::Number),
    )
    .with_relationship(RelationshipRule::new(iri(STRATA, "connectedTo"), "connected to"))
    .with_cross_layer(CrossLayerRule::new(iri(STRATA, "linksTo"), "links to"))
    .with_prefix("strata", STRATA);

    with_rdf_prefixes(config)
}

/// Characters grouped by the movie they appear in
pub fn movies() -> MappingConfiguration {
    let config = MappingConfiguration::new(
        "Movies",
        LayerGroupingRule::new(iri(MOVIES, "appearsIn"), Transform::LocalName)
            .with_layer_class(iri(MOVIES, "Movie")),
    )
    .with_description("Characters and actors, layered by movie")
    .with_entity_type(EntityTypeRule::new(iri(MOVIES, "Character"), "Character", "character"))
    .with_entity_type(EntityTypeRule::new(iri(MOVIES, "Actor"), "Actor", "actor"))
    .with_property(PropertyRule::required(iri(MOVIES, "name"), TargetAttribute::Label))
    .with_property(
        PropertyRule::required(iri(MOVIES, "position"), TargetAttribute::Position)
            .with_transform(Transform::Vector3),
    )
    .with_property(
        PropertyRule::required(iri(MOVIES, "appearsIn"), TargetAttribute::Layer)
            .with_transform(Transform::LocalName),
    )
    .with_property(
        PropertyRule::optional(iri(MOVIES, "portrayedBy"), TargetAttribute::Subtitle)
            .with_transform(Transform::LocalName),
    )
    .with_property(
        PropertyRule::optional(iri(MOVIES, "color"), TargetAttribute::Color)
            .with_transform(Transform::Color),
    )
    .with_property(
        PropertyRule::optional(iri(MOVIES, "releaseYear"), TargetAttribute::Height)
            .with_transform(Transform::Number),
    )
    .with_relationship(RelationshipRule::new(iri(MOVIES, "knows"), "knows"))
    .with_relationship(
        RelationshipRule::new(iri(MOVIES, "rivalOf"), "rival of").with_style("dashed"),
    )
    .with_cross_layer(CrossLayerRule::new(
        iri(MOVIES, "crossesOverWith"),
        "crosses over with",
    ))
    .with_prefix("mov", MOVIES);

    with_rdf_prefixes(config)
}

/// People grouped by department
pub fn organization() -> MappingConfiguration {
    let config = MappingConfiguration::new(
        "Organization",
        LayerGroupingRule::new(iri(ORG, "memberOf"), Transform::LocalName)
            .with_layer_class(iri(ORG, "Department")),
    )
    .with_description("Employees and contractors, layered by department")
    .with_entity_type(EntityTypeRule::new(iri(ORG, "Employee"), "Employee", "employee"))
    .with_entity_type(EntityTypeRule::new(iri(ORG, "Contractor"), "Contractor", "contractor"))
    .with_property(PropertyRule::required(iri(ORG, "name"), TargetAttribute::Label))
    .with_property(PropertyRule::optional(RDFS_LABEL, TargetAttribute::Label))
    .with_property(
        PropertyRule::required(iri(ORG, "desk"), TargetAttribute::Position)
            .with_transform(Transform::Vector3),
    )
    .with_property(
        PropertyRule::required(iri(ORG, "memberOf"), TargetAttribute::Layer)
            .with_transform(Transform::LocalName),
    )
    .with_property(
        PropertyRule::optional(iri(ORG, "title"), TargetAttribute::Subtitle)
            .with_transform(Transform::Trim),
    )
    .with_property(
        PropertyRule::optional(iri(ORG, "floor"), TargetAttribute::Height)
            .with_transform(Transform::Number),
    )
    .with_property(
        PropertyRule::optional(iri(ORG, "email"), TargetAttribute::Custom)
            .with_transform(Transform::Lowercase),
    )
    .with_relationship(RelationshipRule::new(iri(ORG, "reportsTo"), "reports to"))
    .with_relationship(
        RelationshipRule::new(iri(ORG, "collaboratesWith"), "collaborates with")
            .with_style("dotted"),
    )
    .with_cross_layer(CrossLayerRule::new(iri(ORG, "liaisonTo"), "liaison to"))
    .with_prefix("org", ORG);

    with_rdf_prefixes(config)
}

/// Papers and authors grouped by research field
///
/// Field keys are the field IRI with [`PAPER_FIELDS`] stripped.
pub fn papers() -> MappingConfiguration {
    let config = MappingConfiguration::new(
        "Papers",
        LayerGroupingRule::new(
            iri(PAPERS, "field"),
            Transform::StripPrefix(PAPER_FIELDS.to_string()),
        )
        .with_layer_class(iri(PAPERS, "Field")),
    )
    .with_description("Papers and authors, layered by research field")
    .with_entity_type(EntityTypeRule::new(iri(PAPERS, "Paper"), "Paper", "paper"))
    .with_entity_type(EntityTypeRule::new(iri(PAPERS, "Author"), "Author", "author"))
    .with_property(PropertyRule::required(iri(PAPERS, "title"), TargetAttribute::Label))
    .with_property(
        PropertyRule::required(iri(PAPERS, "embedding"), TargetAttribute::Position)
            .with_transform(Transform::Vector3),
    )
    .with_property(
        PropertyRule::required(iri(PAPERS, "field"), TargetAttribute::Layer)
            .with_transform(Transform::StripPrefix(PAPER_FIELDS.to_string())),
    )
    .with_property(PropertyRule::optional(
        iri(PAPERS, "venue"),
        TargetAttribute::Subtitle,
    ))
    .with_property(
        PropertyRule::optional(iri(PAPERS, "year"), TargetAttribute::Custom)
            .with_transform(Transform::Number),
    )
    .with_relationship(RelationshipRule::new(iri(PAPERS, "cites"), "cites"))
    .with_relationship(RelationshipRule::new(iri(PAPERS, "authoredBy"), "authored by"))
    .with_prefix("pap", PAPERS);

    with_rdf_prefixes(config)
}
