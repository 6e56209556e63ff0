//! Strata Extractor
//!
//! Turns a loaded triple store into typed, visualization-ready entities,
//! relationships, layers, and cross-layer links, driven entirely by a
//! [`MappingConfiguration`](strata_domain::MappingConfiguration).
//!
//! # Architecture
//!
//! ```text
//! TripleStore + MappingConfiguration → Extractor → QueryResult
//! ```
//!
//! Extraction runs four independent passes in a fixed order:
//!
//! - **Pass A**: subjects typed with a configured class become entities
//! - **Pass B**: statements with a relationship predicate become relationships
//! - **Pass C**: resources typed with the layer class become layers
//! - **Pass D**: statements with the cross-layer predicate become links
//!
//! Missing data never fails an extraction. The affected entity or layer is
//! dropped and a [`Diagnostic`](strata_domain::Diagnostic) says why.
//!
//! # Example Usage
//!
//! ```
//! use strata_domain::{
//!     EntityTypeRule, LayerGroupingRule, MappingConfiguration, PropertyRule,
//!     TargetAttribute, Transform, Triple,
//! };
//! use strata_domain::vocab::RDF_TYPE;
//! use strata_extractor::Extractor;
//! use strata_store::MemoryStore;
//!
//! let mapping = MappingConfiguration::new(
//!     "People",
//!     LayerGroupingRule::new("http://ex.org/team", Transform::Identity),
//! )
//! .with_entity_type(EntityTypeRule::new("http://ex.org/Person", "Person", "person"))
//! .with_property(PropertyRule::required("http://ex.org/name", TargetAttribute::Label))
//! .with_property(
//!     PropertyRule::required("http://ex.org/pos", TargetAttribute::Position)
//!         .with_transform(Transform::Vector3),
//! )
//! .with_property(PropertyRule::required("http://ex.org/team", TargetAttribute::Layer))
//! .with_prefix("ex", "http://ex.org/");
//!
//! let store = MemoryStore::from_triples(vec![
//!     Triple::with_iri("http://ex.org/alice", RDF_TYPE, "http://ex.org/Person"),
//!     Triple::with_literal("http://ex.org/alice", "http://ex.org/name", "Alice"),
//!     Triple::with_literal("http://ex.org/alice", "http://ex.org/pos", "1, 2, 3"),
//!     Triple::with_literal("http://ex.org/alice", "http://ex.org/team", "core"),
//! ]);
//!
//! let result = Extractor::default().extract(Some(&store), &mapping).unwrap();
//! assert_eq!(result.entities.len(), 1);
//! assert_eq!(result.entities[0].layer_key, "core");
//! ```

#![warn(missing_docs)]

mod config;
mod entities;
mod error;
mod extractor;
mod layers;
mod links;
mod lookup;
mod relationships;

#[cfg(test)]
mod tests;

pub use config::{ConflictPolicy, ExtractorConfig};
pub use error::ExtractorError;
pub use extractor::Extractor;
