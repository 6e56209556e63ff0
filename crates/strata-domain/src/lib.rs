//! Strata Domain Layer
//!
//! This crate holds the vocabulary-independent model shared by every other
//! Strata crate. It has ZERO external dependencies and defines the concepts,
//! value objects, and trait interfaces the infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Triple**: a `(subject, predicate, object)` statement from the source graph
//! - **Mapping Configuration**: declarative rules translating one vocabulary
//!   into entities, relationships, layers, and cross-layer links
//! - **Transform**: a named, data-only value conversion referenced by rules
//! - **Query Result**: the typed, visualization-ready output of an extraction
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and pure functions only
//! - Storage, parsing, validation, and extraction live in other crates
//! - Trait definitions for the external collaborators (store, loader)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mapping;
pub mod result;
pub mod term;
pub mod traits;
pub mod transform;
pub mod vocab;

// Re-exports for convenience
pub use mapping::{
    CrossLayerRule, EntityTypeRule, LayerGroupingRule, MappingConfiguration, PropertyRule,
    RelationshipRule, TargetAttribute,
};
pub use result::{
    CrossLayerLink, Diagnostic, ExtractedEntity, ExtractedLayer, ExtractedRelationship,
    QueryResult, ResultSummary,
};
pub use term::{Term, Triple};
pub use traits::{SourceLoader, TripleStore};
pub use transform::{AttributeValue, Transform, TransformError};
