//! Pass B: relationship extraction

use crate::lookup::layer_key_for;
use std::collections::HashSet;
use strata_domain::{ExtractedRelationship, MappingConfiguration, TripleStore};
use tracing::debug;

/// Every statement whose predicate has a relationship rule, in store order
///
/// The layer key is looked up from the subject's layer property on demand.
/// Subjects and objects are not checked against the entity list.
pub(crate) fn extract_relationships<S: TripleStore + ?Sized>(
    store: &S,
    mapping: &MappingConfiguration,
) -> Vec<ExtractedRelationship> {
    if mapping.relationship_rules.is_empty() {
        return Vec::new();
    }

    let predicates: HashSet<&str> = mapping
        .relationship_rules
        .iter()
        .map(|rule| rule.predicate_iri.as_str())
        .collect();

    let relationships: Vec<ExtractedRelationship> = store
        .iter()
        .filter(|t| predicates.contains(t.predicate.as_str()))
        .map(|t| ExtractedRelationship {
            subject_id: t.subject.clone(),
            predicate_iri: t.predicate.clone(),
            object_id: t.object.lexical().to_string(),
            layer_key: layer_key_for(store, &t.subject, &mapping.layer_grouping),
        })
        .collect();

    debug!(
        "Pass B: {} relationships over {} predicates",
        relationships.len(),
        predicates.len()
    );
    relationships
}
