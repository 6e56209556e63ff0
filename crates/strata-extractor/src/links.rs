//! Pass D: cross-layer links

use strata_domain::{CrossLayerLink, MappingConfiguration, TripleStore};
use tracing::debug;

pub(crate) fn extract_cross_layer_links<S: TripleStore + ?Sized>(
    store: &S,
    mapping: &MappingConfiguration,
) -> Vec<CrossLayerLink> {
    let Some(rule) = &mapping.cross_layer else {
        return Vec::new();
    };

    let links: Vec<CrossLayerLink> = store
        .matching(None, Some(&rule.predicate_iri), None)
        .map(|t| CrossLayerLink {
            source_id: t.subject.clone(),
            target_id: t.object.lexical().to_string(),
        })
        .collect();

    debug!("Pass D: {} cross-layer links", links.len());
    links
}
