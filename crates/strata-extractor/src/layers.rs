//! Pass C: layer extraction
//!
//! A layer's key comes from applying the grouping transform to the layer
//! resource's own IRI, while entities and relationships take theirs from a
//! property value. The two only agree when the transform maps both forms to
//! the same string; `check_layer_consistency` reports the keys that don't.

use crate::config::ExtractorConfig;
use crate::lookup::{as_color, ValueResolver};
use std::collections::{BTreeMap, HashSet};
use strata_domain::{
    Diagnostic, ExtractedLayer, MappingConfiguration, TargetAttribute, Term, TripleStore,
};
use tracing::{debug, warn};

pub(crate) fn extract_layers<S: TripleStore + ?Sized>(
    store: &S,
    mapping: &MappingConfiguration,
    config: &ExtractorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<String, ExtractedLayer> {
    let grouping = &mapping.layer_grouping;
    let Some(class_iri) = &grouping.layer_class_iri else {
        debug!("Pass C: no layer class configured");
        return BTreeMap::new();
    };

    let class = Term::iri(class_iri.as_str());
    let resolver = ValueResolver::new(store, config.conflict_policy);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut layers = BTreeMap::new();

    for statement in store.matching(None, Some(&config.type_predicate), Some(&class)) {
        let subject = statement.subject.as_str();
        if !visited.insert(subject) {
            continue;
        }

        let key = match grouping.extract_layer_id.apply_key(subject) {
            Ok(key) if !key.is_empty() => key,
            Ok(_) => {
                drop_layer(diagnostics, subject, "empty layer key".to_string());
                continue;
            }
            Err(e) => {
                drop_layer(diagnostics, subject, e.to_string());
                continue;
            }
        };

        let mut display_name = None;
        let mut color = None;
        let mut height = None;

        for rule in &mapping.property_rules {
            let slot_open = match rule.target {
                TargetAttribute::Label => display_name.is_none(),
                TargetAttribute::Color => color.is_none(),
                TargetAttribute::Height => height.is_none(),
                _ => false,
            };
            if !slot_open {
                continue;
            }

            let Some(value) = resolver.resolve(subject, rule, diagnostics) else {
                continue;
            };

            match rule.target {
                TargetAttribute::Label => {
                    display_name = Some(value.to_text()).filter(|name| !name.is_empty());
                }
                TargetAttribute::Color => color = as_color(&value),
                TargetAttribute::Height => height = value.as_number(),
                _ => {}
            }
        }

        let Some(display_name) = display_name else {
            drop_layer(diagnostics, subject, "no display name".to_string());
            continue;
        };

        if layers.contains_key(&key) {
            drop_layer(diagnostics, subject, format!("duplicate layer key {:?}", key));
            continue;
        }

        layers.insert(
            key.clone(),
            ExtractedLayer {
                key,
                display_name,
                color: color.unwrap_or(config.default_layer_color),
                height: height.unwrap_or(config.default_layer_height),
            },
        );
    }

    debug!("Pass C: {} layer resources, {} layers", visited.len(), layers.len());
    layers
}

fn drop_layer(diagnostics: &mut Vec<Diagnostic>, subject: &str, reason: String) {
    warn!("Dropping layer <{}>: {}", subject, reason);
    diagnostics.push(Diagnostic::LayerDropped {
        subject: subject.to_string(),
        reason,
    });
}
