//! Pass A: typed-entity extraction

use crate::config::ExtractorConfig;
use crate::lookup::{as_color, ValueResolver};
use std::collections::{BTreeMap, HashMap, HashSet};
use strata_domain::{
    AttributeValue, Diagnostic, ExtractedEntity, MappingConfiguration, TargetAttribute,
    TripleStore,
};
use tracing::{debug, warn};

/// Attribute slots filled while running the property rules for one subject
#[derive(Debug, Default)]
struct Candidate {
    label: Option<String>,
    position: Option<[f64; 3]>,
    layer_key: Option<String>,
    subtitle: Option<String>,
    color: Option<u32>,
    extra: BTreeMap<String, AttributeValue>,
}

impl Candidate {
    fn unresolved(&self) -> Vec<TargetAttribute> {
        let mut missing = Vec::new();
        if self.label.is_none() {
            missing.push(TargetAttribute::Label);
        }
        if self.position.is_none() {
            missing.push(TargetAttribute::Position);
        }
        if self.layer_key.is_none() {
            missing.push(TargetAttribute::Layer);
        }
        missing
    }
}

/// Materialize every subject typed with a configured class
///
/// Subjects are visited in type-statement order. A subject typed more than
/// once (duplicate statements, or several configured classes) is considered
/// once, with the type id of its first matching statement.
pub(crate) fn extract_entities<S: TripleStore + ?Sized>(
    store: &S,
    mapping: &MappingConfiguration,
    config: &ExtractorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ExtractedEntity> {
    let mut class_to_type: HashMap<&str, &str> = HashMap::new();
    for rule in &mapping.entity_types {
        class_to_type
            .entry(rule.class_iri.as_str())
            .or_insert(rule.type_id.as_str());
    }

    let resolver = ValueResolver::new(store, config.conflict_policy);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut entities = Vec::new();

    for statement in store.matching(None, Some(&config.type_predicate), None) {
        let Some(type_id) = statement
            .object
            .as_iri()
            .and_then(|class| class_to_type.get(class))
        else {
            continue;
        };

        if !visited.insert(statement.subject.as_str()) {
            continue;
        }

        if let Some(entity) =
            build_entity(&resolver, mapping, &statement.subject, type_id, diagnostics)
        {
            entities.push(entity);
        }
    }

    debug!(
        "Pass A: {} typed subjects, {} entities",
        visited.len(),
        entities.len()
    );
    entities
}

fn build_entity<S: TripleStore + ?Sized>(
    resolver: &ValueResolver<'_, S>,
    mapping: &MappingConfiguration,
    subject: &str,
    type_id: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ExtractedEntity> {
    let mut candidate = Candidate::default();
    let mut missing_required = Vec::new();

    // Every rule runs so all missing required properties are reported together
    for rule in &mapping.property_rules {
        let Some(value) = resolver.resolve(subject, rule, diagnostics) else {
            if rule.required {
                missing_required.push(rule.property_iri.clone());
            }
            continue;
        };

        // Earlier rules take precedence for the same slot
        match rule.target {
            TargetAttribute::Label => {
                let text = value.to_text();
                if candidate.label.is_none() && !text.is_empty() {
                    candidate.label = Some(text);
                }
            }
            TargetAttribute::Position => match value.as_vector3() {
                Some(position) => {
                    candidate.position.get_or_insert(position);
                }
                None => debug!(
                    "<{}> <{}>: {:?} is not a three-component position",
                    subject, rule.property_iri, value
                ),
            },
            TargetAttribute::Layer => {
                let text = value.to_text();
                if candidate.layer_key.is_none() && !text.is_empty() {
                    candidate.layer_key = Some(text);
                }
            }
            TargetAttribute::Subtitle => {
                candidate.subtitle.get_or_insert_with(|| value.to_text());
            }
            TargetAttribute::Color => {
                if candidate.color.is_none() {
                    candidate.color = as_color(&value);
                }
                candidate
                    .extra
                    .entry(rule.property_iri.clone())
                    .or_insert(value);
            }
            TargetAttribute::Height | TargetAttribute::Custom => {
                candidate
                    .extra
                    .entry(rule.property_iri.clone())
                    .or_insert(value);
            }
        }
    }

    if !missing_required.is_empty() {
        warn!(
            "Dropping <{}>: missing required {}",
            subject,
            missing_required.join(", ")
        );
        diagnostics.push(Diagnostic::EntityDropped {
            subject: subject.to_string(),
            missing_required,
            unresolved: candidate.unresolved(),
        });
        return None;
    }

    let unresolved = candidate.unresolved();
    match (candidate.label, candidate.position, candidate.layer_key) {
        (Some(label), Some(position), Some(layer_key)) => Some(ExtractedEntity {
            id: subject.to_string(),
            type_id: type_id.to_string(),
            label,
            position,
            layer_key,
            subtitle: candidate.subtitle,
            color: candidate.color,
            extra: candidate.extra,
        }),
        _ => {
            warn!("Dropping <{}>: unresolved {:?}", subject, unresolved);
            diagnostics.push(Diagnostic::EntityDropped {
                subject: subject.to_string(),
                missing_required: Vec::new(),
                unresolved,
            });
            None
        }
    }
}
