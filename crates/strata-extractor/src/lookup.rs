//! Attribute lookups shared by the extraction passes

use crate::config::ConflictPolicy;
use strata_domain::{
    AttributeValue, Diagnostic, LayerGroupingRule, PropertyRule, Term, TripleStore,
};
use tracing::{debug, warn};

/// Per-pass state for property lookups
pub(crate) struct ValueResolver<'a, S: TripleStore + ?Sized> {
    pub store: &'a S,
    pub policy: ConflictPolicy,
}

impl<'a, S: TripleStore + ?Sized> ValueResolver<'a, S> {
    pub fn new(store: &'a S, policy: ConflictPolicy) -> Self {
        Self { store, policy }
    }

    /// First object of `(subject, property, ?)` in store order
    ///
    /// Exact duplicates are not conflicts. Distinct values are handled per
    /// the conflict policy.
    pub fn first_value(
        &self,
        subject: &str,
        property: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<&'a Term> {
        let mut objects = self.store.objects(subject, property);
        let first = objects.next()?;

        if self.policy == ConflictPolicy::FirstMatch {
            return Some(first);
        }

        let mut distinct = vec![first];
        for term in objects {
            if !distinct.contains(&term) {
                distinct.push(term);
            }
        }

        if distinct.len() == 1 {
            return Some(first);
        }

        let values: Vec<String> = distinct.iter().map(|t| t.lexical().to_string()).collect();
        warn!(
            "<{}> <{}> has {} distinct values; {}",
            subject,
            property,
            values.len(),
            match self.policy {
                ConflictPolicy::Reject => "treating as absent",
                _ => "using the first",
            }
        );
        diagnostics.push(Diagnostic::ConflictingValues {
            subject: subject.to_string(),
            property: property.to_string(),
            values,
        });

        match self.policy {
            ConflictPolicy::Reject => None,
            _ => Some(first),
        }
    }

    /// Look up and convert the value a rule points at
    ///
    /// A transform failure is recorded and treated as "value absent".
    pub fn resolve(
        &self,
        subject: &str,
        rule: &PropertyRule,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<AttributeValue> {
        let term = self.first_value(subject, &rule.property_iri, diagnostics)?;

        match &rule.transform {
            None => Some(AttributeValue::Text(term.lexical().to_string())),
            Some(transform) => match transform.apply(term) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("<{}> <{}>: {}", subject, rule.property_iri, e);
                    diagnostics.push(Diagnostic::TransformFailed {
                        subject: subject.to_string(),
                        property: rule.property_iri.clone(),
                        message: e.to_string(),
                    });
                    None
                }
            },
        }
    }
}

/// On-demand layer key of a subject
///
/// Takes the first `(subject, layer_property, value)` statement and applies
/// `extract_layer_id` to the value. Returns an empty key when the subject has
/// no layer statement or the transform rejects the value. Not memoized.
pub(crate) fn layer_key_for<S: TripleStore + ?Sized>(
    store: &S,
    subject: &str,
    grouping: &LayerGroupingRule,
) -> String {
    let Some(value) = store.objects(subject, &grouping.layer_property_iri).next() else {
        return String::new();
    };

    grouping
        .extract_layer_id
        .apply_key(value.lexical())
        .unwrap_or_else(|e| {
            debug!("Layer key for <{}> unresolved: {}", subject, e);
            String::new()
        })
}

/// Interpret a value as a packed 24-bit RGB color
pub(crate) fn as_color(value: &AttributeValue) -> Option<u32> {
    match value {
        AttributeValue::Number(n) => {
            (n.fract() == 0.0 && (0.0..=f64::from(0xFF_FFFFu32)).contains(n)).then(|| *n as u32)
        }
        AttributeValue::Text(text) => strata_domain::transform::parse_color(text),
        AttributeValue::Vector3(_) => None,
    }
}
