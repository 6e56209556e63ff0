//! Mapping configuration validation

use crate::GatekeeperError;
use std::collections::HashSet;
use std::fmt;
use strata_domain::{MappingConfiguration, TargetAttribute};

/// One consistency problem in a mapping configuration
///
/// The `Display` strings are stable and safe to match on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// No entity type rules
    NoEntityTypes,

    /// No required property rule targets the attribute
    MissingRequiredRule(TargetAttribute),

    /// The type id is used by more than one entity type rule
    DuplicateTypeId(String),

    /// No namespace prefixes
    NoNamespacePrefixes,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoEntityTypes => f.write_str("At least one entity type mapping is required"),
            Violation::MissingRequiredRule(target) => {
                let name = match target {
                    TargetAttribute::Label => "Label",
                    TargetAttribute::Position => "Position",
                    TargetAttribute::Layer => "Layer",
                    TargetAttribute::Color => "Color",
                    TargetAttribute::Subtitle => "Subtitle",
                    TargetAttribute::Height => "Height",
                    TargetAttribute::Custom => "Custom",
                };
                write!(f, "A required {} property mapping is required", name)
            }
            Violation::DuplicateTypeId(id) => write!(f, "Duplicate entity type id: {}", id),
            Violation::NoNamespacePrefixes => f.write_str("At least one namespace prefix is required"),
        }
    }
}

/// Check a configuration, returning every violation found
///
/// Never fails. Checks run in a fixed order so the same configuration always
/// yields the same list:
///
/// 1. entity types present
/// 2. required label rule
/// 3. required position rule
/// 4. required layer rule
/// 5. unique type ids (one violation per duplicated id, in first-seen order)
/// 6. namespace prefixes present
pub fn validate_mapping(config: &MappingConfiguration) -> Vec<Violation> {
    let mut violations = Vec::new();

    if config.entity_types.is_empty() {
        violations.push(Violation::NoEntityTypes);
    }

    for target in [
        TargetAttribute::Label,
        TargetAttribute::Position,
        TargetAttribute::Layer,
    ] {
        if !config.has_required(target) {
            violations.push(Violation::MissingRequiredRule(target));
        }
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for rule in &config.entity_types {
        let id = rule.type_id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            violations.push(Violation::DuplicateTypeId(id.to_string()));
        }
    }

    if config.namespace_prefixes.is_empty() {
        violations.push(Violation::NoNamespacePrefixes);
    }

    violations
}

/// Violations rendered as their stable messages
pub fn violation_messages(config: &MappingConfiguration) -> Vec<String> {
    validate_mapping(config)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Fail with [`GatekeeperError::ConfigurationInvalid`] if any violation exists
pub fn ensure_valid_mapping(config: &MappingConfiguration) -> Result<(), GatekeeperError> {
    let messages = violation_messages(config);
    if messages.is_empty() {
        Ok(())
    } else {
        Err(GatekeeperError::ConfigurationInvalid(messages))
    }
}
