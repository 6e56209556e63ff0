//! Extraction result shape checks

use crate::{GatekeeperError, ResultValidationConfig};
use std::fmt;
use strata_domain::QueryResult;

/// Result of a shape check
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the result passed
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Result accepted
    Accepted,

    /// Result rejected
    Rejected,
}

/// Reasons for rejecting a result
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// The entity list is empty
    NoEntities,

    /// Entity at this index has an empty id
    EmptyEntityId(usize),

    /// Entity has an empty label
    EmptyLabel(String),

    /// Entity has an empty layer key
    EmptyLayerKey(String),

    /// Entity position has a NaN or infinite component
    NonFinitePosition(String),

    /// Layer color does not fit in 24-bit RGB
    InvalidLayerColor {
        /// Layer key
        key: String,
        /// Offending color
        color: u32,
    },

    /// Layer height is NaN or infinite
    NonFiniteLayerHeight(String),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NoEntities => f.write_str("Result contains no entities"),
            RejectionReason::EmptyEntityId(idx) => write!(f, "Entity #{} has an empty id", idx),
            RejectionReason::EmptyLabel(id) => write!(f, "Entity {} has an empty label", id),
            RejectionReason::EmptyLayerKey(id) => {
                write!(f, "Entity {} has an empty layer key", id)
            }
            RejectionReason::NonFinitePosition(id) => {
                write!(f, "Entity {} has a non-finite position", id)
            }
            RejectionReason::InvalidLayerColor { key, color } => {
                write!(f, "Layer {} has an invalid color {:#x}", key, color)
            }
            RejectionReason::NonFiniteLayerHeight(key) => {
                write!(f, "Layer {} has a non-finite height", key)
            }
        }
    }
}

/// The Gatekeeper checks results before they reach consumers
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ResultValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ResultValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ResultValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ResultValidationConfig {
        &self.config
    }

    /// Shape-check an extraction result against the configured rules
    ///
    /// Every entity and layer is checked; all reasons are reported.
    pub fn validate_result(&self, result: &QueryResult) -> ValidationResult {
        let mut reasons = Vec::new();

        if self.config.require_entities && result.entities.is_empty() {
            reasons.push(RejectionReason::NoEntities);
        }

        for (idx, entity) in result.entities.iter().enumerate() {
            if entity.id.is_empty() {
                reasons.push(RejectionReason::EmptyEntityId(idx));
            }
            if entity.label.is_empty() {
                reasons.push(RejectionReason::EmptyLabel(entity.id.clone()));
            }
            if entity.layer_key.is_empty() {
                reasons.push(RejectionReason::EmptyLayerKey(entity.id.clone()));
            }
            if self.config.check_positions && !entity.position.iter().all(|c| c.is_finite()) {
                reasons.push(RejectionReason::NonFinitePosition(entity.id.clone()));
            }
        }

        if self.config.check_layers {
            for layer in result.layers.values() {
                if layer.color > 0xFF_FFFF {
                    reasons.push(RejectionReason::InvalidLayerColor {
                        key: layer.key.clone(),
                        color: layer.color,
                    });
                }
                if !layer.height.is_finite() {
                    reasons.push(RejectionReason::NonFiniteLayerHeight(layer.key.clone()));
                }
            }
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };

        ValidationResult { status, reasons }
    }

    /// Fail with [`GatekeeperError::ResultValidationFailed`] on any rejection
    pub fn ensure_valid_result(&self, result: &QueryResult) -> Result<(), GatekeeperError> {
        let validation = self.validate_result(result);
        if validation.status == ValidationStatus::Accepted {
            return Ok(());
        }

        Err(GatekeeperError::ResultValidationFailed(
            validation.reasons.iter().map(ToString::to_string).collect(),
        ))
    }
}
