//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for the result shape check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultValidationConfig {
    /// Reject results with no entities
    pub require_entities: bool,

    /// Reject entities with non-finite position components
    pub check_positions: bool,

    /// Reject layers with out-of-range colors or non-finite heights
    pub check_layers: bool,
}

impl Default for ResultValidationConfig {
    fn default() -> Self {
        Self {
            require_entities: true,
            check_positions: true,
            check_layers: true,
        }
    }
}

impl ResultValidationConfig {
    /// Create a permissive configuration (empty results allowed)
    pub fn permissive() -> Self {
        Self {
            require_entities: false,
            check_positions: true,
            check_layers: false,
        }
    }

    /// Create a strict configuration (all checks enabled)
    pub fn strict() -> Self {
        Self::default()
    }
}
