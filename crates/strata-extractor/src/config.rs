//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use strata_domain::result::{DEFAULT_LAYER_COLOR, DEFAULT_LAYER_HEIGHT};
use strata_domain::vocab::RDF_TYPE;

/// What to do when a single-valued property has several distinct values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Take the first value in store order, silently
    FirstMatch,
    /// Take the first value, but record a diagnostic
    #[default]
    Warn,
    /// Treat the attribute as absent and record a diagnostic
    Reject,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Handling of conflicting duplicate values
    pub conflict_policy: ConflictPolicy,

    /// Predicate asserting class membership
    pub type_predicate: String,

    /// Color for layers without a color mapping (packed RGB)
    pub default_layer_color: u32,

    /// Height for layers without a height mapping
    pub default_layer_height: f64,

    /// Record a diagnostic for every layer key with no matching layer
    pub check_layer_consistency: bool,
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Warn,
            type_predicate: RDF_TYPE.to_string(),
            default_layer_color: DEFAULT_LAYER_COLOR,
            default_layer_height: DEFAULT_LAYER_HEIGHT,
            check_layer_consistency: true,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: conflicting values make attributes absent
    pub fn strict() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Reject,
            ..Self::default()
        }
    }

    /// Lenient preset: first match wins, no consistency diagnostics
    pub fn lenient() -> Self {
        Self {
            conflict_policy: ConflictPolicy::FirstMatch,
            check_layer_consistency: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.type_predicate.is_empty() {
            return Err("type_predicate must not be empty".to_string());
        }
        if self.default_layer_color > 0xFF_FFFF {
            return Err(format!(
                "default_layer_color {:#x} does not fit in 24-bit RGB",
                self.default_layer_color
            ));
        }
        if !self.default_layer_height.is_finite() {
            return Err("default_layer_height must be finite".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
