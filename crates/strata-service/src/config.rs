//! Configuration for the Extraction Service

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strata_gatekeeper::ResultValidationConfig;

/// Configuration for the Extraction Service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Deadline for one source load (seconds); 0 disables it
    pub load_timeout_secs: u64,

    /// Shape-check results before caching them
    pub validate_results: bool,

    /// Shape-check rules
    pub result_validation: ResultValidationConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            load_timeout_secs: 30,
            validate_results: true,
            result_validation: ResultValidationConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load deadline, `None` when disabled
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_secs > 0).then(|| Duration::from_secs(self.load_timeout_secs))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = ServiceConfig::default();
        assert_eq!(config.load_timeout(), Some(Duration::from_secs(30)));
        assert!(config.validate_results);
    }

    #[test]
    fn test_zero_disables_timeout() {
        let config = ServiceConfig::from_toml("load_timeout_secs = 0").unwrap();
        assert_eq!(config.load_timeout(), None);
        assert!(config.result_validation.require_entities);
    }

    #[test]
    fn test_nested_validation_table() {
        let config = ServiceConfig::from_toml(
            r#"
validate_results = true

[result_validation]
require_entities = false
"#,
        )
        .unwrap();
        assert!(!config.result_validation.require_entities);
        assert!(config.result_validation.check_positions);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ServiceConfig {
            load_timeout_secs: 5,
            validate_results: false,
            result_validation: ResultValidationConfig::permissive(),
        };
        let parsed = ServiceConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
