//! Error types for the Extractor

use strata_gatekeeper::GatekeeperError;
use thiserror::Error;

/// Structural failures of an extraction
///
/// Missing or malformed data never produces one of these; it only drops the
/// affected item and adds a diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// No triple store was supplied
    #[error("No data loaded")]
    NoDataLoaded,

    /// The mapping configuration failed validation
    #[error("Configuration invalid: {}", .0.join("; "))]
    ConfigurationInvalid(Vec<String>),

    /// Engine tuning is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<GatekeeperError> for ExtractorError {
    fn from(e: GatekeeperError) -> Self {
        match e {
            GatekeeperError::ConfigurationInvalid(violations) => {
                ExtractorError::ConfigurationInvalid(violations)
            }
            GatekeeperError::ResultValidationFailed(reasons) => {
                ExtractorError::Config(reasons.join("; "))
            }
        }
    }
}
