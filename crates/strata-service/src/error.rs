//! Error types for the Extraction Service

use strata_extractor::ExtractorError;
use strata_registry::RegistryError;
use thiserror::Error;

/// Errors surfaced by [`ExtractionService`](crate::ExtractionService)
///
/// Every variant means nothing usable was produced. A result with fewer
/// items than expected is returned as `Ok` with diagnostics instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No configuration is registered under the id
    #[error("Configuration not found: {0}")]
    ConfigurationNotFound(String),

    /// The loader could not produce a store
    #[error("Failed to load {source_id}: {cause}")]
    LoadFailed {
        /// Source identifier
        source_id: String,
        /// Loader error message
        cause: String,
    },

    /// The load did not finish before the deadline
    #[error("Loading {source_id} timed out after {after_secs}s")]
    LoadTimedOut {
        /// Source identifier
        source_id: String,
        /// Deadline in seconds
        after_secs: u64,
    },

    /// The extractor was given no store
    #[error("No data loaded")]
    NoDataLoaded,

    /// The configuration or engine tuning is invalid
    #[error("Configuration invalid: {}", .0.join("; "))]
    ConfigurationInvalid(Vec<String>),

    /// The extraction result failed its shape check
    #[error("Result validation failed: {}", .0.join("; "))]
    ResultValidationFailed(Vec<String>),
}

impl From<ExtractorError> for ServiceError {
    fn from(e: ExtractorError) -> Self {
        match e {
            ExtractorError::NoDataLoaded => ServiceError::NoDataLoaded,
            ExtractorError::ConfigurationInvalid(violations) => {
                ServiceError::ConfigurationInvalid(violations)
            }
            ExtractorError::Config(message) => ServiceError::ConfigurationInvalid(vec![message]),
        }
    }
}

impl From<RegistryError> for ServiceError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::ConfigurationNotFound(id) | RegistryError::SourceNotFound(id) => {
                ServiceError::ConfigurationNotFound(id)
            }
            RegistryError::ConfigurationInvalid(violations) => {
                ServiceError::ConfigurationInvalid(violations)
            }
            other => ServiceError::ConfigurationInvalid(vec![other.to_string()]),
        }
    }
}
