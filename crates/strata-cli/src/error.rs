//! Error types for the CLI application.

use strata_extractor::ExtractorError;
use strata_registry::RegistryError;
use strata_service::ServiceError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Engine setup error
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Extraction error
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A mapping document has violations
    #[error("Mapping document has {0} violation(s)")]
    ValidationFailed(usize),
}
