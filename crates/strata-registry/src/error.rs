//! Error types for the configuration registry

use std::path::PathBuf;
use strata_gatekeeper::GatekeeperError;
use thiserror::Error;

/// Registry operation failures
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The configuration failed validation and was not stored
    #[error("Configuration invalid: {}", .0.join("; "))]
    ConfigurationInvalid(Vec<String>),

    /// No configuration is registered under the id
    #[error("Configuration not found: {0}")]
    ConfigurationNotFound(String),

    /// The configuration to clone does not exist
    #[error("Source configuration not found: {0}")]
    SourceNotFound(String),

    /// The default configuration cannot be removed
    #[error("The default configuration cannot be removed")]
    CannotRemoveDefault,

    /// A configuration document could not be read
    #[error("Failed to parse configuration document: {0}")]
    Parse(String),

    /// A configuration could not be written as a document
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// A configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl From<GatekeeperError> for RegistryError {
    fn from(e: GatekeeperError) -> Self {
        match e {
            GatekeeperError::ConfigurationInvalid(violations) => {
                RegistryError::ConfigurationInvalid(violations)
            }
            GatekeeperError::ResultValidationFailed(reasons) => {
                RegistryError::ConfigurationInvalid(reasons)
            }
        }
    }
}
