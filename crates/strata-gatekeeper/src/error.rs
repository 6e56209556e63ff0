//! Gatekeeper error types

use thiserror::Error;

/// Errors raised when a checked value fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatekeeperError {
    /// Mapping configuration is inconsistent
    #[error("Configuration invalid: {}", .0.join("; "))]
    ConfigurationInvalid(Vec<String>),

    /// Extraction result failed the shape check
    #[error("Result validation failed: {}", .0.join("; "))]
    ResultValidationFailed(Vec<String>),
}
