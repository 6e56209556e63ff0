//! Error types for the storage layer

use thiserror::Error;

/// Errors that can occur while loading statements
#[derive(Error, Debug)]
pub enum StoreError {
    /// Source could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source text is not valid Turtle / N-Triples
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        /// Source being parsed
        source_name: String,
        /// Parser message
        message: String,
    },

    /// Base IRI rejected by the parser
    #[error("Invalid base IRI '{0}': {1}")]
    InvalidBaseIri(String, String),
}
