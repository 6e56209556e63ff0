//! Strata Configuration Registry
//!
//! Holds named, validated [`MappingConfiguration`](strata_domain::MappingConfiguration)s
//! with one active selection, seeded with the built-in configurations.
//!
//! # Key Features
//!
//! - **All-or-nothing registration**: a configuration that fails validation
//!   is never stored
//! - **Protected default**: `default` can't be removed and is the fallback
//!   for a dangling active selection
//! - **Documents**: export and import as TOML or JSON, transforms included
//! - **Shared handle**: clones share state behind a read/write lock
//!
//! # Example Usage
//!
//! ```
//! use strata_registry::{ConfigurationRegistry, DocumentFormat};
//!
//! let registry = ConfigurationRegistry::new();
//! registry.clone_configuration("movies", "my-movies").unwrap();
//! registry.set_active("my-movies").unwrap();
//!
//! let text = registry.export_as("my-movies", DocumentFormat::Json).unwrap();
//! registry.import_from_text("copy", &text).unwrap();
//! assert_eq!(registry.get("copy"), registry.get("movies"));
//! ```

#![warn(missing_docs)]

pub mod builtins;
mod document;
mod error;
mod registry;

pub use builtins::{BUILTIN_IDS, DEFAULT_ID};
pub use document::{
    parse_document, render_document, CrossLayerDocument, DocumentFormat, EntityTypeDocument,
    LayerGroupingDocument, MappingDocument, PropertyRuleDocument, RelationshipDocument,
};
pub use error::RegistryError;
pub use registry::{ConfigurationRegistry, ConfigurationSummary};
