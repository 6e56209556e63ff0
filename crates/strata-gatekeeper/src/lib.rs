//! Strata Gatekeeper
//!
//! Checks mapping configurations before they are stored or used, and checks
//! extraction results before they are handed to consumers.
//!
//! The Gatekeeper provides:
//! - Mapping validation (entity types, required label/position/layer rules,
//!   unique type ids, namespace prefixes), accumulating every violation
//! - Result shape checks (ids, labels, layer keys, finite positions, layer
//!   display values)
//!
//! # Examples
//!
//! ```
//! use strata_domain::{LayerGroupingRule, MappingConfiguration, Transform};
//! use strata_gatekeeper::validate_mapping;
//!
//! let config = MappingConfiguration::new(
//!     "Empty",
//!     LayerGroupingRule::new("http://ex.org/layer", Transform::LocalName),
//! );
//! let violations = validate_mapping(&config);
//! assert_eq!(
//!     violations[0].to_string(),
//!     "At least one entity type mapping is required"
//! );
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod mapping;
mod result;

pub use config::ResultValidationConfig;
pub use error::GatekeeperError;
pub use mapping::{ensure_valid_mapping, validate_mapping, violation_messages, Violation};
pub use result::{Gatekeeper, RejectionReason, ValidationResult, ValidationStatus};
