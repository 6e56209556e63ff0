//! Strata Extraction Service
//!
//! Thin async orchestration over the loader, the registry, and the
//! extractor.
//!
//! # Architecture
//!
//! ```text
//! source + configuration id
//!   → ConfigurationRegistry (resolve)
//!   → SourceLoader (blocking pool, optional deadline)
//!   → Extractor
//!   → Gatekeeper (result shape check)
//!   → cache → Arc<QueryResult>
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use strata_extractor::Extractor;
//! use strata_registry::ConfigurationRegistry;
//! use strata_service::{ExtractionService, ServiceConfig};
//! use strata_store::FileLoader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ExtractionService::new(
//!     FileLoader::new(),
//!     ConfigurationRegistry::new(),
//!     Extractor::default(),
//!     ServiceConfig::default(),
//! );
//!
//! let result = service.load_and_extract("data/movies.ttl", "movies").await?;
//! println!("{}", result.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod service;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use service::ExtractionService;
