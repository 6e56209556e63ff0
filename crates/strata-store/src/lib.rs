//! Strata Storage Layer
//!
//! Implements the [`TripleStore`] and [`SourceLoader`] traits from
//! strata-domain.
//!
//! # Architecture
//!
//! - [`MemoryStore`]: insertion-ordered statements with subject/predicate
//!   indexes; duplicates are kept
//! - [`FileLoader`]: reads Turtle or N-Triples files through `oxttl`
//!
//! # Examples
//!
//! ```
//! use strata_domain::{Triple, TripleStore};
//! use strata_store::MemoryStore;
//!
//! let store = MemoryStore::from_triples(vec![
//!     Triple::with_literal("http://ex.org/a", "http://ex.org/name", "Alice"),
//! ]);
//! assert_eq!(store.len(), 1);
//! ```
//!
//! [`TripleStore`]: strata_domain::TripleStore
//! [`SourceLoader`]: strata_domain::SourceLoader

#![warn(missing_docs)]

mod error;
mod loader;
mod memory;

pub use error::StoreError;
pub use loader::{parse_ntriples, parse_turtle, FileLoader, SourceFormat};
pub use memory::MemoryStore;
