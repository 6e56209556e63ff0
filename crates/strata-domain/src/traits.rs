//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the extraction core and the
//! infrastructure that produces statements. Implementations live in other
//! crates (strata-store).

use crate::{Term, Triple};

/// Read-only, pattern-queryable collection of statements
///
/// Iteration order is implementation-defined and NOT guaranteed sorted.
/// Callers that take "the first match" inherit that order.
pub trait TripleStore {
    /// Iterate all statements in store order
    fn iter(&self) -> Box<dyn Iterator<Item = &Triple> + '_>;

    /// All statements matching the pattern; `None` matches anything
    ///
    /// Returned statements borrow from the store only, so they outlive the
    /// pattern arguments.
    fn matching<'s, 'q>(
        &'s self,
        subject: Option<&'q str>,
        predicate: Option<&'q str>,
        object: Option<&'q Term>,
    ) -> Box<dyn Iterator<Item = &'s Triple> + 'q>
    where
        's: 'q,
    {
        Box::new(self.iter().filter(move |t| {
            subject.is_none_or(|s| t.subject == s)
                && predicate.is_none_or(|p| t.predicate == p)
                && object.is_none_or(|o| &t.object == o)
        }))
    }

    /// Objects of every `(subject, predicate, ?)` statement, in store order
    fn objects<'s, 'q>(
        &'s self,
        subject: &'q str,
        predicate: &'q str,
    ) -> Box<dyn Iterator<Item = &'s Term> + 'q>
    where
        's: 'q,
    {
        Box::new(
            self.matching(Some(subject), Some(predicate), None)
                .map(|t| &t.object),
        )
    }

    /// Number of statements, duplicates included
    fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the store holds no statements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns a source identifier (path, URL, ...) into a loaded store
///
/// Implemented by the infrastructure layer (strata-store). Loading may block
/// on I/O; async callers run it on a blocking pool.
pub trait SourceLoader {
    /// Store type produced by this loader
    type Store: TripleStore;

    /// Error type for load operations
    type Error;

    /// Load and parse `source`
    fn load(&self, source: &str) -> Result<Self::Store, Self::Error>;
}
