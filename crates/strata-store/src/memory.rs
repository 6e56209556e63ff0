//! In-memory indexed triple store

use std::collections::HashMap;
use strata_domain::{Term, Triple, TripleStore};

/// Insertion-ordered in-memory store
///
/// Iteration and pattern matching return statements in insertion order.
/// Identical statements may be inserted more than once and are all kept.
///
/// # Thread Safety
///
/// The store is immutable once built and can be shared freely behind `&` or
/// `Arc`; inserting requires `&mut`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    triples: Vec<Triple>,
    // subject -> predicate -> positions in `triples`
    by_subject: HashMap<String, HashMap<String, Vec<usize>>>,
    // predicate -> positions in `triples`
    by_predicate: HashMap<String, Vec<usize>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from statements, keeping their order
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::new();
        store.extend(triples);
        store
    }

    /// Append a statement
    pub fn insert(&mut self, triple: Triple) {
        let idx = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .push(idx);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(idx);
        self.triples.push(triple);
    }

    /// Number of distinct subjects
    pub fn subject_count(&self) -> usize {
        self.by_subject.len()
    }

    fn positions(&self, subject: Option<&str>, predicate: Option<&str>) -> Option<&[usize]> {
        match (subject, predicate) {
            (Some(s), Some(p)) => Some(
                self.by_subject
                    .get(s)
                    .and_then(|preds| preds.get(p))
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
            ),
            (None, Some(p)) => Some(
                self.by_predicate
                    .get(p)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
            ),
            _ => None,
        }
    }
}

impl Extend<Triple> for MemoryStore {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self::from_triples(iter)
    }
}

impl TripleStore for MemoryStore {
    fn iter(&self) -> Box<dyn Iterator<Item = &Triple> + '_> {
        Box::new(self.triples.iter())
    }

    fn matching<'s, 'q>(
        &'s self,
        subject: Option<&'q str>,
        predicate: Option<&'q str>,
        object: Option<&'q Term>,
    ) -> Box<dyn Iterator<Item = &'s Triple> + 'q>
    where
        's: 'q,
    {
        let object_matches = move |t: &&Triple| object.is_none_or(|o| &t.object == o);

        match self.positions(subject, predicate) {
            Some(positions) => Box::new(
                positions
                    .iter()
                    .map(move |&idx| &self.triples[idx])
                    .filter(object_matches),
            ),
            None => Box::new(
                self.triples
                    .iter()
                    .filter(move |t| subject.is_none_or(|s| t.subject == s))
                    .filter(object_matches),
            ),
        }
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}
