//! Statement model: terms and triples

use std::fmt;

/// The object position of a statement
///
/// Blank nodes are carried as `_:label` identifiers inside [`Term::Iri`];
/// the extraction shapes never need to tell them apart from named nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A named node (or `_:label` blank node)
    Iri(String),

    /// A literal value
    Literal {
        /// Lexical form
        value: String,
        /// Datatype IRI, if one was given
        datatype: Option<String>,
        /// Language tag, if one was given
        language: Option<String>,
    },
}

impl Term {
    /// Create an IRI term
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    /// Create a plain literal term
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Create a literal with an explicit datatype IRI
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// The raw text of the term: the IRI itself or the literal's lexical form
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Literal { value, .. } => value,
        }
    }

    /// Whether this term is an IRI
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// The IRI, if this term is one
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal { .. } => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) if iri.starts_with("_:") => write!(f, "{}", iri),
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Literal {
                value,
                datatype,
                language,
            } => {
                write!(f, "{:?}", value)?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)?;
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)?;
                }
                Ok(())
            }
        }
    }
}

/// A single `(subject, predicate, object)` statement
///
/// Triples are immutable once added to a store. Stores may hold the same
/// triple more than once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject IRI
    pub subject: String,

    /// Predicate IRI
    pub predicate: String,

    /// Object term
    pub object: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    /// Shorthand for a triple whose object is an IRI
    pub fn with_iri(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self::new(subject, predicate, Term::iri(object))
    }

    /// Shorthand for a triple whose object is a plain literal
    pub fn with_literal(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(subject, predicate, Term::literal(value))
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_form() {
        assert_eq!(Term::iri("http://ex.org/a").lexical(), "http://ex.org/a");
        assert_eq!(Term::literal("Alice").lexical(), "Alice");
        assert_eq!(
            Term::typed_literal("3", "http://www.w3.org/2001/XMLSchema#integer").lexical(),
            "3"
        );
    }

    #[test]
    fn test_display_ntriples_like() {
        let triple = Triple::with_literal("http://ex.org/a", "http://ex.org/name", "Alice");
        assert_eq!(
            triple.to_string(),
            r#"<http://ex.org/a> <http://ex.org/name> "Alice" ."#
        );

        let blank = Term::iri("_:b0");
        assert_eq!(blank.to_string(), "_:b0");
    }
}
