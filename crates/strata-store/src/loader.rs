//! Turtle / N-Triples loading via `oxttl`

use crate::{MemoryStore, StoreError};
use oxrdf::{NamedOrBlankNode, Term as OxTerm};
use oxttl::{NTriplesParser, TurtleParser};
use std::path::Path;
use strata_domain::vocab::XSD_NS;
use strata_domain::{SourceLoader, Term, Triple, TripleStore};
use tracing::{debug, info};
use url::Url;

const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// Serialization of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Turtle (`.ttl` and anything unrecognized)
    Turtle,
    /// N-Triples (`.nt`)
    NTriples,
}

impl SourceFormat {
    /// Guess the format from a path's extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("nt") => SourceFormat::NTriples,
            _ => SourceFormat::Turtle,
        }
    }
}

/// Loads statements from files on disk
///
/// A source identifier is a filesystem path. Relative IRIs in Turtle files
/// resolve against `base_iri` when one is set, otherwise against the file's
/// `file://` URL.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    base_iri: Option<String>,
}

impl FileLoader {
    /// Create a loader that resolves relative IRIs against each file's URL
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative IRIs against a fixed base instead
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    /// Load a file in an explicit format
    pub fn load_path(&self, path: &Path, format: SourceFormat) -> Result<MemoryStore, StoreError> {
        let text = std::fs::read_to_string(path)?;
        let source_name = path.display().to_string();

        debug!("Read {} bytes from {}", text.len(), source_name);

        let store = match format {
            SourceFormat::NTriples => parse_ntriples_named(&text, &source_name)?,
            SourceFormat::Turtle => {
                let base = self.base_iri.clone().or_else(|| file_url(path));
                parse_turtle_named(&text, base.as_deref(), &source_name)?
            }
        };

        info!("Loaded {} statements from {}", store.len(), source_name);
        Ok(store)
    }
}

impl SourceLoader for FileLoader {
    type Store = MemoryStore;
    type Error = StoreError;

    fn load(&self, source: &str) -> Result<MemoryStore, StoreError> {
        let path = Path::new(source);
        self.load_path(path, SourceFormat::from_path(path))
    }
}

/// Percent-encoded `file://` URL of `path`, if it can be made absolute
fn file_url(path: &Path) -> Option<String> {
    let absolute = std::fs::canonicalize(path).ok()?;
    match Url::from_file_path(&absolute) {
        Ok(url) => Some(url.to_string()),
        Err(()) => {
            debug!("No file URL for {}; parsing without a base", absolute.display());
            None
        }
    }
}

/// Parse Turtle text into a store
pub fn parse_turtle(text: &str, base_iri: Option<&str>) -> Result<MemoryStore, StoreError> {
    parse_turtle_named(text, base_iri, "<inline>")
}

/// Parse N-Triples text into a store
pub fn parse_ntriples(text: &str) -> Result<MemoryStore, StoreError> {
    parse_ntriples_named(text, "<inline>")
}

fn parse_turtle_named(
    text: &str,
    base_iri: Option<&str>,
    source_name: &str,
) -> Result<MemoryStore, StoreError> {
    let mut parser = TurtleParser::new();
    if let Some(base) = base_iri {
        parser = parser
            .with_base_iri(base)
            .map_err(|e| StoreError::InvalidBaseIri(base.to_string(), e.to_string()))?;
    }

    let mut store = MemoryStore::new();
    for result in parser.for_reader(text.as_bytes()) {
        let triple = result.map_err(|e| parse_error(source_name, e))?;
        store.insert(convert_triple(triple));
    }
    Ok(store)
}

fn parse_ntriples_named(text: &str, source_name: &str) -> Result<MemoryStore, StoreError> {
    let mut store = MemoryStore::new();
    for result in NTriplesParser::new().for_reader(text.as_bytes()) {
        let triple = result.map_err(|e| parse_error(source_name, e))?;
        store.insert(convert_triple(triple));
    }
    Ok(store)
}

fn parse_error(source_name: &str, e: impl std::fmt::Display) -> StoreError {
    StoreError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    }
}

fn convert_triple(triple: oxrdf::Triple) -> Triple {
    let subject = match triple.subject {
        NamedOrBlankNode::NamedNode(node) => node.into_string(),
        NamedOrBlankNode::BlankNode(node) => format!("_:{}", node.as_str()),
    };

    Triple::new(subject, triple.predicate.into_string(), convert_term(triple.object))
}

fn convert_term(term: OxTerm) -> Term {
    match term {
        OxTerm::NamedNode(node) => Term::Iri(node.into_string()),
        OxTerm::BlankNode(node) => Term::Iri(format!("_:{}", node.as_str())),
        OxTerm::Literal(literal) => {
            let language = literal.language().map(str::to_string);
            let datatype = literal.datatype().as_str();
            // Plain strings and language-tagged strings carry no useful datatype
            let datatype = (language.is_none()
                && datatype != RDF_LANG_STRING
                && datatype != format!("{}string", XSD_NS))
            .then(|| datatype.to_string());

            Term::Literal {
                value: literal.value().to_string(),
                datatype,
                language,
            }
        }
        #[allow(unreachable_patterns)]
        other => Term::Iri(other.to_string()),
    }
}
