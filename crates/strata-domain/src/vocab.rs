//! Well-known IRIs

/// `rdf:type`, the predicate that asserts class membership
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `rdfs:label`
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// RDF namespace base
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// RDFS namespace base
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// XSD namespace base
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
