//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{ConflictPolicy, Extractor, ExtractorConfig, ExtractorError};
    use strata_domain::vocab::RDF_TYPE;
    use strata_domain::{
        AttributeValue, CrossLayerLink, Diagnostic, EntityTypeRule, LayerGroupingRule,
        MappingConfiguration, PropertyRule, RelationshipRule, TargetAttribute, Transform, Triple,
    };
    use strata_registry::builtins;
    use strata_store::{parse_turtle, MemoryStore};

    const EX: &str = "http://ex.org/";

    fn ex(local: &str) -> String {
        format!("{}{}", EX, local)
    }

    fn characters() -> MappingConfiguration {
        MappingConfiguration::new(
            "Characters",
            LayerGroupingRule::new(ex("layer"), Transform::Identity),
        )
        .with_entity_type(EntityTypeRule::new(ex("Character"), "Character", "character"))
        .with_property(PropertyRule::required(ex("name"), TargetAttribute::Label))
        .with_property(PropertyRule::required(ex("pos"), TargetAttribute::Position))
        .with_property(PropertyRule::required(ex("layer"), TargetAttribute::Layer))
        .with_relationship(RelationshipRule::new(ex("knows"), "knows"))
        .with_prefix("ex", EX)
    }

    fn character(id: &str, name: &str, pos: Option<&str>, layer: Option<&str>) -> Vec<Triple> {
        let subject = ex(id);
        let mut triples = vec![
            Triple::with_iri(&subject, RDF_TYPE, ex("Character")),
            Triple::with_literal(&subject, ex("name"), name),
        ];
        if let Some(pos) = pos {
            triples.push(Triple::with_literal(&subject, ex("pos"), pos));
        }
        if let Some(layer) = layer {
            triples.push(Triple::with_literal(&subject, ex("layer"), layer));
        }
        triples
    }

    fn extract(store: &MemoryStore, mapping: &MappingConfiguration) -> strata_domain::QueryResult {
        Extractor::default().extract(Some(store), mapping).unwrap()
    }

    const MOVIES_TTL: &str = r##"
@prefix mov: <http://example.org/movies#> .

mov:luke a mov:Character ;
    mov:name "Luke" ;
    mov:position "0, 0, 0" ;
    mov:appearsIn mov:anh ;
    mov:knows mov:leia .

mov:leia a mov:Character ;
    mov:name "Leia" ;
    mov:position "1,0,0" ;
    mov:appearsIn mov:anh ;
    mov:crossesOverWith mov:spock .

mov:spock a mov:Character ;
    mov:name "Spock" ;
    mov:position "5 5 5" ;
    mov:portrayedBy mov:nimoy ;
    mov:appearsIn mov:twok ;
    mov:rivalOf mov:luke .

mov:anh a mov:Movie ;
    mov:name "A New Hope" ;
    mov:color "#ff0000" ;
    mov:releaseYear 1977 .

mov:twok a mov:Movie ;
    mov:name "The Wrath of Khan" .
"##;

    #[test]
    fn test_one_complete_one_missing_position() {
        let mut triples = character("alice", "Alice", Some("1,2,3"), Some("L1"));
        triples.extend(character("bob", "Bob", None, Some("L1")));
        let store = MemoryStore::from_triples(triples);

        let result = extract(&store, &characters());

        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].id, ex("alice"));
        assert_eq!(result.entities[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(result.configuration_used, "Characters");
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::EntityDropped {
                subject: ex("bob"),
                missing_required: vec![ex("pos")],
                unresolved: vec![TargetAttribute::Position],
            }]
        );
    }

    #[test]
    fn test_relationships_with_and_without_layer() {
        let store = MemoryStore::from_triples(vec![
            Triple::with_literal(ex("a"), ex("layer"), "L1"),
            Triple::with_literal(ex("b"), ex("layer"), "L2"),
            Triple::with_iri(ex("a"), ex("knows"), ex("b")),
            Triple::with_iri(ex("b"), ex("knows"), ex("c")),
            Triple::with_iri(ex("c"), ex("knows"), ex("a")),
        ]);

        let result = extract(&store, &characters());

        assert_eq!(result.relationships.len(), 3);
        let keys: Vec<&str> = result
            .relationships
            .iter()
            .map(|r| r.layer_key.as_str())
            .collect();
        assert_eq!(keys, vec!["L1", "L2", ""]);
        assert_eq!(result.relationships[2].subject_id, ex("c"));
        assert_eq!(result.relationships[2].object_id, ex("a"));
    }

    #[test]
    fn test_drop_not_crash() {
        let mut triples = Vec::new();
        for (id, name) in [("a", "A"), ("b", "B"), ("c", "C")] {
            triples.extend(character(id, name, Some("0,0,0"), Some("L")));
        }
        // no label
        triples.push(Triple::with_iri(ex("d"), RDF_TYPE, ex("Character")));
        triples.push(Triple::with_literal(ex("d"), ex("pos"), "0,0,0"));
        triples.push(Triple::with_literal(ex("d"), ex("layer"), "L"));
        let store = MemoryStore::from_triples(triples);

        let result = extract(&store, &characters());

        assert_eq!(result.entities.len(), 3);
        assert!(result.entity(&ex("d")).is_none());
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let store = parse_turtle(MOVIES_TTL, None).unwrap();
        let mapping = builtins::movies();
        let extractor = Extractor::default();

        let first = extractor.extract(Some(&store), &mapping).unwrap();
        let second = extractor.extract(Some(&store), &mapping).unwrap();

        assert_eq!(first.entity_ids(), second.entity_ids());
        assert_eq!(first.relationship_set(), second.relationship_set());
        assert_eq!(first.layers, second.layers);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_store() {
        let result = Extractor::default().extract(None::<&MemoryStore>, &characters());
        assert_eq!(result.unwrap_err(), ExtractorError::NoDataLoaded);
    }

    #[test]
    fn test_invalid_mapping_fails_fast() {
        let store = MemoryStore::new();
        let mut mapping = characters();
        mapping.namespace_prefixes.clear();

        let err = Extractor::default()
            .extract(Some(&store), &mapping)
            .unwrap_err();
        assert_eq!(
            err,
            ExtractorError::ConfigurationInvalid(vec![
                "At least one namespace prefix is required".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_store_is_ok_and_empty() {
        let store = MemoryStore::new();
        let result = extract(&store, &characters());
        assert!(result.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_transform_failure_drops_attribute() {
        let mapping = MappingConfiguration::new(
            "Vectors",
            LayerGroupingRule::new(ex("layer"), Transform::Identity),
        )
        .with_entity_type(EntityTypeRule::new(ex("Character"), "Character", "character"))
        .with_property(PropertyRule::required(ex("name"), TargetAttribute::Label))
        .with_property(
            PropertyRule::required(ex("pos"), TargetAttribute::Position)
                .with_transform(Transform::Vector3),
        )
        .with_property(PropertyRule::required(ex("layer"), TargetAttribute::Layer))
        .with_prefix("ex", EX);

        let store = MemoryStore::from_triples(character("a", "A", Some("1, 2"), Some("L")));
        let result = extract(&store, &mapping);

        assert!(result.entities.is_empty());
        assert!(matches!(
            &result.diagnostics[0],
            Diagnostic::TransformFailed { subject, property, .. }
                if *subject == ex("a") && *property == ex("pos")
        ));
        assert!(matches!(
            &result.diagnostics[1],
            Diagnostic::EntityDropped { missing_required, .. } if *missing_required == vec![ex("pos")]
        ));
    }

    #[test]
    fn test_position_needs_exactly_three_components() {
        let mut triples = character("four", "Four", Some("1,2,3,4"), Some("L"));
        triples.extend(character("word", "Word", Some("1,two,3"), Some("L")));
        triples.extend(character("gap", "Gap", Some("1,,2,3"), Some("L")));
        triples.extend(character("lead", "Lead", Some(",1,2,3"), Some("L")));
        triples.extend(character("ok", "Ok", Some(" 1.5 , -2 , 3e2 "), Some("L")));
        let store = MemoryStore::from_triples(triples);

        let result = extract(&store, &characters());

        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].position, [1.5, -2.0, 300.0]);
        assert!(result.diagnostics.iter().all(|d| matches!(
            d,
            Diagnostic::EntityDropped { missing_required, unresolved, .. }
                if missing_required.is_empty() && *unresolved == vec![TargetAttribute::Position]
        )));
    }

    #[test]
    fn test_extra_and_subtitle_slots() {
        let mapping = characters()
            .with_property(PropertyRule::optional(ex("title"), TargetAttribute::Subtitle))
            .with_property(
                PropertyRule::optional(ex("age"), TargetAttribute::Custom)
                    .with_transform(Transform::Number),
            )
            .with_property(
                PropertyRule::optional(ex("color"), TargetAttribute::Color)
                    .with_transform(Transform::Color),
            );

        let mut triples = character("a", "A", Some("0,0,0"), Some("L"));
        triples.push(Triple::with_literal(ex("a"), ex("title"), "Captain"));
        triples.push(Triple::with_literal(ex("a"), ex("age"), "42"));
        triples.push(Triple::with_literal(ex("a"), ex("color"), "#00ff00"));
        let store = MemoryStore::from_triples(triples);

        let result = extract(&store, &mapping);
        let entity = &result.entities[0];

        assert_eq!(entity.subtitle.as_deref(), Some("Captain"));
        assert_eq!(entity.color, Some(0x00ff00));
        assert_eq!(entity.extra.get(&ex("age")), Some(&AttributeValue::Number(42.0)));
        assert!(entity.extra.contains_key(&ex("color")));
        assert!(!entity.extra.contains_key(&ex("title")));
    }

    #[test]
    fn test_subject_typed_twice_is_extracted_once() {
        let mut triples = character("a", "A", Some("0,0,0"), Some("L"));
        triples.push(Triple::with_iri(ex("a"), RDF_TYPE, ex("Character")));
        let store = MemoryStore::from_triples(triples);

        assert_eq!(extract(&store, &characters()).entities.len(), 1);
    }

    #[test]
    fn test_conflicting_labels() {
        let mut triples = character("a", "Alice", Some("0,0,0"), Some("L"));
        triples.push(Triple::with_literal(ex("a"), ex("name"), "Alicia"));
        let store = MemoryStore::from_triples(triples);
        let mapping = characters();

        let warned = Extractor::default().extract(Some(&store), &mapping).unwrap();
        assert_eq!(warned.entities[0].label, "Alice");
        assert!(matches!(
            warned.diagnostics.as_slice(),
            [Diagnostic::ConflictingValues { values, .. }] if values.len() == 2
        ));

        let quiet = Extractor::new(ExtractorConfig::lenient())
            .unwrap()
            .extract(Some(&store), &mapping)
            .unwrap();
        assert_eq!(quiet.entities.len(), 1);
        assert!(quiet.diagnostics.is_empty());

        let strict = Extractor::new(ExtractorConfig::strict())
            .unwrap()
            .extract(Some(&store), &mapping)
            .unwrap();
        assert!(strict.entities.is_empty());
        assert_eq!(strict.diagnostics.len(), 2);
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Warn);
    }

    #[test]
    fn test_invalid_engine_config() {
        let config = ExtractorConfig {
            default_layer_height: f64::NAN,
            ..ExtractorConfig::default()
        };
        assert!(matches!(Extractor::new(config), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_movies_layers_and_links() {
        let store = parse_turtle(MOVIES_TTL, None).unwrap();
        let result = extract(&store, &builtins::movies());

        assert_eq!(result.entities.len(), 3);
        let spock = result.entity("http://example.org/movies#spock").unwrap();
        assert_eq!(spock.subtitle.as_deref(), Some("nimoy"));
        assert_eq!(spock.layer_key, "twok");
        assert_eq!(spock.type_id, "character");

        let anh = &result.layers["anh"];
        assert_eq!(anh.display_name, "A New Hope");
        assert_eq!(anh.color, 0xff0000);
        assert_eq!(anh.height, 1977.0);

        let twok = &result.layers["twok"];
        assert_eq!(twok.color, 0x888888);
        assert_eq!(twok.height, 0.0);

        assert_eq!(result.relationships.len(), 2);
        assert_eq!(
            result.cross_layer_links,
            vec![CrossLayerLink {
                source_id: "http://example.org/movies#leia".to_string(),
                target_id: "http://example.org/movies#spock".to_string(),
            }]
        );
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_builtin_layer_keys_are_consistent() {
        let papers = r#"
@prefix pap: <http://example.org/papers#> .
@prefix field: <http://example.org/papers/fields/> .

pap:attention a pap:Paper ;
    pap:title "Attention Is All You Need" ;
    pap:embedding "0.1, 0.2, 0.3" ;
    pap:field field:nlp ;
    pap:year "2017" ;
    pap:cites pap:seq2seq .

pap:seq2seq a pap:Paper ;
    pap:title "Sequence to Sequence Learning" ;
    pap:embedding "0.2, 0.2, 0.1" ;
    pap:field field:nlp .

pap:resnet a pap:Paper ;
    pap:title "Deep Residual Learning" ;
    pap:embedding "0.9, 0.1, 0.5" ;
    pap:field field:vision ;
    pap:cites pap:attention .

field:nlp a pap:Field ; pap:title "Natural Language Processing" .
field:vision a pap:Field ; pap:title "Computer Vision" .
"#;
        let cases = [
            (parse_turtle(MOVIES_TTL, None).unwrap(), builtins::movies()),
            (parse_turtle(papers, None).unwrap(), builtins::papers()),
        ];

        for (store, mapping) in &cases {
            let result = extract(store, mapping);
            assert!(!result.layers.is_empty(), "{}", mapping.name);
            for relationship in &result.relationships {
                assert!(
                    result.layers.contains_key(&relationship.layer_key),
                    "{}: relationship key {:?} has no layer",
                    mapping.name,
                    relationship.layer_key
                );
            }
            for entity in &result.entities {
                assert!(result.layers.contains_key(&entity.layer_key));
            }
            assert!(result.orphan_layer_keys().is_empty());
        }
    }

    #[test]
    fn test_mismatched_layer_derivations_are_reported() {
        // Entities name their layer with a literal, layers are keyed by their full IRI
        let mut mapping =
            characters().with_relationship(RelationshipRule::new(ex("likes"), "likes"));
        mapping.layer_grouping = LayerGroupingRule::new(ex("layer"), Transform::Identity)
            .with_layer_class(ex("Layer"));

        let mut triples = character("a", "A", Some("0,0,0"), Some("L1"));
        triples.push(Triple::with_iri(ex("a"), ex("likes"), ex("a")));
        triples.push(Triple::with_iri(ex("L1"), RDF_TYPE, ex("Layer")));
        triples.push(Triple::with_literal(ex("L1"), ex("name"), "Layer one"));
        let store = MemoryStore::from_triples(triples);

        let result = extract(&store, &mapping);
        assert_eq!(result.layers.keys().collect::<Vec<_>>(), vec![&ex("L1")]);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::OrphanLayerKey {
                key: "L1".to_string()
            }]
        );

        let lenient = Extractor::new(ExtractorConfig::lenient())
            .unwrap()
            .extract(Some(&store), &mapping)
            .unwrap();
        assert!(lenient.diagnostics.is_empty());
        assert_eq!(lenient.orphan_layer_keys().len(), 1);
    }

    #[test]
    fn test_layers_dropped_without_name_or_with_duplicate_key() {
        let mut mapping = characters();
        mapping.layer_grouping = LayerGroupingRule::new(ex("layer"), Transform::LocalName)
            .with_layer_class(ex("Layer"));

        let store = MemoryStore::from_triples(vec![
            Triple::with_iri(ex("one/L"), RDF_TYPE, ex("Layer")),
            Triple::with_literal(ex("one/L"), ex("name"), "First"),
            Triple::with_iri(ex("two/L"), RDF_TYPE, ex("Layer")),
            Triple::with_literal(ex("two/L"), ex("name"), "Second"),
            Triple::with_iri(ex("nameless"), RDF_TYPE, ex("Layer")),
        ]);

        let result = extract(&store, &mapping);

        assert_eq!(result.layers.len(), 1);
        assert_eq!(result.layers["L"].display_name, "First");
        let dropped: Vec<&str> = result
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::LayerDropped { subject, .. } => Some(subject.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(dropped, vec![ex("two/L"), ex("nameless")]);
    }

    #[test]
    fn test_no_layer_class_means_no_layers() {
        let mut triples = character("a", "A", Some("0,0,0"), Some("L"));
        triples.push(Triple::with_iri(ex("L"), RDF_TYPE, ex("Layer")));
        let store = MemoryStore::from_triples(triples);

        let result = extract(&store, &characters());
        assert!(result.layers.is_empty());
        assert!(result.diagnostics.is_empty());
    }
}
