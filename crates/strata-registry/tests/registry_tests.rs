//! Registry behavior across export, import, and file loading

use std::io::Write;
use strata_registry::{builtins, ConfigurationRegistry, DocumentFormat, RegistryError};
use tempfile::NamedTempFile;

#[test]
fn test_text_round_trip_preserves_rules() {
    let registry = ConfigurationRegistry::new();

    for id in registry.list_ids() {
        let text = registry.export_as_text(&id).unwrap();
        let copy = format!("{}-copy", id);
        registry.import_from_text(&copy, &text).unwrap();

        let original = registry.get(&id).unwrap();
        let imported = registry.get(&copy).unwrap();
        assert_eq!(imported.entity_types, original.entity_types);
        assert_eq!(imported.relationship_rules, original.relationship_rules);
        assert_eq!(imported.namespace_prefixes, original.namespace_prefixes);
        assert_eq!(imported.property_rules, original.property_rules);
        assert_eq!(imported.layer_grouping, original.layer_grouping);
    }
}

#[test]
fn test_import_invalid_document_is_not_stored() {
    let registry = ConfigurationRegistry::new();
    let text = r#"
name = "Empty"

[namespace_prefixes]
ex = "http://ex.org/"

[layer_grouping]
layer_property_iri = "http://ex.org/layer"
"#;

    let err = registry.import_from_text("empty", text).unwrap_err();
    match err {
        RegistryError::ConfigurationInvalid(violations) => assert_eq!(
            violations,
            vec![
                "At least one entity type mapping is required",
                "A required Label property mapping is required",
                "A required Position property mapping is required",
                "A required Layer property mapping is required",
            ]
        ),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_malformed_document() {
    let registry = ConfigurationRegistry::new();
    assert!(matches!(
        registry.import_from_text("x", "{ not json"),
        Err(RegistryError::Parse(_))
    ));
    assert!(matches!(
        registry.import_as("x", "name = ", DocumentFormat::Toml),
        Err(RegistryError::Parse(_))
    ));
}

#[test]
fn test_load_file() {
    let registry = ConfigurationRegistry::empty_with_default();
    let text = registry.export_as("default", DocumentFormat::Json).unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();

    registry.load_file("from-disk", file.path()).unwrap();
    assert_eq!(
        registry.get("from-disk"),
        Some(builtins::default_configuration())
    );
}

#[test]
fn test_load_missing_file() {
    let registry = ConfigurationRegistry::new();
    let err = registry
        .load_file("x", "/definitely/not/here.toml")
        .unwrap_err();
    assert!(matches!(err, RegistryError::Io { .. }));
}

#[test]
fn test_concurrent_registration() {
    let registry = ConfigurationRegistry::new();

    std::thread::scope(|scope| {
        for n in 0..8 {
            let registry = registry.clone();
            scope.spawn(move || {
                registry
                    .clone_configuration("default", &format!("copy-{}", n))
                    .unwrap();
            });
        }
    });

    assert_eq!(registry.len(), 12);
}
