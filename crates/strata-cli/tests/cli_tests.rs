//! Integration tests for the CLI commands

use std::io::Write;
use std::path::PathBuf;
use strata_cli::cli::{ConfigsAction, ConfigsArgs, ExtractArgs};
use strata_cli::commands::execute_configs;
use strata_cli::commands::configs::run_configs;
use strata_cli::commands::extract::{run_extract, ADHOC_ID};
use strata_cli::{CliError, Config, Formatter, OutputFormat};
use strata_registry::ConfigurationRegistry;
use tempfile::NamedTempFile;

const NODES: &str = r#"
@prefix strata: <http://strata.dev/ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

strata:a a strata:Node ;
    rdfs:label "A" ;
    strata:position "0, 0, 0" ;
    strata:layer strata:core .

strata:b a strata:Node ;
    rdfs:label "B" ;
    strata:position "1, 2, 3" ;
    strata:layer strata:core .

strata:core a strata:Layer ;
    rdfs:label "Core" .
"#;

const BROKEN_MAPPING: &str = r#"
name = "Broken"

[layer_grouping]
layer_property_iri = "http://ex.org/layer"
"#;

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn path_string(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[tokio::test]
async fn test_extract_with_default_configuration() {
    let source = temp_file(".ttl", NODES);
    let args = ExtractArgs {
        source: path_string(&source),
        config: None,
        mapping: None,
    };

    let output = run_extract(args, &Config::default(), &quiet()).await.unwrap();
    assert_eq!(output, "http://strata.dev/ns#a\nhttp://strata.dev/ns#b");
}

#[tokio::test]
async fn test_extract_json_output() {
    let source = temp_file(".ttl", NODES);
    let args = ExtractArgs {
        source: path_string(&source),
        config: Some("default".to_string()),
        mapping: None,
    };
    let formatter = Formatter::new(OutputFormat::Json, false);

    let output = run_extract(args, &Config::default(), &formatter).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["configuration_used"], "Default");
    assert_eq!(parsed["entities"][1]["position"][2], 3.0);
    assert_eq!(parsed["layers"]["core"]["display_name"], "Core");
}

#[tokio::test]
async fn test_extract_with_mapping_file() {
    let exported = ConfigurationRegistry::new().export_as_text("default").unwrap();
    let mapping = temp_file(".toml", &exported);
    let source = temp_file(".ttl", NODES);
    let args = ExtractArgs {
        source: path_string(&source),
        config: None,
        mapping: Some(mapping.path().to_path_buf()),
    };

    let output = run_extract(args, &Config::default(), &quiet()).await.unwrap();
    assert_eq!(output.lines().count(), 2);
    assert_eq!(ADHOC_ID, "cli-mapping");
}

#[tokio::test]
async fn test_extract_with_invalid_mapping_file() {
    let mapping = temp_file(".toml", BROKEN_MAPPING);
    let source = temp_file(".ttl", NODES);
    let args = ExtractArgs {
        source: path_string(&source),
        config: None,
        mapping: Some(mapping.path().to_path_buf()),
    };

    let err = run_extract(args, &Config::default(), &quiet()).await.unwrap_err();
    assert!(matches!(err, CliError::Registry(_)));
}

#[tokio::test]
async fn test_extract_unknown_configuration() {
    let source = temp_file(".ttl", NODES);
    let args = ExtractArgs {
        source: path_string(&source),
        config: Some("nope".to_string()),
        mapping: None,
    };

    let err = run_extract(args, &Config::default(), &quiet()).await.unwrap_err();
    assert!(matches!(err, CliError::Service(_)));
}

#[tokio::test]
async fn test_extract_missing_source() {
    let args = ExtractArgs {
        source: "/definitely/not/here.ttl".to_string(),
        config: None,
        mapping: None,
    };

    let err = run_extract(args, &Config::default(), &quiet()).await.unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.ttl"));
}

#[test]
fn test_configs_list() {
    let registry = ConfigurationRegistry::new();
    let output = run_configs(ConfigsAction::List, &registry, &quiet()).unwrap();
    assert_eq!(output, "default\nmovies\norganization\npapers");
}

#[test]
fn test_configs_show_json() {
    let registry = ConfigurationRegistry::new();
    let action = ConfigsAction::Show {
        id: "movies".to_string(),
        json: true,
    };

    let output = run_configs(action, &registry, &quiet()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["name"], "Movies");
}

#[test]
fn test_configs_validate() {
    let registry = ConfigurationRegistry::new();
    let good = temp_file(".toml", &registry.export_as_text("papers").unwrap());
    let output = run_configs(
        ConfigsAction::Validate {
            file: good.path().to_path_buf(),
        },
        &registry,
        &quiet(),
    )
    .unwrap();
    assert!(output.contains("is valid"));

    let bad = temp_file(".toml", BROKEN_MAPPING);
    let err = run_configs(
        ConfigsAction::Validate {
            file: bad.path().to_path_buf(),
        },
        &registry,
        &quiet(),
    )
    .unwrap_err();
    assert!(matches!(err, CliError::ValidationFailed(5)));
}

#[test]
fn test_configs_import_and_activate() {
    let registry = ConfigurationRegistry::new();
    let exported = registry.export_as("organization", strata_registry::DocumentFormat::Json).unwrap();
    let file = temp_file(".json", &exported);

    let output = run_configs(
        ConfigsAction::Import {
            file: file.path().to_path_buf(),
            id: "mine".to_string(),
            activate: true,
        },
        &registry,
        &quiet(),
    )
    .unwrap();

    assert!(output.contains("Imported 'mine'"));
    assert_eq!(registry.active_id(), "mine");
    assert!(registry.contains("mine"));
}

#[test]
fn test_settings_mapping_files_are_registered() {
    let exported = ConfigurationRegistry::new().export_as_text("movies").unwrap();
    let mapping = temp_file(".toml", &exported);
    let mut config = Config::default();
    config
        .mapping_files
        .insert("films".to_string(), PathBuf::from(mapping.path()));
    config.default_configuration = "films".to_string();

    let registry = config.build_registry().unwrap();
    assert_eq!(registry.active_id(), "films");
    assert_eq!(registry.len(), 5);
}

#[test]
fn test_execute_configs_runs_without_a_runtime() {
    let args = ConfigsArgs {
        action: ConfigsAction::List,
    };
    execute_configs(args, &Config::default(), &quiet()).unwrap();
}
