//! Configuration management command implementation.

use crate::cli::{ConfigsAction, ConfigsArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use strata_gatekeeper::violation_messages;
use strata_registry::{parse_document, ConfigurationRegistry, DocumentFormat};

/// Execute the configs command.
pub fn execute_configs(args: ConfigsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let registry = config.build_registry()?;
    let output = run_configs(args.action, &registry, formatter)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Run a configuration action against `registry` and return what to print.
pub fn run_configs(
    action: ConfigsAction,
    registry: &ConfigurationRegistry,
    formatter: &Formatter,
) -> Result<String> {
    match action {
        ConfigsAction::List => formatter.format_summaries(&registry.summaries()),
        ConfigsAction::Show { id, json } => {
            let format = if json || formatter.format() == OutputFormat::Json {
                DocumentFormat::Json
            } else {
                DocumentFormat::Toml
            };
            Ok(registry.export_as(&id, format)?)
        }
        ConfigsAction::Validate { file } => validate_file(&file, formatter),
        ConfigsAction::Import { file, id, activate } => {
            registry.load_file(&id, &file)?;
            if activate {
                registry.set_active(&id)?;
            }
            let summary = registry
                .summaries()
                .into_iter()
                .filter(|s| s.id == id)
                .collect::<Vec<_>>();
            let mut output = formatter.success(&format!("Imported '{}' from {}", id, file.display()));
            output.push('\n');
            output.push_str(&formatter.format_summaries(&summary)?);
            Ok(output)
        }
    }
}

fn validate_file(path: &Path, formatter: &Formatter) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let mapping = parse_document(&text, DocumentFormat::detect(&text))?;
    let violations = violation_messages(&mapping);

    if violations.is_empty() {
        return Ok(formatter.success(&format!("{} is valid", path.display())));
    }

    for violation in &violations {
        eprintln!("{}", formatter.error(violation));
    }
    Err(CliError::ValidationFailed(violations.len()))
}
