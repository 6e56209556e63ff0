//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Strata CLI - Extract typed graphs from RDF data with mapping configurations.
#[derive(Debug, Parser)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file path (defaults to ~/.strata/config.toml)
    #[arg(short, long, global = true, env = "STRATA_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a Turtle or N-Triples file and extract it
    Extract(ExtractArgs),

    /// Inspect and manage mapping configurations
    Configs(ConfigsArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Source file (.ttl or .nt)
    pub source: String,

    /// Configuration id (defaults to the settings' default configuration)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Mapping document to extract with instead of a registered configuration
    #[arg(short, long, conflicts_with = "config")]
    pub mapping: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigsArgs {
    #[command(subcommand)]
    pub action: ConfigsAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigsAction {
    /// List registered configurations
    List,

    /// Print a configuration document
    Show {
        /// Configuration id
        id: String,
        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Check a mapping document and print its violations
    Validate {
        /// Mapping document (TOML or JSON)
        file: PathBuf,
    },

    /// Register a mapping document
    Import {
        /// Mapping document (TOML or JSON)
        file: PathBuf,
        /// Id to register it under
        #[arg(long)]
        id: String,
        /// Make it the active configuration
        #[arg(long)]
        activate: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from(["strata", "extract", "movies.ttl", "--config", "movies"]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.source, "movies.ttl");
                assert_eq!(args.config.as_deref(), Some("movies"));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_config_and_mapping_conflict() {
        let result = Cli::try_parse_from([
            "strata", "extract", "a.ttl", "--config", "movies", "--mapping", "m.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_and_globals() {
        let cli = Cli::parse_from(["strata", "configs", "list", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(
            cli.command,
            Command::Configs(ConfigsArgs {
                action: ConfigsAction::List
            })
        ));
    }

    #[test]
    fn test_import_command() {
        let cli = Cli::parse_from([
            "strata", "configs", "import", "m.toml", "--id", "mine", "--activate",
        ]);
        match cli.command {
            Command::Configs(ConfigsArgs {
                action: ConfigsAction::Import { id, activate, .. },
            }) => {
                assert_eq!(id, "mine");
                assert!(activate);
            }
            _ => panic!("Expected Import action"),
        }
    }
}
