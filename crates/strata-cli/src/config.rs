//! Settings management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use strata_extractor::ExtractorConfig;
use strata_registry::{ConfigurationRegistry, DEFAULT_ID};
use strata_service::ServiceConfig;
use tracing::debug;

/// CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration used when a command names none
    #[serde(default = "default_configuration")]
    pub default_configuration: String,

    /// Extra mapping documents to register at start, by id
    #[serde(default)]
    pub mapping_files: BTreeMap<String, PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction engine tuning
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Extraction service tuning
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default settings file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".strata").join("config.toml"))
    }

    /// Load settings from `path`, or the default path when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if !path.exists() {
            debug!("No settings at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the engine tuning.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))
    }

    /// Build a registry with the built-ins plus every configured mapping file,
    /// with the default configuration active.
    pub fn build_registry(&self) -> Result<ConfigurationRegistry> {
        let registry = ConfigurationRegistry::new();
        for (id, path) in &self.mapping_files {
            registry.load_file(id, path)?;
        }
        registry.set_active(&self.default_configuration)?;
        Ok(registry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_configuration: default_configuration(),
            mapping_files: BTreeMap::new(),
            settings: Settings::default(),
            extractor: ExtractorConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_configuration() -> String {
    DEFAULT_ID.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use strata_extractor::ConflictPolicy;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_configuration, "default");
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.default_configuration, "default");
    }

    #[test]
    fn test_load_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
default_configuration = "movies"

[settings]
format = "json"
color = false

[extractor]
conflict_policy = "reject"

[service]
load_timeout_secs = 0
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.default_configuration, "movies");
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(!config.settings.color);
        assert_eq!(config.extractor.conflict_policy, ConflictPolicy::Reject);
        assert_eq!(config.service.load_timeout(), None);
    }

    #[test]
    fn test_invalid_extractor_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[extractor]\ndefault_layer_color = 99999999\n").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_build_registry_with_unknown_default() {
        let config = Config {
            default_configuration: "nope".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.build_registry(),
            Err(CliError::Registry(_))
        ));
    }
}
