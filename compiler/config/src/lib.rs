#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! grpcgen Configuration
//!
//! This crate provides configuration management for grpcgen.
//! It handles loading, saving, and assembling the settings that control:
//! - Generation mode (full output or the reduced migration mode)
//! - Output file naming (`paths=` and `module=`) and per-file import path overrides
//! - Logging configuration
//!
//! Configuration is stored in TOML format and can be loaded from files, or assembled
//! from the comma-separated parameter string protoc hands to the plugin.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading, saving or assembling configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// The parameter string named a key this plugin does not understand
    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),
    /// A known parameter carried a value that cannot be interpreted
    #[error("invalid value {value:?} for parameter {key:?}")]
    InvalidValue {
        /// Parameter name
        key: String,
        /// Offending value
        value: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Selects how much of the service API is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Client stubs, server dispatch, stream wrappers, registration and constructor
    #[default]
    Full,
    /// Server dispatch, registration, constructor and the unstable interface only;
    /// client stubs and stream wrapper types come from previously generated code
    MigrationLite,
}

impl GenerationMode {
    /// Map the `migration_mode` boolean onto a mode
    pub fn from_migration_flag(migration: bool) -> Self {
        if migration {
            Self::MigrationLite
        } else {
            Self::Full
        }
    }

    /// Whether client stubs and stream wrapper types are emitted
    pub fn emits_client_and_streams(self) -> bool { self == Self::Full }
}

/// How output file names are derived from the input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathsMode {
    /// `<import path>/<base name>`
    #[default]
    Import,
    /// The proto path, relative to the source root
    SourceRelative,
}

impl std::str::FromStr for PathsMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "import" => Ok(Self::Import),
            "source_relative" => Ok(Self::SourceRelative),
            other => Err(ConfigError::InvalidValue {
                key: "paths".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What to generate
    pub generation: GenerationConfig,
    /// Where generated files go
    pub output: OutputConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Generation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Full or migration-lite output
    pub mode: GenerationMode,
    /// Attach source annotations to generated files
    pub annotate_code: bool,
}

/// Output naming settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file naming scheme
    pub paths: PathsMode,
    /// Module prefix stripped from output file names
    pub module: Option<String>,
    /// Per-file Go import path overrides, keyed by proto path
    pub import_paths: BTreeMap<String, String>,
    /// Per-file Go package name overrides, keyed by proto path
    pub package_names: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "warn".to_string() } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Build a configuration from the protoc parameter string
    ///
    /// The string is a comma-separated list of `key=value` items. A `config=<file>`
    /// item is loaded first wherever it appears; the remaining items are then applied
    /// on top of it in order.
    ///
    /// # Examples
    /// ```
    /// use grpcgen_config::{Config, GenerationMode, PathsMode};
    ///
    /// let config = Config::from_parameter("migration_mode=true,paths=source_relative").unwrap();
    /// assert_eq!(config.generation.mode, GenerationMode::MigrationLite);
    /// assert_eq!(config.output.paths, PathsMode::SourceRelative);
    /// ```
    pub fn from_parameter(parameter: &str) -> Result<Self> {
        let items: Vec<(&str, &str)> = parameter
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| item.split_once('=').unwrap_or((item, "")))
            .collect();

        let mut config = match items.iter().find(|(key, _)| *key == "config") {
            Some((_, file)) => Self::from_file(file)?,
            None => Self::default(),
        };
        for (key, value) in items.into_iter().filter(|(key, _)| *key != "config") {
            config.apply_parameter(key, value)?;
        }
        Ok(config)
    }

    /// Apply a single `key=value` parameter item
    pub fn apply_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "migration_mode" => {
                self.generation.mode = GenerationMode::from_migration_flag(parse_bool(key, value)?)
            }
            "annotate_code" => self.generation.annotate_code = parse_bool(key, value)?,
            "paths" => self.output.paths = value.parse()?,
            "module" => self.output.module = Some(value.trim_end_matches('/').to_string()),
            "log_level" => self.logging.level = parse_level(value)?,
            _ if key.len() > 1 && key.starts_with('M') => {
                let file = key[1..].to_string();
                let (path, package) = value.split_once(';').unwrap_or((value, ""));
                self.output.import_paths.insert(file.clone(), path.to_string());
                if package.is_empty() {
                    self.output.package_names.remove(&file);
                } else {
                    self.output.package_names.insert(file, package.to_string());
                }
            }
            _ => return Err(ConfigError::UnknownParameter(key.to_string())),
        }
        Ok(())
    }

    /// Import path override for `proto_path`, if any
    pub fn import_path_for(&self, proto_path: &str) -> Option<&str> {
        let value = self.output.import_paths.get(proto_path)?;
        value.split(';').next()
    }

    /// Package name override for `proto_path`, if any
    ///
    /// Taken from the `;name` part of an `M` parameter; a TOML `import_paths` entry
    /// written as `path;name` is honored the same way.
    pub fn package_name_for(&self, proto_path: &str) -> Option<&str> {
        if let Some(name) = self.output.package_names.get(proto_path) {
            return Some(name.as_str());
        }
        self.output
            .import_paths
            .get(proto_path)
            .and_then(|value| value.split_once(';'))
            .map(|(_, name)| name)
            .filter(|name| !name.is_empty())
    }
}

/// Parse a boolean the way Go's `strconv.ParseBool` does; an empty value means `true`.
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "" | "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(ConfigError::InvalidValue { key: key.to_string(), value: other.to_string() }),
    }
}

fn parse_level(value: &str) -> Result<String> {
    let level = value.to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(level),
        _ => Err(ConfigError::InvalidValue {
            key: "log_level".to_string(),
            value: value.to_string(),
        }),
    }
}
