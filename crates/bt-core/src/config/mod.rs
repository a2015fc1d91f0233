//! Configuration loading and validation for bt-core.
//!
//! This module handles:
//! - Loading an optional TOML config file
//! - Config resolution order (CLI > env > working dir > user config dir > defaults)
//! - Semantic validation (column names, chart heights, output filenames)
//! - CLI path overrides applied on top of the file

mod validation;

pub use validation::validate;

use crate::loader::{ColumnNames, LoadOptions};
use bt_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "BT_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "bt.toml";

/// Directory under the platform config dir.
const CONFIG_DIR_NAME: &str = "biblio-timeline";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation failed: {0}")]
    Invalid(String),
}

impl From<ConfigError> for bt_common::Error {
    fn from(err: ConfigError) -> Self {
        bt_common::Error::Config(err.to_string())
    }
}

/// Input section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    /// Worksheet name. Unset reads the first worksheet.
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub columns: ColumnNames,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("工艺美术大师12篇.xlsx")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            sheet: None,
            columns: ColumnNames::default(),
        }
    }
}

impl InputConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            columns: self.columns.clone(),
            sheet: self.sheet.clone(),
        }
    }
}

/// Output section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving all five documents.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl PipelineConfig {
    /// Parse TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config`
    Explicit(PathBuf),
    /// `BT_CONFIG`
    Environment(PathBuf),
    /// `./bt.toml`
    WorkingDir(PathBuf),
    /// Platform config dir.
    UserDir(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::Environment(p)
            | ConfigSource::WorkingDir(p)
            | ConfigSource::UserDir(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: PipelineConfig,
    pub source: ConfigSource,
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
    /// Overrides `[input] path`.
    pub input: Option<PathBuf>,
    /// Overrides `[output] dir`.
    pub output_dir: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit `--config` path
/// 2. `BT_CONFIG`
/// 3. `./bt.toml`
/// 4. `<platform config dir>/biblio-timeline/config.toml`
/// 5. Built-in defaults
///
/// Explicit paths (1, 2) must exist; implicit ones are skipped when absent.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let source = resolve_source(
        options.config_path.clone(),
        std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        Path::new(CONFIG_FILE_NAME),
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join("config.toml")),
    )?;
    load_from_source(source, options)
}

/// Pick the config file, if any.
fn resolve_source(
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    working_dir_file: &Path,
    user_file: Option<PathBuf>,
) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = explicit {
        return require(path).map(ConfigSource::Explicit);
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return require(path).map(ConfigSource::Environment);
    }
    if working_dir_file.is_file() {
        return Ok(ConfigSource::WorkingDir(working_dir_file.to_path_buf()));
    }
    match user_file {
        Some(path) if path.is_file() => Ok(ConfigSource::UserDir(path)),
        _ => Ok(ConfigSource::Defaults),
    }
}

fn require(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::NotFound { path })
    }
}

/// Read the chosen source, apply CLI overrides, and validate.
fn load_from_source(
    source: ConfigSource,
    options: &ConfigOptions,
) -> Result<ResolvedConfig, ConfigError> {
    let mut config = match source.path() {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
                path: path.to_path_buf(),
                source,
            })?;
            PipelineConfig::from_toml_str(&text, path)?
        }
        None => PipelineConfig::default(),
    };

    if let Some(input) = &options.input {
        config.input.path = input.clone();
    }
    if let Some(dir) = &options.output_dir {
        config.output.dir = dir.clone();
    }

    validate(&config)?;
    debug!(source = ?source, input = %config.input.path.display(), "Configuration resolved");
    Ok(ResolvedConfig { config, source })
}
