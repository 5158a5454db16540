//! Configuration loading utilities

use crate::schema::{Config, RowPolicy};
use pulseboard_common::{DashError, LogFormat, Result as DashResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "PULSEBOARD_CONFIG_PATH";

/// Config files looked up in the working directory, in order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["pulseboard.yaml", "pulseboard.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError { var: String, message: String },
}

impl From<ConfigError> for DashError {
    fn from(err: ConfigError) -> Self {
        DashError::config_with_source("configuration could not be loaded", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> DashResult<Config> {
        let mut config = Self::read_file(path.as_ref())?;
        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `PULSEBOARD_CONFIG_PATH`, a default file in the
    /// working directory, or built-in defaults, then apply env overrides.
    pub fn load() -> DashResult<Config> {
        let path = env::var(CONFIG_PATH_VAR)
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|p| p.exists())
            });

        match path {
            Some(path) => Self::load_config(path),
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse a YAML document into a configuration without overrides or validation.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply `PULSEBOARD_*` overrides, reading variables through `lookup`.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup("PULSEBOARD_LOCALE") {
            config.locale = locale;
        }

        if let Some(policy) = lookup("PULSEBOARD_INVALID_ROWS") {
            config.data.invalid_rows = policy
                .parse::<RowPolicy>()
                .map_err(|message| ConfigError::EnvParseError {
                    var: "PULSEBOARD_INVALID_ROWS".to_string(),
                    message,
                })?;
        }

        if let Some(top_n) = lookup("PULSEBOARD_LISTENING_TOP_N") {
            config.data.listening_top_n = parse_var("PULSEBOARD_LISTENING_TOP_N", &top_n)?;
        }

        if let Some(top_n) = lookup("PULSEBOARD_SALES_TOP_N") {
            config.data.sales_top_n = parse_var("PULSEBOARD_SALES_TOP_N", &top_n)?;
        }

        if let Some(max_chars) = lookup("PULSEBOARD_LABEL_MAX_CHARS") {
            config.data.label_max_chars = parse_var("PULSEBOARD_LABEL_MAX_CHARS", &max_chars)?;
        }

        if let Some(years) = lookup("PULSEBOARD_DISCOVERY_WINDOW_YEARS") {
            config.data.discovery_window_years =
                parse_var("PULSEBOARD_DISCOVERY_WINDOW_YEARS", &years)?;
        }

        if let Some(level) = lookup("PULSEBOARD_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("PULSEBOARD_LOG_FORMAT") {
            config.logging.format = match format.trim().to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                other => {
                    return Err(ConfigError::EnvParseError {
                        var: "PULSEBOARD_LOG_FORMAT".to_string(),
                        message: format!("unknown log format '{other}'"),
                    })
                }
            };
        }

        if let Some(file) = lookup("PULSEBOARD_LOG_FILE") {
            config.logging.file_path = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        message: e.to_string(),
    })
}
