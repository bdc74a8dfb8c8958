//! `countrystat` Configuration Module
//!
//! Provides configuration file support via `countrystat.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`COUNTRYSTAT_*`, sections split by `__`)
//! 3. Configuration file (`countrystat.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// How one delimited source is read and keyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the source file.
    pub path: PathBuf,
    /// Positions of the fields concatenated into the lookup key.
    ///
    /// One position yields year buckets, several yield single-record slots.
    pub key_fields: Vec<usize>,
    /// Required file extension, without the dot.
    pub extension: String,
    /// Field delimiter.
    pub delimiter: char,
    /// Header name of the year column.
    pub year_field: String,
    /// Header name of the numeric value column.
    pub value_field: String,
}

impl DatasetConfig {
    /// GDP export keyed on country name alone.
    #[must_use]
    pub fn gdp(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key_fields: vec![0],
            ..Self::default()
        }
    }

    /// Population export keyed on country name + year.
    #[must_use]
    pub fn population(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key_fields: vec![0, 2],
            ..Self::default()
        }
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.key_fields.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: format!("{section}.key_fields"),
                message: "at least one key field is required".to_string(),
            });
        }
        if self.extension.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: format!("{section}.extension"),
                message: "extension cannot be empty".to_string(),
            });
        }
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidValue {
                key: format!("{section}.delimiter"),
                message: format!("{:?} cannot be used as a delimiter", self.delimiter),
            });
        }
        for (name, value) in [
            ("year_field", &self.year_field),
            ("value_field", &self.value_field),
        ] {
            if value.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("{section}.{name}"),
                    message: "field name cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            key_fields: vec![0],
            extension: "csv".to_string(),
            delimiter: ',',
            year_field: "Year".to_string(),
            value_field: "Value".to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main `countrystat` configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// GDP dataset.
    pub gdp: DatasetConfig,
    /// Population dataset.
    pub population: DatasetConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            gdp: DatasetConfig::gdp("data/gdp.csv"),
            population: DatasetConfig::population("data/population.csv"),
            logging: LoggingConfig::default(),
        }
    }
}

impl InspectorConfig {
    /// Default dataset layout pointed at the given files.
    #[must_use]
    pub fn for_paths(gdp: impl Into<PathBuf>, population: impl Into<PathBuf>) -> Self {
        Self {
            gdp: DatasetConfig::gdp(gdp),
            population: DatasetConfig::population(population),
            logging: LoggingConfig::default(),
        }
    }

    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("countrystat.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("COUNTRYSTAT_").split("__"))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gdp.validate("gdp")?;
        self.population.validate("population")?;

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }
        Ok(())
    }
}
