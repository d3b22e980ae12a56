//! Configuration management and validation.
//!
//! Provides the parser settings and the processing/logging settings used by
//! the command-line tool, loaded in layers: built-in defaults, then an
//! optional TOML file, then environment variables. Command-line flags are
//! applied on top by the CLI layer.

use crate::app::models::Direction;
use crate::constants::{
    self, COMPONENT_SEPARATOR, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FILE_PATTERNS,
    DEFAULT_LOG_LEVEL, ELEMENT_SEPARATOR, ENV_LOG_LEVEL, ENV_WORKERS, SEGMENT_TERMINATOR,
    UNKNOWN_VOYAGE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The three EDIFACT delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub segment: char,
    pub element: char,
    pub component: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            segment: SEGMENT_TERMINATOR,
            element: ELEMENT_SEPARATOR,
            component: COMPONENT_SEPARATOR,
        }
    }
}

/// Settings that affect how a document is parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiters used to tokenize the document
    pub delimiters: Delimiters,

    /// Voyage number recorded when TDT carries none
    pub unknown_voyage: String,

    /// Direction stamped on every parsed voyage
    pub direction: Direction,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            unknown_voyage: UNKNOWN_VOYAGE.to_string(),
            direction: Direction::Unknown,
        }
    }
}

impl ParserConfig {
    /// Use custom delimiters
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Use a different sentinel for missing voyage numbers
    pub fn with_unknown_voyage(mut self, sentinel: impl Into<String>) -> Self {
        self.unknown_voyage = sentinel.into();
        self
    }

    /// Stamp parsed voyages with a direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Validate parser settings
    pub fn validate(&self) -> Result<()> {
        let Delimiters {
            segment,
            element,
            component,
        } = self.delimiters;

        if segment == element || segment == component || element == component {
            return Err(Error::configuration(format!(
                "Delimiters must be distinct (segment '{}', element '{}', component '{}')",
                segment, element, component
            )));
        }

        if [segment, element, component]
            .iter()
            .any(|c| matches!(c, '\r' | '\n'))
        {
            return Err(Error::configuration(
                "Line breaks cannot be used as delimiters".to_string(),
            ));
        }

        if self.unknown_voyage.trim().is_empty() {
            return Err(Error::configuration(
                "Unknown voyage sentinel cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Settings for batch processing of documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of documents parsed concurrently
    pub workers: usize,

    /// Glob patterns selecting BAPLIE files when scanning directories
    pub file_patterns: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: constants::default_workers(),
            file_patterns: DEFAULT_FILE_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub processing: ProcessingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Default location of the config file (`<config dir>/baplie-processor/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                Error::configuration("Could not determine the user config directory".to_string())
            })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        Self::from_toml_str(&text)
    }

    /// Load configuration in layers: defaults, file, environment
    ///
    /// The result is not validated; callers apply command-line overrides
    /// first and then call [`Config::validate`].
    ///
    /// An explicit `config_file` must exist. Without one, the default location
    /// is used when a file is present there.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                debug!("Loading config file {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    debug!("Loading default config file {}", path.display());
                    Self::from_file(&path)?
                }
                _ => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides, reading variables through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = lookup(ENV_WORKERS) {
            self.processing.workers = workers.trim().parse().map_err(|_| {
                Error::configuration(format!("Invalid {}: '{}'", ENV_WORKERS, workers))
            })?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level.trim().to_lowercase();
        }

        Ok(())
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;

        if self.processing.workers == 0 {
            return Err(Error::configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }

        if self.processing.file_patterns.is_empty() {
            return Err(Error::configuration(
                "At least one file pattern is required".to_string(),
            ));
        }

        for pattern in &self.processing.file_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::configuration(format!("Invalid file pattern '{}': {}", pattern, e))
            })?;
        }

        if !matches!(
            self.logging.level.as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(Error::configuration(format!(
                "Invalid log level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }
}
