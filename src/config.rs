//! Application configuration.

use crate::games::quiz_four::{DEFAULT_COLS, DEFAULT_ROWS, Word};
use crate::vocabulary::default_words;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable naming the config file when no path is given.
pub const CONFIG_ENV: &str = "QUIZ_FOUR_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Board height for new matches.
    #[serde(default = "default_rows")]
    board_rows: usize,

    /// Board width for new matches.
    #[serde(default = "default_cols")]
    board_cols: usize,

    /// Quiz vocabulary.
    #[serde(default = "default_words")]
    words: Vec<Word>,

    /// Automated match settings.
    #[serde(default)]
    simulation: SimulationConfig,
}

/// Settings for automated matches.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability that an automated player answers correctly.
    #[serde(default = "default_accuracy")]
    accuracy: f64,

    /// Seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,

    /// Actions after which an unfinished match is abandoned.
    #[serde(default = "default_max_actions")]
    max_actions: usize,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

fn default_accuracy() -> f64 {
    0.75
}

fn default_max_actions() -> usize {
    500
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            accuracy: default_accuracy(),
            seed: None,
            max_actions: default_max_actions(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            board_rows: default_rows(),
            board_cols: default_cols(),
            words: default_words(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            rows = config.board_rows,
            cols = config.board_cols,
            words = config.words.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from `path`, else from `$QUIZ_FOUR_CONFIG`, else defaults.
    #[instrument]
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match std::env::var(CONFIG_ENV) {
                Ok(path) => Self::from_file(path),
                Err(_) => {
                    debug!("No config file given; using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Replaces simulation settings given on the command line.
    pub fn override_simulation(&mut self, accuracy: Option<f64>, seed: Option<u64>) -> Result<(), ConfigError> {
        if let Some(accuracy) = accuracy {
            self.simulation.accuracy = accuracy;
        }
        if seed.is_some() {
            self.simulation.seed = seed;
        }
        self.validate()
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_rows == 0 || self.board_cols == 0 {
            return Err(ConfigError::new(format!(
                "Board must be at least 1x1, got {}x{}",
                self.board_rows, self.board_cols
            )));
        }
        if !(0.0..=1.0).contains(&self.simulation.accuracy) {
            return Err(ConfigError::new(format!(
                "Accuracy must be between 0 and 1, got {}",
                self.simulation.accuracy
            )));
        }
        if self.words.is_empty() {
            return Err(ConfigError::new("At least one word is required"));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(*config.board_rows(), 6);
        assert_eq!(*config.simulation().max_actions(), 500);
    }

    #[test]
    fn test_override_rejects_bad_accuracy() {
        let mut config = AppConfig::default();
        assert!(config.override_simulation(Some(1.5), None).is_err());
        assert!(config.override_simulation(Some(0.5), Some(3)).is_ok());
        assert_eq!(*config.simulation().seed(), Some(3));
    }

    #[test]
    fn test_zero_columns_rejected() {
        assert!(AppConfig::from_toml("board_cols = 0").is_err());
    }
}
