//! Configuration system for the Shift Board dashboard
//! Holds the roster and request-store endpoints plus calendar presentation options

use serde::{Deserialize, Serialize};
use shift_board_shared::{CalendarOptions, ShiftBoardError, StatusFilterMode};
use thiserror::Error;

pub mod parser;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser};
pub use validation::ConfigValidator;

/// Errors raised while loading or checking a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<ConfigError> for ShiftBoardError {
    fn from(err: ConfigError) -> Self {
        let field = match &err {
            ConfigError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };
        ShiftBoardError::InvalidConfig {
            message: err.to_string(),
            field,
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftBoardConfig {
    /// Published roster CSV
    pub csv_url: String,
    /// Request store endpoint
    pub webapp_url: String,
    #[serde(default)]
    pub status_filter: StatusFilterMode,
    #[serde(default)]
    pub calendar: CalendarOptions,
}

impl ShiftBoardConfig {
    pub fn new(csv_url: impl Into<String>, webapp_url: impl Into<String>) -> Self {
        Self {
            csv_url: csv_url.into(),
            webapp_url: webapp_url.into(),
            status_filter: StatusFilterMode::default(),
            calendar: CalendarOptions::default(),
        }
    }

    pub fn with_status_filter(mut self, mode: StatusFilterMode) -> Self {
        self.status_filter = mode;
        self
    }

    /// Parse a JSON document and validate it
    pub fn from_json(content: &str) -> Result<Self> {
        let config = ConfigParser::parse_string(content, ConfigFormat::Json)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load a config file (format from extension) and validate it
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = ConfigParser::parse_file(path)?;
        ConfigValidator::validate(&config)?;
        log::debug!(
            "Loaded configuration: csv_url={}, webapp_url={}",
            config.csv_url,
            config.webapp_url
        );
        Ok(config)
    }
}
