//! Configuration validation utilities

use crate::{ConfigError, Result, ShiftBoardConfig};
use url::Url;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &ShiftBoardConfig) -> Result<()> {
        Self::validate_endpoint("csv_url", &config.csv_url)?;
        Self::validate_endpoint("webapp_url", &config.webapp_url)?;

        if config.calendar.first_day > 6 {
            return Err(ConfigError::Validation {
                field: "calendar.firstDay".to_string(),
                message: format!(
                    "Invalid first day: {}. Must be between 0 and 6",
                    config.calendar.first_day
                ),
            });
        }

        Ok(())
    }

    /// Endpoints must be absolute http(s) URLs
    fn validate_endpoint(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: field.to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let url = Url::parse(value.trim()).map_err(|e| ConfigError::Validation {
            field: field.to_string(),
            message: format!("not a valid URL: {e}"),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::Validation {
                field: field.to_string(),
                message: format!("unsupported scheme: {scheme}"),
            }),
        }
    }
}
