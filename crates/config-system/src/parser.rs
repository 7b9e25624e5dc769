//! Configuration file parser for multiple formats

use crate::{ConfigError, Result, ShiftBoardConfig};
use std::fs;
use std::path::Path;

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Configuration parser
pub struct ConfigParser;

impl ConfigParser {
    /// Parse configuration from a file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<ShiftBoardConfig> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)?;
        let format = Self::detect_format(path)?;

        Self::parse_string(&content, format)
    }

    /// Parse configuration from a string
    pub fn parse_string(content: &str, format: ConfigFormat) -> Result<ShiftBoardConfig> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("YAML parse error: {}", e))),
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e))),
        }
    }

    /// Detect configuration format from file extension
    pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ConfigError::Parse("Cannot determine config format from file extension".to_string())
        })?;

        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::Parse(format!(
                "Unsupported config format: {}",
                ext
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_board_shared::StatusFilterMode;
    use std::io::Write;

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
csv_url: "https://example.org/roster.csv"
webapp_url: "https://example.org/exec"
status_filter: server
calendar:
  locale: en
"#;

        let config = ConfigParser::parse_string(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.status_filter, StatusFilterMode::Server);
        assert_eq!(config.calendar.locale, "en");
        assert_eq!(config.calendar.first_day, 1);
    }

    #[test]
    fn test_toml_parsing() {
        let toml = r#"
csv_url = "https://example.org/roster.csv"
webapp_url = "https://example.org/exec"

[calendar]
firstDay = 0
"#;

        let config = ConfigParser::parse_string(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.csv_url, "https://example.org/roster.csv");
        assert_eq!(config.calendar.first_day, 0);
        assert_eq!(config.status_filter, StatusFilterMode::Client);
    }

    #[test]
    fn test_missing_url_is_parse_error() {
        let result = ConfigParser::parse_string(r#"{"csv_url":"x"}"#, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ConfigParser::detect_format(Path::new("board.YML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigParser::detect_format(Path::new("board.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(ConfigParser::detect_format(Path::new("board.ini")).is_err());
        assert!(ConfigParser::detect_format(Path::new("board")).is_err());
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"csv_url":"https://example.org/r.csv","webapp_url":"https://example.org/exec"}}"#
        )
        .unwrap();

        let config = ConfigParser::parse_file(file.path()).unwrap();
        assert_eq!(config.webapp_url, "https://example.org/exec");
    }
}
