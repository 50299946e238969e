//! Settings file structures

use polyglot_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Root of the settings file.
///
/// ```yaml
/// server:
///   bind: 0.0.0.0:1323
/// i18n:
///   default_language: en
///   accept_languages: [zh, en]
///   format_bundle_file: yaml
///   root_path: ./localize
/// logging:
///   level: info
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    /// HTTP server settings
    pub server: ServerSettings,

    /// Message bundle settings
    pub i18n: I18nSettings,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on
    #[validate(custom(function = "crate::validation::validate_bind_address", message = "Bind address must be a socket address such as 0.0.0.0:1323"))]
    pub bind: String,
}

/// Message bundle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nSettings {
    /// Language used when no other language matches
    #[validate(custom(function = "crate::validation::validate_language_tag", message = "Default language must be a valid language tag"))]
    pub default_language: String,

    /// Languages whose bundle files are loaded
    #[validate(custom(function = "crate::validation::validate_language_tags", message = "Accepted languages must be valid language tags"))]
    pub accept_languages: Vec<String>,

    /// Extension of the bundle files, also selecting the unmarshal function
    #[validate(custom(function = "crate::validation::validate_bundle_format", message = "Bundle file format must be a plain file extension"))]
    pub format_bundle_file: String,

    /// Directory holding the bundle files
    #[validate(length(min = 1, message = "Root path cannot be empty"))]
    pub root_path: String,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:1323".to_string(),
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            accept_languages: vec!["zh".to_string(), "en".to_string()],
            format_bundle_file: "yaml".to_string(),
            root_path: "./localize".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl Settings {
    /// Validate every section of the settings
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.server.validate()?;
        self.i18n.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl LoggingSettings {
    /// Logging setup matching these settings
    pub fn to_logging_config(&self) -> LoggingConfig {
        if self.json {
            return LoggingConfig {
                level: self.level.clone(),
                ..LoggingConfig::production(self.file.clone())
            };
        }

        LoggingConfig {
            level: self.level.clone(),
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.validate_all().is_ok());
        assert_eq!(settings.server.bind, "0.0.0.0:1323");
        assert_eq!(settings.i18n.default_language, "en");
        assert_eq!(settings.i18n.accept_languages, vec!["zh", "en"]);
        assert_eq!(settings.i18n.format_bundle_file, "yaml");
        assert_eq!(settings.i18n.root_path, "./localize");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: Settings =
            serde_yaml::from_str("i18n:\n  default_language: zh\n").unwrap();
        assert_eq!(settings.i18n.default_language, "zh");
        assert_eq!(settings.i18n.accept_languages, vec!["zh", "en"]);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_empty_accept_languages_is_kept() {
        let settings: Settings = serde_yaml::from_str("i18n:\n  accept_languages: []\n").unwrap();
        assert!(settings.i18n.accept_languages.is_empty());
        assert!(settings.validate_all().is_ok());
    }

    #[test]
    fn test_i18n_settings_validation() {
        let mut settings = I18nSettings::default();
        assert!(settings.validate().is_ok());

        settings.default_language = "not a tag".to_string();
        assert!(settings.validate().is_err());

        settings = I18nSettings::default();
        settings.accept_languages.push("??".to_string());
        assert!(settings.validate().is_err());

        settings = I18nSettings::default();
        settings.format_bundle_file = String::new();
        assert!(settings.validate().is_err());

        settings = I18nSettings::default();
        settings.root_path = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_server_and_logging_validation() {
        let mut settings = Settings::default();
        settings.server.bind = "nowhere".to_string();
        assert!(settings.validate_all().is_err());

        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert!(settings.validate_all().is_err());
    }

    #[test]
    fn test_to_logging_config() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            json: true,
            file: Some("/var/log/polyglot.log".to_string()),
        };
        let config = settings.to_logging_config();
        assert_eq!(config.level, "debug");
        assert!(config.json_format);
        assert_eq!(config.file_path.as_deref(), Some("/var/log/polyglot.log"));

        let config = LoggingSettings::default().to_logging_config();
        assert!(!config.json_format);
        assert!(config.file_path.is_none());
    }
}
