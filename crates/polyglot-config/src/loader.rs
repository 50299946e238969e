//! Settings loading utilities

use crate::Settings;
use polyglot_common::{PolyglotError, Result as PolyglotResult};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit settings file
pub const CONFIG_PATH_VAR: &str = "POLYGLOT_CONFIG_PATH";

/// Settings loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the settings file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Settings validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for PolyglotError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        PolyglotError::config_with_source(message, err)
    }
}

/// Settings loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        Self::load_config_with(path, |var| env::var(var).ok())
    }

    /// Load settings from a YAML file, reading overrides through `lookup`
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Settings, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading settings from {:?}", path.as_ref());
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut settings: Settings = if content.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(&content)?
        };

        Self::apply_env_overrides(&mut settings, lookup)?;
        settings.validate_all()?;

        Ok(settings)
    }

    /// Load settings from the environment and the working directory.
    ///
    /// Lookup order: `POLYGLOT_CONFIG_PATH`, `polyglot.yaml`, `polyglot.yml`,
    /// then built-in defaults. Environment overrides apply in every case.
    pub fn load() -> PolyglotResult<Settings> {
        let settings = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new("polyglot.yaml").exists() {
            Self::load_config("polyglot.yaml")?
        } else if Path::new("polyglot.yml").exists() {
            Self::load_config("polyglot.yml")?
        } else {
            info!("No settings file found, using defaults");
            Self::load_defaults_with(|var| env::var(var).ok())?
        };

        Ok(settings)
    }

    /// Built-in defaults with overrides read through `lookup`
    pub fn load_defaults_with<F>(lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        Self::apply_env_overrides(&mut settings, lookup)?;
        settings.validate_all()?;
        Ok(settings)
    }

    /// Apply environment variable overrides to settings
    fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(bind) = lookup("POLYGLOT_BIND") {
            settings.server.bind = bind;
        }

        // I18n
        if let Some(language) = lookup("POLYGLOT_DEFAULT_LANGUAGE") {
            settings.i18n.default_language = language;
        }

        if let Some(languages) = lookup("POLYGLOT_ACCEPT_LANGUAGES") {
            settings.i18n.accept_languages = languages
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(format) = lookup("POLYGLOT_FORMAT") {
            settings.i18n.format_bundle_file = format;
        }

        if let Some(root_path) = lookup("POLYGLOT_ROOT_PATH") {
            settings.i18n.root_path = root_path;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Some(json) = lookup("LOG_JSON") {
            settings.logging.json = json.parse().map_err(|e| ConfigError::EnvParseError {
                var: "LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(file) = lookup("LOG_FILE") {
            settings.logging.file = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary YAML settings file for testing
    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_load_valid_yaml_config() {
        let yaml_content = "server:\n  bind: \"127.0.0.1:8080\"\ni18n:\n  default_language: zh\n  accept_languages: [zh, en, fr]\n  format_bundle_file: json\n  root_path: ./messages\nlogging:\n  level: debug\n  json: true\n";

        let temp_file = create_test_config_file(yaml_content);
        let settings =
            ConfigLoader::load_config_with(temp_file.path(), no_env).expect("Failed to load config");

        assert_eq!(settings.server.bind, "127.0.0.1:8080");
        assert_eq!(settings.i18n.default_language, "zh");
        assert_eq!(settings.i18n.accept_languages, vec!["zh", "en", "fr"]);
        assert_eq!(settings.i18n.format_bundle_file, "json");
        assert_eq!(settings.i18n.root_path, "./messages");
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.json);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp_file = create_test_config_file("");
        let settings = ConfigLoader::load_config_with(temp_file.path(), no_env).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_file = create_test_config_file("i18n:\n  accept_languages: [unclosed");
        let result = ConfigLoader::load_config_with(temp_file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let temp_file = create_test_config_file("i18n:\n  default_language: \"not a tag\"\n");
        let result = ConfigLoader::load_config_with(temp_file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let temp_file = create_test_config_file("i18n:\n  default_language: en\n");
        let lookup = env_from(&[
            ("POLYGLOT_BIND", "127.0.0.1:9000"),
            ("POLYGLOT_DEFAULT_LANGUAGE", "zh"),
            ("POLYGLOT_ACCEPT_LANGUAGES", "en, zh,,fr"),
            ("POLYGLOT_FORMAT", "toml"),
            ("POLYGLOT_ROOT_PATH", "/srv/localize"),
            ("LOG_LEVEL", "warn"),
            ("LOG_JSON", "true"),
        ]);

        let settings = ConfigLoader::load_config_with(temp_file.path(), lookup).unwrap();

        assert_eq!(settings.server.bind, "127.0.0.1:9000");
        assert_eq!(settings.i18n.default_language, "zh");
        assert_eq!(settings.i18n.accept_languages, vec!["en", "zh", "fr"]);
        assert_eq!(settings.i18n.format_bundle_file, "toml");
        assert_eq!(settings.i18n.root_path, "/srv/localize");
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.logging.json);
    }

    #[test]
    fn test_env_parse_error() {
        let result = ConfigLoader::load_defaults_with(env_from(&[("LOG_JSON", "maybe")]));
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::EnvParseError { var, .. } if var == "LOG_JSON"
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config_with("/nonexistent/path/polyglot.yaml", no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_config_error_converts() {
        let err: PolyglotError = ConfigError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ))
        .into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
