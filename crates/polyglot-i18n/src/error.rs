//! Error types for bundle loading and message localization

use polyglot_common::PolyglotError;
use thiserror::Error;

/// Errors raised while building a message bundle.
///
/// These happen once, at middleware construction, and are meant to stop
/// the application from starting.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The loader could not produce the bytes of a message file
    #[error("Failed to load message file {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No unmarshal function is registered for the file's format
    #[error("No unmarshal function registered for format \"{format}\" ({path})")]
    UnsupportedFormat { format: String, path: String },

    /// The unmarshal function rejected the file contents
    #[error("Failed to unmarshal message file {path}: {source}")]
    Unmarshal {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A language tag could not be parsed
    #[error("Invalid language identifier: {0}")]
    InvalidLanguage(String),

    /// Fluent rejected the syntax of a message pattern
    #[error("Failed to parse messages in {path}: {errors:?}")]
    Parse { path: String, errors: Vec<String> },
}

/// Errors returned by a single localization request.
///
/// None of these affect other requests or the shared bundle.
#[derive(Error, Debug)]
pub enum LocalizeError {
    /// The i18n middleware did not attach its state to the request
    #[error("i18n config is not attached to the request")]
    MissingConfig,

    /// The localization request itself is malformed
    #[error("invalid localize request: {0}")]
    InvalidRequest(String),

    /// No bundle for the resolved (or default) language has this message
    #[error("message \"{id}\" not found in language \"{language}\"")]
    MessageNotFound { id: String, language: String },
}

impl LocalizeError {
    /// Language code carried by the error, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::MessageNotFound { language, .. } => Some(language),
            Self::MissingConfig | Self::InvalidRequest(_) => None,
        }
    }
}

impl From<BundleError> for PolyglotError {
    fn from(err: BundleError) -> Self {
        let message = format!("Failed to build message bundle: {err}");
        PolyglotError::localization_with_source(message, err)
    }
}

impl From<LocalizeError> for PolyglotError {
    fn from(err: LocalizeError) -> Self {
        match err.language() {
            Some(language) => PolyglotError::localization_with_locale(err.to_string(), language),
            None => PolyglotError::localization(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_not_found_display() {
        let err = LocalizeError::MessageNotFound {
            id: "welcome?".to_string(),
            language: "zh".to_string(),
        };
        assert_eq!(err.to_string(), r#"message "welcome?" not found in language "zh""#);
        assert_eq!(err.language(), Some("zh"));
    }

    #[test]
    fn test_conversion_keeps_locale() {
        let err = LocalizeError::MessageNotFound {
            id: "hello".to_string(),
            language: "en".to_string(),
        };
        match PolyglotError::from(err) {
            PolyglotError::Localization { message, locale, .. } => {
                assert!(message.contains("hello"));
                assert_eq!(locale.as_deref(), Some("en"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bundle_error_display() {
        let err = BundleError::Load {
            path: "localize/fr.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("localize/fr.yaml"));
        assert!(PolyglotError::from(err)
            .to_string()
            .starts_with("Localization error"));
    }
}
