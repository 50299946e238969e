//! Umbrella error used at the binary boundary.
//!
//! Each library crate keeps its own error enum; conversions into
//! [`PolyglotError`] live next to those enums.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PolyglotError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PolyglotError {
    /// Settings could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: BoxedSource,
    },

    /// Bundle construction or a localization request failed
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Server error: {message}")]
    Server {
        message: String,
        #[source]
        source: BoxedSource,
    },

    #[error("Logging error: {message}")]
    Logging {
        message: String,
        #[source]
        source: BoxedSource,
    },
}

impl PolyglotError {
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Box::new(source),
        }
    }

    pub fn localization(msg: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: None,
            source: None,
        }
    }

    /// Localization error tagged with the language it happened in
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
            source: None,
        }
    }

    pub fn localization_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: None,
            source: Some(Box::new(source)),
        }
    }

    pub fn server_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Server {
            message: msg.into(),
            source: Box::new(source),
        }
    }

    pub fn logging_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Logging {
            message: msg.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_localization_locale() {
        let err = PolyglotError::localization_with_locale("Translation missing", "zh");
        assert_eq!(err.to_string(), "Localization error: Translation missing");
        assert!(err.source().is_none());
        match err {
            PolyglotError::Localization { locale, .. } => assert_eq!(locale.as_deref(), Some("zh")),
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(
            PolyglotError::localization("no bundle").to_string(),
            "Localization error: no bundle"
        );
    }

    #[test]
    fn test_server_error_keeps_source() {
        let err = PolyglotError::server_with_source(
            "Failed to bind 0.0.0.0:1323",
            io::Error::new(io::ErrorKind::AddrInUse, "Address in use"),
        );
        assert_eq!(err.to_string(), "Server error: Failed to bind 0.0.0.0:1323");
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("Address in use"));
    }

    #[test]
    fn test_source_chain() {
        let root = io::Error::new(io::ErrorKind::NotFound, "polyglot.yaml");
        let config = PolyglotError::config_with_source("Failed to read settings", root);
        let top = PolyglotError::localization_with_source("Startup aborted", config);

        let mut current: &dyn Error = &top;
        let mut depth = 0;
        while let Some(source) = current.source() {
            current = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
        assert_eq!(current.to_string(), "polyglot.yaml");
    }

    #[test]
    fn test_logging_error_display() {
        let err = PolyglotError::logging_with_source(
            "Invalid log filter",
            io::Error::new(io::ErrorKind::InvalidInput, "bad directive"),
        );
        assert_eq!(err.to_string(), "Logging error: Invalid log filter");
    }
}
