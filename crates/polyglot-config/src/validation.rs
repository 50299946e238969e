//! Validation helpers used by the settings structures

use std::net::SocketAddr;
use unic_langid::LanguageIdentifier;
use validator::ValidationError;

/// Validate a BCP-47 language tag such as `en` or `zh-Hans`
pub fn validate_language_tag(tag: &str) -> Result<(), ValidationError> {
    if tag.is_empty() {
        return Err(ValidationError::new("empty_language_tag"));
    }

    match tag.parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("invalid_language_tag")),
    }
}

/// Validate every tag of a language list
pub fn validate_language_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        if validate_language_tag(tag).is_err() {
            let mut err = ValidationError::new("invalid_language_tag");
            err.add_param("tag".into(), tag);
            return Err(err);
        }
    }
    Ok(())
}

/// Validate a file extension used for bundle files (no dot, no separator)
pub fn validate_bundle_format(format: &str) -> Result<(), ValidationError> {
    if format.is_empty() {
        return Err(ValidationError::new("empty_bundle_format"));
    }

    if format
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_bundle_format"))
    }
}

/// Validate a socket address such as `0.0.0.0:1323`
pub fn validate_bind_address(bind: &str) -> Result<(), ValidationError> {
    match bind.parse::<SocketAddr>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("invalid_bind_address")),
    }
}

/// Validate a log level (trace, debug, info, warn, error)
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}
