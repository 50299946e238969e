//! Settings file loading and validation for Polyglot

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{I18nSettings, LoggingSettings, ServerSettings, Settings};
