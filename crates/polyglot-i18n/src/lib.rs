//! Message bundles and localizers for Polyglot
//!
//! This crate turns message files (YAML, JSON, TOML or any registered
//! format) into Fluent bundles and formats messages per language:
//!
//! - [`Loader`] implementations that fetch message file bytes
//! - [`MessageBundle`] holding one Fluent bundle per language
//! - [`Localizer`] formatting messages with default-language fallback
//!
//! # Example
//!
//! ```rust
//! use polyglot_i18n::{unmarshal, Localizer, MessageBundle};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bundle = MessageBundle::new(polyglot_i18n::locale::english());
//! bundle.register_unmarshal_fn("yaml", unmarshal::yaml_fn());
//! bundle.parse_message_file_bytes(b"welcome: hello", Path::new("en.yaml"))?;
//!
//! let localizer = Localizer::new(Arc::new(bundle), "en".parse()?);
//! assert_eq!(localizer.localize(&"welcome".into())?, "hello");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod bundle;
pub mod error;
pub mod loader;
pub mod locale;
pub mod localizer;
pub mod message;
pub mod unmarshal;

pub use bundle::MessageBundle;
pub use error::{BundleError, LocalizeError};
pub use loader::{EmbedLoader, FsLoader, Loader};
pub use localizer::{LocalizeConfig, Localizer, MessageRequest};
pub use message::{MessageBody, MessageFile, MessageIds, MessageSource, PluralMessage};
pub use unmarshal::{UnmarshalError, UnmarshalFn};

// Re-export commonly used Fluent and language types
pub use fluent_bundle::{FluentArgs, FluentValue};
pub use unic_langid::LanguageIdentifier;
