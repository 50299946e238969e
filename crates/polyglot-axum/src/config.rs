//! Middleware configuration and its defaults

use crate::handler::default_lang_handler;
use axum::http::request::Parts;
use polyglot_config::I18nSettings;
use polyglot_i18n::locale::{chinese, english, parse_language_tag};
use polyglot_i18n::{unmarshal, BundleError, FsLoader, LanguageIdentifier, Loader, UnmarshalFn};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Bundle file format used when none is configured
pub const DEFAULT_FORMAT: &str = "yaml";

/// Directory searched for bundle files when none is configured
pub const DEFAULT_ROOT_PATH: &str = "./localize";

/// Resolves the language of a request.
///
/// Receives the request parts (`None` outside of a request) and the
/// default language tag, and returns the language tag to use.
pub type LangHandler = Arc<dyn Fn(Option<&Parts>, &str) -> String + Send + Sync>;

/// Configuration of the i18n middleware.
///
/// Every field is optional; [`Config::resolve`] fills the unset ones.
#[derive(Clone, Default)]
pub struct Config {
    pub default_language: Option<LanguageIdentifier>,
    pub accept_languages: Option<Vec<LanguageIdentifier>>,
    pub format_bundle_file: Option<String>,
    pub loader: Option<Arc<dyn Loader>>,
    pub root_path: Option<PathBuf>,
    pub lang_handler: Option<LangHandler>,
    pub unmarshal_fn: Option<UnmarshalFn>,
}

/// A [`Config`] with every field filled in
#[derive(Clone)]
pub struct ResolvedConfig {
    pub default_language: LanguageIdentifier,
    pub accept_languages: Vec<LanguageIdentifier>,
    pub format_bundle_file: String,
    pub loader: Arc<dyn Loader>,
    pub root_path: PathBuf,
    pub lang_handler: LangHandler,
    pub unmarshal_fn: UnmarshalFn,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_language(mut self, language: LanguageIdentifier) -> Self {
        self.default_language = Some(language);
        self
    }

    /// Languages whose bundle files are loaded. An empty list is kept as is.
    pub fn with_accept_languages(
        mut self,
        languages: impl IntoIterator<Item = LanguageIdentifier>,
    ) -> Self {
        self.accept_languages = Some(languages.into_iter().collect());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format_bundle_file = Some(format.into());
        self
    }

    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    pub fn with_lang_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(Option<&Parts>, &str) -> String + Send + Sync + 'static,
    {
        self.lang_handler = Some(Arc::new(handler));
        self
    }

    pub fn with_unmarshal_fn(mut self, unmarshal: UnmarshalFn) -> Self {
        self.unmarshal_fn = Some(unmarshal);
        self
    }

    /// Runtime configuration from a settings file section.
    ///
    /// The unmarshal function follows the bundle format when it is one of
    /// the built-in formats, and stays unset otherwise.
    pub fn from_settings(settings: &I18nSettings) -> Result<Self, BundleError> {
        let accept_languages = settings
            .accept_languages
            .iter()
            .map(|tag| parse_language_tag(tag))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            default_language: Some(parse_language_tag(&settings.default_language)?),
            accept_languages: Some(accept_languages),
            format_bundle_file: Some(settings.format_bundle_file.clone()),
            root_path: Some(PathBuf::from(&settings.root_path)),
            unmarshal_fn: unmarshal_fn_for_format(&settings.format_bundle_file),
            ..Self::default()
        })
    }

    /// Fill every unset field with its default
    pub fn resolve(self) -> ResolvedConfig {
        ResolvedConfig {
            default_language: self.default_language.unwrap_or_else(english),
            accept_languages: self
                .accept_languages
                .unwrap_or_else(|| vec![chinese(), english()]),
            format_bundle_file: self
                .format_bundle_file
                .filter(|format| !format.is_empty())
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            loader: self.loader.unwrap_or_else(|| Arc::new(FsLoader)),
            root_path: self
                .root_path
                .filter(|path| !path.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_PATH)),
            lang_handler: self
                .lang_handler
                .unwrap_or_else(|| Arc::new(default_lang_handler)),
            unmarshal_fn: self.unmarshal_fn.unwrap_or_else(unmarshal::yaml_fn),
        }
    }
}

/// Built-in unmarshal function for a bundle file format
pub fn unmarshal_fn_for_format(format: &str) -> Option<UnmarshalFn> {
    match format {
        "yaml" | "yml" => Some(unmarshal::yaml_fn()),
        "json" => Some(unmarshal::json_fn()),
        "toml" => Some(unmarshal::toml_fn()),
        _ => None,
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("default_language", &self.default_language)
            .field("accept_languages", &self.accept_languages)
            .field("format_bundle_file", &self.format_bundle_file)
            .field("root_path", &self.root_path)
            .field("custom_loader", &self.loader.is_some())
            .field("custom_lang_handler", &self.lang_handler.is_some())
            .field("custom_unmarshal_fn", &self.unmarshal_fn.is_some())
            .finish()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("default_language", &self.default_language)
            .field("accept_languages", &self.accept_languages)
            .field("format_bundle_file", &self.format_bundle_file)
            .field("root_path", &self.root_path)
            .finish_non_exhaustive()
    }
}
