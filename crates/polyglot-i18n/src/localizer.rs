//! Per-language localizers and the localization request types

use crate::bundle::MessageBundle;
use crate::error::LocalizeError;
use fluent_bundle::{FluentArgs, FluentValue};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Name of the argument carrying the plural count
pub const PLURAL_COUNT_ARG: &str = "count";

/// A localization request with template data and a plural count
#[derive(Debug, Clone, Default)]
pub struct LocalizeConfig {
    /// ID of the message to format
    pub message_id: String,
    /// Values for the placeables of the message (`{ $name }`)
    pub template_data: HashMap<String, FluentValue<'static>>,
    /// Count used to select a plural form, passed as `$count`
    pub plural_count: Option<FluentValue<'static>>,
}

impl LocalizeConfig {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            ..Self::default()
        }
    }

    /// Add one template value
    pub fn with_data(
        mut self,
        key: impl Into<String>,
        value: impl Into<FluentValue<'static>>,
    ) -> Self {
        self.template_data.insert(key.into(), value.into());
        self
    }

    /// Set the plural count
    pub fn with_plural_count(mut self, count: impl Into<FluentValue<'static>>) -> Self {
        self.plural_count = Some(count.into());
        self
    }

    /// Fluent arguments for this request, `None` when there are none.
    ///
    /// A `count` entry in the template data takes precedence over the
    /// plural count.
    pub fn to_fluent_args(&self) -> Option<FluentArgs<'static>> {
        if self.template_data.is_empty() && self.plural_count.is_none() {
            return None;
        }

        let mut args = FluentArgs::with_capacity(self.template_data.len() + 1);
        for (key, value) in &self.template_data {
            args.set(key.clone(), value.clone());
        }
        if let Some(count) = &self.plural_count {
            if !self.template_data.contains_key(PLURAL_COUNT_ARG) {
                args.set(PLURAL_COUNT_ARG, count.clone());
            }
        }
        Some(args)
    }
}

/// What to localize: a bare message ID or a full [`LocalizeConfig`]
#[derive(Debug, Clone)]
pub enum MessageRequest {
    Id(String),
    Config(LocalizeConfig),
}

impl MessageRequest {
    pub fn message_id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Config(config) => &config.message_id,
        }
    }

    fn fluent_args(&self) -> Option<FluentArgs<'static>> {
        match self {
            Self::Id(_) => None,
            Self::Config(config) => config.to_fluent_args(),
        }
    }
}

impl From<&str> for MessageRequest {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for MessageRequest {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<LocalizeConfig> for MessageRequest {
    fn from(config: LocalizeConfig) -> Self {
        Self::Config(config)
    }
}

impl From<&LocalizeConfig> for MessageRequest {
    fn from(config: &LocalizeConfig) -> Self {
        Self::Config(config.clone())
    }
}

/// Build a [`LocalizeConfig`] from a message ID and template data.
///
/// ```
/// use polyglot_i18n::localize_config;
///
/// let config = localize_config!("welcomeWithName", "name" => "alex");
/// assert_eq!(config.message_id, "welcomeWithName");
/// ```
#[macro_export]
macro_rules! localize_config {
    ($id:expr) => {
        $crate::LocalizeConfig::new($id)
    };
    ($id:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let config = $crate::LocalizeConfig::new($id);
        $(
            let config = config.with_data($key, $value);
        )+
        config
    }};
}

/// Localizes messages for one language, falling back to the bundle's
/// default language for messages the language does not define
#[derive(Debug, Clone)]
pub struct Localizer {
    language: LanguageIdentifier,
    bundle: Arc<MessageBundle>,
}

impl Localizer {
    pub fn new(bundle: Arc<MessageBundle>, language: LanguageIdentifier) -> Self {
        Self { language, bundle }
    }

    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    pub fn bundle(&self) -> &Arc<MessageBundle> {
        &self.bundle
    }

    /// Format the requested message
    pub fn localize(&self, request: &MessageRequest) -> Result<String, LocalizeError> {
        let id = request.message_id();
        if id.is_empty() {
            return Err(LocalizeError::InvalidRequest(
                "message id must not be empty".to_string(),
            ));
        }

        let args = request.fluent_args();

        if self.bundle.has_message(&self.language, id) {
            return self.bundle.format_message(&self.language, id, args.as_ref());
        }

        let default_language = self.bundle.default_language();
        if default_language != &self.language && self.bundle.has_message(default_language, id) {
            debug!(
                "Message '{}' missing in {}, using default language {}",
                id, self.language, default_language
            );
            return self
                .bundle
                .format_message(default_language, id, args.as_ref());
        }

        Err(LocalizeError::MessageNotFound {
            id: id.to_string(),
            language: self.language.to_string(),
        })
    }
}
