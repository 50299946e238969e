//! Middleware that loads the message bundle once and attaches it to every request

use crate::config::{Config, ResolvedConfig};
use axum::http::request::Parts;
use axum::http::Request;
use polyglot_i18n::locale::bundle_file_path;
use polyglot_i18n::{
    BundleError, LanguageIdentifier, LocalizeError, Localizer, MessageBundle, MessageRequest,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, info};

/// Bundle and localizers shared by all requests.
///
/// Built once by [`I18nLayer`] and read-only afterwards.
pub struct I18nState {
    config: ResolvedConfig,
    bundle: Arc<MessageBundle>,
    localizers: HashMap<String, Localizer>,
    default_localizer: Localizer,
}

impl I18nState {
    /// Load every accepted language's bundle file and build the localizers
    pub fn build(config: Config) -> Result<Self, BundleError> {
        let config = config.resolve();

        let mut bundle = MessageBundle::new(config.default_language.clone());
        bundle.register_unmarshal_fn(
            config.format_bundle_file.clone(),
            config.unmarshal_fn.clone(),
        );

        let mut message_count = 0;
        for language in &config.accept_languages {
            let path = bundle_file_path(&config.root_path, language, &config.format_bundle_file);
            message_count += bundle.load_message_file(config.loader.as_ref(), &path)?;
        }

        info!(
            "Loaded {} messages for {} languages from {:?}",
            message_count,
            config.accept_languages.len(),
            config.root_path
        );

        let bundle = Arc::new(bundle);

        let mut localizers = HashMap::new();
        for language in &config.accept_languages {
            localizers.insert(
                language.to_string(),
                Localizer::new(bundle.clone(), language.clone()),
            );
        }

        let default_localizer = localizers
            .entry(config.default_language.to_string())
            .or_insert_with(|| Localizer::new(bundle.clone(), config.default_language.clone()))
            .clone();

        Ok(Self {
            config,
            bundle,
            localizers,
            default_localizer,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn bundle(&self) -> &Arc<MessageBundle> {
        &self.bundle
    }

    pub fn default_language(&self) -> &LanguageIdentifier {
        &self.config.default_language
    }

    /// Language tags that have a localizer
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<_> = self.localizers.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Run the language handler for a request
    pub fn resolve_language(&self, parts: Option<&Parts>) -> String {
        (self.config.lang_handler)(parts, &self.config.default_language.to_string())
    }

    /// Localizer for a language tag, or the default language's localizer.
    ///
    /// Tags are matched as given first, then in canonical form, so `zh-hans`
    /// finds the `zh-Hans` localizer.
    pub fn localizer(&self, language: &str) -> &Localizer {
        if let Some(localizer) = self.localizers.get(language) {
            return localizer;
        }

        language
            .parse::<LanguageIdentifier>()
            .ok()
            .and_then(|canonical| self.localizers.get(&canonical.to_string()))
            .unwrap_or_else(|| {
                debug!(
                    "No localizer for '{}', using default language {}",
                    language, self.config.default_language
                );
                &self.default_localizer
            })
    }

    /// Localize a message for the request described by `parts`
    pub fn localize(
        &self,
        parts: Option<&Parts>,
        request: &MessageRequest,
    ) -> Result<String, LocalizeError> {
        let language = self.resolve_language(parts);
        self.localizer(&language).localize(request)
    }
}

impl std::fmt::Debug for I18nState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18nState")
            .field("config", &self.config)
            .field("languages", &self.languages())
            .finish()
    }
}

/// Layer attaching the shared [`I18nState`] to each request's extensions
#[derive(Clone, Debug)]
pub struct I18nLayer {
    state: Arc<I18nState>,
}

impl I18nLayer {
    /// Build the layer, returning any bundle loading error
    pub fn try_new(config: Config) -> Result<Self, BundleError> {
        Ok(Self {
            state: Arc::new(I18nState::build(config)?),
        })
    }

    /// Build the layer, panicking if a bundle file cannot be loaded.
    ///
    /// # Panics
    ///
    /// Panics when any accepted language's bundle file fails to load or parse.
    pub fn new(config: Config) -> Self {
        match Self::try_new(config) {
            Ok(layer) => layer,
            Err(err) => panic!("failed to initialize i18n middleware: {err}"),
        }
    }

    /// Build the layer from [`Config::default`], panicking on load errors
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    /// Wrap an already built state
    pub fn from_state(state: Arc<I18nState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &Arc<I18nState> {
        &self.state
    }
}

impl<S> Layer<S> for I18nLayer {
    type Service = I18nService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        I18nService {
            inner,
            state: self.state.clone(),
        }
    }
}

/// Service produced by [`I18nLayer`]
#[derive(Clone, Debug)]
pub struct I18nService<S> {
    inner: S,
    state: Arc<I18nState>,
}

impl<S, B> Service<Request<B>> for I18nService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        req.extensions_mut().insert(self.state.clone());
        self.inner.call(req)
    }
}
