//! Message bundle holding the Fluent bundles of every loaded language

use crate::error::{BundleError, LocalizeError};
use crate::loader::Loader;
use crate::locale::{format_from_path, language_from_path, parse_language_tag};
use crate::message::{flatten_messages, to_fluent_source, MessageFile, MessageIds};
use crate::unmarshal::{self, UnmarshalFn};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, error, warn};
use unic_langid::LanguageIdentifier;

/// All parsed translations, one Fluent bundle per language.
///
/// Built once and then shared read-only; the concurrent Fluent memoizer
/// keeps it `Send + Sync` without locks.
pub struct MessageBundle {
    default_language: LanguageIdentifier,
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    message_ids: HashMap<LanguageIdentifier, MessageIds>,
    unmarshal_fns: HashMap<String, UnmarshalFn>,
}

impl fmt::Debug for MessageBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBundle")
            .field("default_language", &self.default_language)
            .field("languages", &self.bundles.keys().collect::<Vec<_>>())
            .field("formats", &self.unmarshal_fns.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MessageBundle {
    /// Create an empty bundle. JSON files can be parsed out of the box.
    pub fn new(default_language: LanguageIdentifier) -> Self {
        let mut bundle = Self {
            default_language,
            bundles: HashMap::new(),
            message_ids: HashMap::new(),
            unmarshal_fns: HashMap::new(),
        };
        bundle.register_unmarshal_fn("json", unmarshal::json_fn());
        bundle
    }

    /// Register the decoder used for files with the `format` extension
    pub fn register_unmarshal_fn(&mut self, format: impl Into<String>, unmarshal: UnmarshalFn) {
        let format = format.into();
        debug!("Registered unmarshal function for format: {}", format);
        self.unmarshal_fns.insert(format, unmarshal);
    }

    /// Load a message file through `loader` and add its messages.
    ///
    /// Returns the number of messages added.
    pub fn load_message_file(
        &mut self,
        loader: &dyn Loader,
        path: &Path,
    ) -> Result<usize, BundleError> {
        debug!("Loading message file: {:?}", path);
        let bytes = loader
            .load_message(path)
            .map_err(|source| BundleError::Load {
                path: path.display().to_string(),
                source,
            })?;
        self.parse_message_file_bytes(&bytes, path)
    }

    /// Parse the bytes of a message file and add its messages.
    ///
    /// The language comes from the file name and the decoder from the
    /// extension: `localize/zh.yaml` is decoded as `yaml` into `zh`.
    pub fn parse_message_file_bytes(
        &mut self,
        bytes: &[u8],
        path: &Path,
    ) -> Result<usize, BundleError> {
        let origin = path.display().to_string();

        let language = language_from_path(path)
            .ok_or_else(|| BundleError::InvalidLanguage(origin.clone()))
            .and_then(parse_language_tag)?;

        let format = format_from_path(path).unwrap_or_default();
        let unmarshal = self.unmarshal_fns.get(format).cloned().ok_or_else(|| {
            BundleError::UnsupportedFormat {
                format: format.to_string(),
                path: origin.clone(),
            }
        })?;

        let messages = unmarshal(bytes).map_err(|source| BundleError::Unmarshal {
            path: origin.clone(),
            source,
        })?;

        self.add_messages(&language, &messages, &origin)
    }

    /// Add already decoded messages for `language`.
    ///
    /// Nested groups are flattened into dotted IDs. Later messages replace
    /// earlier ones with the same ID.
    pub fn add_messages(
        &mut self,
        language: &LanguageIdentifier,
        messages: &MessageFile,
        origin: &str,
    ) -> Result<usize, BundleError> {
        let flat = flatten_messages(messages);
        let ids = self.message_ids.entry(language.clone()).or_default();
        let entries: Vec<_> = flat
            .into_iter()
            .map(|(id, body)| (ids.assign(&id), body))
            .collect();
        let source = to_fluent_source(&entries);

        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            let error_messages: Vec<String> =
                errors.into_iter().map(|e| format!("{:?}", e)).collect();

            error!("Failed to parse messages from {}: {:?}", origin, error_messages);

            BundleError::Parse {
                path: origin.to_string(),
                errors: error_messages,
            }
        })?;

        let bundle = self.bundles.entry(language.clone()).or_insert_with(|| {
            let mut bundle = FluentBundle::new_concurrent(vec![language.clone()]);
            // Plain output, without Unicode isolation marks around placeables
            bundle.set_use_isolating(false);
            bundle
        });
        bundle.add_resource_overriding(resource);

        debug!(
            "Added {} messages for language {} from {}",
            entries.len(),
            language,
            origin
        );
        Ok(entries.len())
    }

    /// Language used when a message is missing from another language
    pub fn default_language(&self) -> &LanguageIdentifier {
        &self.default_language
    }

    /// Languages that have at least one message file loaded
    pub fn languages(&self) -> Vec<&LanguageIdentifier> {
        self.bundles.keys().collect()
    }

    /// Check if `language` has a message with this ID
    pub fn has_message(&self, language: &LanguageIdentifier, id: &str) -> bool {
        self.lookup(language, id)
            .is_some_and(|(bundle, fluent_id)| bundle.has_message(fluent_id))
    }

    fn lookup(
        &self,
        language: &LanguageIdentifier,
        id: &str,
    ) -> Option<(&FluentBundle<FluentResource>, &str)> {
        let fluent_id = self.message_ids.get(language)?.get(id)?;
        Some((self.bundles.get(language)?, fluent_id))
    }

    /// Format a message of `language` with the given arguments.
    ///
    /// Fluent resolver errors, such as a variable missing from `args`, are
    /// logged and the partially formatted text is returned; Fluent writes
    /// the unresolved placeable as `{$name}`.
    pub fn format_message(
        &self,
        language: &LanguageIdentifier,
        id: &str,
        args: Option<&FluentArgs<'_>>,
    ) -> Result<String, LocalizeError> {
        let not_found = || LocalizeError::MessageNotFound {
            id: id.to_string(),
            language: language.to_string(),
        };

        let (bundle, fluent_id) = self.lookup(language, id).ok_or_else(not_found)?;
        let message = bundle.get_message(fluent_id).ok_or_else(not_found)?;
        let pattern = message.value().ok_or_else(not_found)?;

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            let error_messages: Vec<String> =
                errors.into_iter().map(|e| format!("{:?}", e)).collect();

            warn!(
                "Formatting errors for message '{}' in {}: {:?}",
                id, language, error_messages
            );
        }

        Ok(formatted.into_owned())
    }
}
