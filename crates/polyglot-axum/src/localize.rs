//! Per-request localization: free functions and the [`I18n`] extractor

use crate::middleware::I18nState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use polyglot_i18n::{LocalizeError, Localizer, MessageRequest};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Localize a message for the request described by `parts`.
///
/// Fails with [`LocalizeError::MissingConfig`] when the request did not pass
/// through [`I18nLayer`](crate::I18nLayer).
pub fn localize(
    parts: &Parts,
    request: impl Into<MessageRequest>,
) -> Result<String, LocalizeError> {
    let state = parts
        .extensions
        .get::<Arc<I18nState>>()
        .ok_or(LocalizeError::MissingConfig)?;
    state.localize(Some(parts), &request.into())
}

/// Like [`localize`], but panics on error.
///
/// # Panics
///
/// Panics with the localization error. Pair with a panic-catching layer so
/// the panic only fails the current request.
pub fn must_localize(parts: &Parts, request: impl Into<MessageRequest>) -> String {
    match localize(parts, request) {
        Ok(message) => message,
        Err(err) => panic!("{err}"),
    }
}

/// Extractor giving handlers the localizer of the request's language.
///
/// ```ignore
/// async fn welcome(i18n: I18n) -> Result<String, LocalizeRejection> {
///     Ok(i18n.localize("welcome")?)
/// }
/// ```
#[derive(Clone)]
pub struct I18n {
    state: Arc<I18nState>,
    language: String,
}

impl I18n {
    /// Language tag resolved for this request
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Localizer used for this request
    pub fn localizer(&self) -> &Localizer {
        self.state.localizer(&self.language)
    }

    pub fn localize(&self, request: impl Into<MessageRequest>) -> Result<String, LocalizeError> {
        self.localizer().localize(&request.into())
    }

    /// # Panics
    ///
    /// Panics with the localization error.
    pub fn must_localize(&self, request: impl Into<MessageRequest>) -> String {
        match self.localize(request) {
            Ok(message) => message,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl<S> FromRequestParts<S> for I18n
where
    S: Send + Sync,
{
    type Rejection = LocalizeRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = parts
            .extensions
            .get::<Arc<I18nState>>()
            .cloned()
            .ok_or(LocalizeError::MissingConfig)?;
        let language = state.resolve_language(Some(parts));
        Ok(Self { state, language })
    }
}

/// A [`LocalizeError`] answered as `500 Internal Server Error` with the error text
#[derive(Debug)]
pub struct LocalizeRejection(pub LocalizeError);

impl From<LocalizeError> for LocalizeRejection {
    fn from(err: LocalizeError) -> Self {
        Self(err)
    }
}

impl fmt::Display for LocalizeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for LocalizeRejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl IntoResponse for LocalizeRejection {
    fn into_response(self) -> Response {
        warn!("Localization failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, I18nLayer};
    use axum::http::Request;
    use polyglot_i18n::locale::english;
    use polyglot_i18n::localize_config;
    use std::io;
    use std::path::Path;

    fn layer() -> I18nLayer {
        let loader = |path: &Path| -> io::Result<Vec<u8>> {
            if path.ends_with("zh.yaml") {
                Ok("welcomeWithName: \"你好 { $name }\"\n".as_bytes().to_vec())
            } else {
                Ok(b"welcomeWithName: \"hello { $name }\"\n".to_vec())
            }
        };
        I18nLayer::new(Config::new().with_loader(loader))
    }

    fn parts_with_state(uri: &str) -> Parts {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts.extensions.insert(layer().state().clone());
        parts
    }

    #[test]
    fn test_localize_uses_request_language() {
        let parts = parts_with_state("/?lang=zh");
        let message = localize(&parts, localize_config!("welcomeWithName", "name" => "alex"));
        assert_eq!(message.unwrap(), "你好 alex");
    }

    #[test]
    fn test_localize_without_middleware() {
        let (parts, _) = Request::new(()).into_parts();
        let err = localize(&parts, "welcome").unwrap_err();
        assert!(matches!(err, LocalizeError::MissingConfig));
    }

    #[test]
    #[should_panic(expected = r#"message "welcome?" not found in language "zh""#)]
    fn test_must_localize_panics() {
        let parts = parts_with_state("/?lang=zh");
        must_localize(&parts, "welcome?");
    }

    #[tokio::test]
    async fn test_extractor() {
        let mut parts = parts_with_state("/");
        let i18n = I18n::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(i18n.language(), "en");
        assert_eq!(i18n.localizer().language(), &english());
        assert_eq!(
            i18n.must_localize(localize_config!("welcomeWithName", "name" => "bob")),
            "hello bob"
        );
    }

    #[tokio::test]
    async fn test_extractor_rejection() {
        let (mut parts, _) = Request::new(()).into_parts();
        let rejection = I18n::from_request_parts(&mut parts, &()).await.unwrap_err();
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
