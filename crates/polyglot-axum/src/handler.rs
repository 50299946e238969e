//! Default request language resolution

use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use url::form_urlencoded;

/// Query parameter selecting the language of a request
pub const LANG_QUERY_PARAM: &str = "lang";

/// Resolve the language of a request.
///
/// First non-empty match wins: the `lang` query parameter, then the
/// `Accept-Language` header taken verbatim, then `default_language`.
/// Weighted lists such as `en-US,en;q=0.9` are not parsed; install a custom
/// handler for those.
pub fn default_lang_handler(parts: Option<&Parts>, default_language: &str) -> String {
    let Some(parts) = parts else {
        return default_language.to_string();
    };

    if let Some(lang) = query_lang(parts) {
        return lang;
    }

    if let Some(lang) = parts
        .headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
    {
        return lang.to_string();
    }

    default_language.to_string()
}

/// First `lang` query value, if it is not empty
fn query_lang(parts: &Parts) -> Option<String> {
    let query = parts.uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == LANG_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, accept_language: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = accept_language {
            builder = builder.header(ACCEPT_LANGUAGE, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_no_request_returns_default() {
        assert_eq!(default_lang_handler(None, "en"), "en");
    }

    #[test]
    fn test_query_over_header() {
        let parts = parts("/test?lang=en", Some("zh"));
        assert_eq!(default_lang_handler(Some(&parts), "fr"), "en");
    }

    #[test]
    fn test_header_over_default() {
        let parts = parts("/test", Some("zh"));
        assert_eq!(default_lang_handler(Some(&parts), "en"), "zh");
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let parts = parts("/test?other=1", None);
        assert_eq!(default_lang_handler(Some(&parts), "en"), "en");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let parts = parts("/test?lang=", Some(""));
        assert_eq!(default_lang_handler(Some(&parts), "en"), "en");
    }

    #[test]
    fn test_query_is_url_decoded() {
        let parts = parts("/test?lang=zh%2DHans", None);
        assert_eq!(default_lang_handler(Some(&parts), "en"), "zh-Hans");
    }

    #[test]
    fn test_header_is_taken_verbatim() {
        let parts = parts("/", Some("en-US,en;q=0.9"));
        assert_eq!(default_lang_handler(Some(&parts), "zh"), "en-US,en;q=0.9");
    }
}
