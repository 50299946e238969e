//! Language tag utilities and the bundle file naming convention

use crate::error::BundleError;
use std::path::{Path, PathBuf};
use unic_langid::{langid, LanguageIdentifier};

/// English, the default language when none is configured
pub fn english() -> LanguageIdentifier {
    langid!("en")
}

/// Chinese
pub fn chinese() -> LanguageIdentifier {
    langid!("zh")
}

/// Parse a BCP-47 language tag
pub fn parse_language_tag(tag: &str) -> Result<LanguageIdentifier, BundleError> {
    tag.parse()
        .map_err(|_| BundleError::InvalidLanguage(tag.to_string()))
}

/// Path of the bundle file for `language`: `<root>/<language>.<format>`
pub fn bundle_file_path(root: &Path, language: &LanguageIdentifier, format: &str) -> PathBuf {
    root.join(format!("{language}.{format}"))
}

/// Language segment of a message file name.
///
/// The last dot-separated part of the file stem names the language, so
/// `en.yaml` and `active.en.yaml` both belong to `en`.
pub fn language_from_path(path: &Path) -> Option<&str> {
    let stem = path.file_stem()?.to_str()?;
    stem.rsplit('.').next().filter(|segment| !segment.is_empty())
}

/// Format (file extension) of a message file
pub fn format_from_path(path: &Path) -> Option<&str> {
    path.extension()?.to_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_file_path() {
        let path = bundle_file_path(Path::new("./localize"), &chinese(), "yaml");
        assert_eq!(path, Path::new("./localize/zh.yaml"));

        let path = bundle_file_path(Path::new(""), &english(), "json");
        assert_eq!(path, Path::new("en.json"));
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(language_from_path(Path::new("localize/en.yaml")), Some("en"));
        assert_eq!(language_from_path(Path::new("active.zh-Hans.json")), Some("zh-Hans"));
        assert_eq!(language_from_path(Path::new("")), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(format_from_path(Path::new("localize/en.yaml")), Some("yaml"));
        assert_eq!(format_from_path(Path::new("localize/en")), None);
    }

    #[test]
    fn test_parse_language_tag() {
        assert_eq!(parse_language_tag("en").unwrap(), english());
        assert_eq!(parse_language_tag("zh-hans").unwrap().to_string(), "zh-Hans");
        assert!(matches!(
            parse_language_tag("not a tag"),
            Err(BundleError::InvalidLanguage(tag)) if tag == "not a tag"
        ));
    }
}
