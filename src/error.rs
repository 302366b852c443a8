//! Sitemap error types.

use thiserror::Error;

pub type Result<T, E = SitemapError> = std::result::Result<T, E>;

/// Errors raised while building a sitemap.
///
/// Every variant is fatal to the current call: no partial tree is returned.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// A URL is missing, malformed, or not absolute.
    #[error("Invalid URL `{}`", .input.as_deref().unwrap_or("undefined"))]
    InvalidUrl {
        input: Option<String>,
        #[source]
        source: Option<url::ParseError>,
    },

    /// An entry declares `alternate` without its own `lang`.
    #[error("Expected `lang` in entry with `alternate` `{entry}` (`{index}`)")]
    MissingLanguage { entry: String, index: usize },

    /// A `modified` value does not denote a valid date.
    #[error("Unexpected incorrect date `{value}`")]
    InvalidDate { value: String },
}

impl SitemapError {
    pub(crate) fn invalid_url(input: &str, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            input: Some(input.to_owned()),
            source: Some(source),
        }
    }

    pub(crate) const fn missing_url() -> Self {
        Self::InvalidUrl {
            input: None,
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_url_display() {
        let err = SitemapError::invalid_url("example.com", url::ParseError::RelativeUrlWithoutBase);
        let display = err.to_string();
        assert!(display.contains("Invalid URL"));
        assert!(display.contains("example.com"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_missing_url_display() {
        let err = SitemapError::missing_url();
        assert_eq!(err.to_string(), "Invalid URL `undefined`");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_missing_language_display() {
        let err = SitemapError::MissingLanguage {
            entry: "https://example.com/".to_string(),
            index: 3,
        };
        assert_eq!(
            err.to_string(),
            "Expected `lang` in entry with `alternate` `https://example.com/` (`3`)"
        );
    }

    #[test]
    fn test_invalid_date_display() {
        let err = SitemapError::InvalidDate {
            value: "asd".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected incorrect date `asd`");
    }
}
