//! Absolute URL resolution.
//!
//! Input URLs are keys for merging, so they must compare equal whenever they
//! denote the same resource. The `url` crate applies WHATWG serialization:
//! empty paths become `/`, hosts are lowercased, non-ASCII is
//! percent-encoded.

use crate::error::{Result, SitemapError};
use url::Url;

/// Resolve `input` to its canonical absolute form.
///
/// Relative references and strings without a scheme fail with
/// [`SitemapError::InvalidUrl`].
pub fn resolve(input: &str) -> Result<String> {
    Url::parse(input)
        .map(String::from)
        .map_err(|err| SitemapError::invalid_url(input, err))
}
