//! Sitemap input items and their normalized form.
//!
//! An input item is either a bare URL or a descriptor object:
//!
//! ```json
//! [
//!   "https://example.com/about/",
//!   {
//!     "url": "https://example.com/delta/",
//!     "modified": "05 October 2011 14:48 UTC",
//!     "lang": "en",
//!     "alternate": {"nl": "https://example.com/dirk/"}
//!   }
//! ]
//! ```
//!
//! Normalization ([`EntryInput::normalize`]) resolves the URL to its
//! canonical absolute form and normalizes the language tag. It never
//! mutates the input.
//!
//! `null` fields are treated the same as missing ones.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};

use crate::{
    error::{Result, SitemapError},
    utils::{date, lang, url},
};

// ============================================================================
// Input
// ============================================================================

/// One raw input item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntryInput {
    /// Bare URL, no other fields.
    Url(String),
    Descriptor(Descriptor),
}

/// Descriptor object for a page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Descriptor {
    /// Full URL (`<loc>`). Required: a missing URL fails normalization.
    pub url: Option<String>,
    /// When the page last changed (`<lastmod>`).
    pub modified: Option<Modified>,
    /// BCP 47 tag of the page. Required when `alternate` is set.
    pub lang: Option<String>,
    /// Translations, keyed by BCP 47 tag.
    pub alternate: Option<Alternates>,
}

impl Descriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_modified(mut self, modified: impl Into<Modified>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Add one translation, creating the `alternate` map if needed.
    pub fn with_alternate(
        mut self,
        tag: impl Into<String>,
        alt: impl Into<AlternateInput>,
    ) -> Self {
        self.alternate
            .get_or_insert_with(Alternates::new)
            .insert(tag, alt);
        self
    }

    /// Replace the whole `alternate` map.
    pub fn with_alternates(mut self, alternates: Alternates) -> Self {
        self.alternate = Some(alternates);
        self
    }
}

/// A translation of a page: a bare URL or a partial descriptor.
///
/// Fields not given here are inherited from the declaring entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AlternateInput {
    Url(String),
    Descriptor(AlternateDescriptor),
}

/// Partial descriptor for a translation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlternateDescriptor {
    pub url: Option<String>,
    pub modified: Option<Modified>,
    /// Overrides the language given by the `alternate` key.
    pub lang: Option<String>,
}

impl AlternateDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_modified(mut self, modified: impl Into<Modified>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Translations keyed by language tag, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alternates(Vec<(String, AlternateInput)>);

impl Alternates {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a translation. An existing tag keeps its position and gets the
    /// new value.
    pub fn insert(&mut self, tag: impl Into<String>, alt: impl Into<AlternateInput>) {
        let tag = tag.into();
        let alt = alt.into();
        match self.0.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, slot)) => *slot = alt,
            None => self.0.push((tag, alt)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AlternateInput)> {
        self.0.iter().map(|(tag, alt)| (tag.as_str(), alt))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AlternateInput>> FromIterator<(K, V)> for Alternates {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut alternates = Self::new();
        for (tag, alt) in iter {
            alternates.insert(tag, alt);
        }
        alternates
    }
}

impl<'de> Deserialize<'de> for Alternates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AlternatesVisitor;

        impl<'de> Visitor<'de> for AlternatesVisitor {
            type Value = Alternates;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language tags to alternates")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut alternates = Alternates::new();
                while let Some((tag, alt)) = map.next_entry::<String, AlternateInput>()? {
                    alternates.insert(tag, alt);
                }
                Ok(alternates)
            }
        }

        deserializer.deserialize_map(AlternatesVisitor)
    }
}

// ============================================================================
// Modified
// ============================================================================

/// Last-modified value: a timestamp, milliseconds since the epoch, or a date
/// string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Modified {
    #[serde(skip_deserializing)]
    Timestamp(DateTime<Utc>),
    Millis(f64),
    Text(String),
}

impl Modified {
    /// Convert to a UTC timestamp.
    ///
    /// Fails with [`SitemapError::InvalidDate`] carrying the original value.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let parsed = match self {
            Self::Timestamp(dt) => Some(*dt),
            Self::Millis(millis) => date::from_millis(*millis),
            Self::Text(text) => date::parse(text),
        };
        parsed.ok_or_else(|| SitemapError::InvalidDate {
            value: self.to_string(),
        })
    }
}

impl fmt::Display for Modified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(dt) => f.write_str(&date::to_iso_millis(dt)),
            Self::Millis(millis) => write!(f, "{millis}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<DateTime<Utc>> for Modified {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Timestamp(dt)
    }
}

impl From<i64> for Modified {
    #[allow(clippy::cast_precision_loss)] // Out-of-range values are rejected later
    fn from(millis: i64) -> Self {
        Self::Millis(millis as f64)
    }
}

impl From<f64> for Modified {
    fn from(millis: f64) -> Self {
        Self::Millis(millis)
    }
}

impl From<&str> for Modified {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Modified {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

// ============================================================================
// Normalized entry
// ============================================================================

/// Normalized record for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    /// Canonical absolute URL, the identity key.
    pub url: String,
    pub modified: Option<Modified>,
    /// Normalized BCP 47 tag.
    pub lang: Option<String>,
    pub alternate: Option<Alternates>,
}

impl Entry {
    /// Overwrite fields with those set in `newer`.
    ///
    /// Unset fields in `newer` leave the current value alone; `url` is the
    /// identity key and never changes.
    pub fn merge(&mut self, newer: Entry) {
        let Entry {
            url: _,
            modified,
            lang,
            alternate,
        } = newer;

        if modified.is_some() {
            self.modified = modified;
        }
        if lang.is_some() {
            self.lang = lang;
        }
        if alternate.is_some() {
            self.alternate = alternate;
        }
    }
}

impl EntryInput {
    /// Normalize into an [`Entry`] with a canonical URL.
    pub fn normalize(&self) -> Result<Entry> {
        match self {
            Self::Url(raw) => Ok(Entry {
                url: url::resolve(raw)?,
                ..Entry::default()
            }),
            Self::Descriptor(descriptor) => descriptor.normalize(),
        }
    }
}

impl Descriptor {
    pub fn normalize(&self) -> Result<Entry> {
        Ok(Entry {
            url: resolve_required(self.url.as_deref())?,
            modified: self.modified.clone(),
            lang: normalize_lang(self.lang.as_deref()),
            alternate: self.alternate.clone(),
        })
    }
}

impl AlternateInput {
    /// Normalize into an [`Entry`]; `lang` stays unset unless given
    /// explicitly.
    pub fn normalize(&self) -> Result<Entry> {
        match self {
            Self::Url(raw) => Ok(Entry {
                url: url::resolve(raw)?,
                ..Entry::default()
            }),
            Self::Descriptor(descriptor) => Ok(Entry {
                url: resolve_required(descriptor.url.as_deref())?,
                modified: descriptor.modified.clone(),
                lang: normalize_lang(descriptor.lang.as_deref()),
                alternate: None,
            }),
        }
    }
}

/// An empty tag counts as no tag.
fn normalize_lang(raw: Option<&str>) -> Option<String> {
    raw.map(lang::normalize).filter(|tag| !tag.is_empty())
}

fn resolve_required(raw: Option<&str>) -> Result<String> {
    raw.map_or_else(|| Err(SitemapError::missing_url()), url::resolve)
}

impl From<&str> for EntryInput {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for EntryInput {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Descriptor> for EntryInput {
    fn from(descriptor: Descriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<&str> for AlternateInput {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for AlternateInput {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<AlternateDescriptor> for AlternateInput {
    fn from(descriptor: AlternateDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_url() {
        let entry = EntryInput::from("https://example.com").normalize().unwrap();
        assert_eq!(entry.url, "https://example.com/");
        assert_eq!(entry.modified, None);
        assert_eq!(entry.lang, None);
        assert_eq!(entry.alternate, None);
    }

    #[test]
    fn test_normalize_descriptor() {
        let input: EntryInput = Descriptor::new("https://example.com/a")
            .with_lang("en_gb")
            .with_modified("2024-06-15")
            .with_alternate("nl", "https://example.nl/a")
            .into();
        let entry = input.normalize().unwrap();

        assert_eq!(entry.url, "https://example.com/a");
        assert_eq!(entry.lang.as_deref(), Some("en-GB"));
        assert_eq!(entry.modified, Some(Modified::from("2024-06-15")));
        assert_eq!(entry.alternate.as_ref().map(Alternates::len), Some(1));
    }

    #[test]
    fn test_normalize_does_not_mutate_input() {
        let input: EntryInput = Descriptor::new("https://example.com").with_lang("EN").into();
        let before = input.clone();
        input.normalize().unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_normalize_missing_url() {
        let input = EntryInput::Descriptor(Descriptor::default());
        let err = input.normalize().unwrap_err();
        assert!(matches!(err, SitemapError::InvalidUrl { input: None, .. }));
    }

    #[test]
    fn test_normalize_relative_url() {
        let err = EntryInput::from("example.com").normalize().unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_alternate_lang_stays_unset() {
        let entry = AlternateInput::from("https://example.nl").normalize().unwrap();
        assert_eq!(entry.url, "https://example.nl/");
        assert_eq!(entry.lang, None);

        let alt = AlternateDescriptor::new("https://example.nl").with_lang("NL-be");
        let entry = AlternateInput::from(alt).normalize().unwrap();
        assert_eq!(entry.lang.as_deref(), Some("nl-BE"));
    }

    #[test]
    fn test_empty_lang_is_unset() {
        let input: EntryInput = Descriptor::new("https://example.com").with_lang("").into();
        assert_eq!(input.normalize().unwrap().lang, None);

        let input: EntryInput = Descriptor::new("https://example.com").with_lang("  ").into();
        assert_eq!(input.normalize().unwrap().lang, None);

        let alt = AlternateDescriptor::new("https://example.nl").with_lang("");
        assert_eq!(AlternateInput::from(alt).normalize().unwrap().lang, None);
    }

    #[test]
    fn test_merge_only_set_fields() {
        let mut entry = Entry {
            url: "https://example.com/".to_string(),
            modified: Some(Modified::from("2020-01-01")),
            lang: Some("en".to_string()),
            alternate: None,
        };
        entry.merge(Entry {
            url: "https://example.com/".to_string(),
            modified: None,
            lang: Some("nl".to_string()),
            alternate: Some(Alternates::new()),
        });

        assert_eq!(entry.modified, Some(Modified::from("2020-01-01")));
        assert_eq!(entry.lang.as_deref(), Some("nl"));
        assert_eq!(entry.alternate, Some(Alternates::new()));
    }

    #[test]
    fn test_alternates_insert_replaces_in_place() {
        let mut alternates = Alternates::new();
        alternates.insert("nl", "https://example.nl");
        alternates.insert("fr", "https://example.fr");
        alternates.insert("nl", "https://example.be");

        let tags: Vec<&str> = alternates.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, ["nl", "fr"]);
        assert_eq!(
            alternates.iter().next().map(|(_, alt)| alt),
            Some(&AlternateInput::from("https://example.be"))
        );
    }

    #[test]
    fn test_modified_to_datetime() {
        let epoch = DateTime::from_timestamp_millis(0).unwrap();
        assert_eq!(Modified::from(epoch).to_datetime().unwrap(), epoch);
        assert_eq!(Modified::from(0_i64).to_datetime().unwrap(), epoch);
        assert_eq!(
            Modified::from("1970-01-01T00:00:00Z").to_datetime().unwrap(),
            epoch
        );
    }

    #[test]
    fn test_modified_invalid_reports_value() {
        let err = Modified::from("asd").to_datetime().unwrap_err();
        assert_eq!(err.to_string(), "Unexpected incorrect date `asd`");

        let err = Modified::from(f64::NAN).to_datetime().unwrap_err();
        assert!(matches!(err, SitemapError::InvalidDate { value } if value == "NaN"));
    }

    #[test]
    fn test_deserialize_mixed_items() {
        let items: Vec<EntryInput> = serde_json::from_str(
            r#"[
                "https://example.com",
                {"url": "https://example.com/a", "modified": 1234567890123, "lang": null},
                {"url": "https://example.com/b", "modified": "2024-06-15", "lang": "en",
                 "alternate": {"nl": "https://example.nl/b", "fr": {"url": "https://example.fr/b", "lang": "fr-CA"}}},
                {}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0], EntryInput::from("https://example.com"));

        let EntryInput::Descriptor(a) = &items[1] else {
            panic!("expected descriptor");
        };
        assert_eq!(a.modified, Some(Modified::Millis(1_234_567_890_123.0)));
        assert_eq!(a.lang, None);

        let EntryInput::Descriptor(b) = &items[2] else {
            panic!("expected descriptor");
        };
        let tags: Vec<&str> = b.alternate.as_ref().unwrap().iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, ["nl", "fr"]);

        assert_eq!(items[3], EntryInput::Descriptor(Descriptor::default()));
    }
}
