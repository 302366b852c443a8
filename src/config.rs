//! Sitemap configuration.
//!
//! Entries can be declared in the `[sitemap]` section of a TOML document:
//!
//! ```toml
//! [sitemap]
//! enable = true
//!
//! [[sitemap.entries]]
//! url = "https://example.com"
//! lang = "en"
//! modified = "2024-06-15"
//! alternate = { nl = "https://example.nl" }
//! ```
//!
//! or as a bare JSON array of items. Both are parsed from in-memory text.

use serde::Deserialize;
use thiserror::Error;

use crate::{
    entry::EntryInput,
    error::SitemapError,
    log,
    node::Root,
    sitemap::sitemap,
};

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Entry list parsing error")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sitemap(#[from] SitemapError),
}

// ============================================================================
// SitemapConfig
// ============================================================================

/// `[sitemap]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    pub enable: bool,
    /// Items to build the sitemap from.
    pub entries: Vec<EntryInput>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            entries: Vec::new(),
        }
    }
}

/// Document root holding the `[sitemap]` section; other sections are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    sitemap: SitemapConfig,
}

impl SitemapConfig {
    /// Read the `[sitemap]` section of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.sitemap)
    }

    /// Read a JSON array of items.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let entries = serde_json::from_str(content)?;
        Ok(Self {
            enable: true,
            entries,
        })
    }

    /// Build the sitemap tree, or `None` when disabled.
    pub fn build(&self) -> Result<Option<Root>, ConfigError> {
        if !self.enable {
            log!("sitemap"; "disabled, skipping {} entries", self.entries.len());
            return Ok(None);
        }
        Ok(Some(sitemap(&self.entries)?))
    }
}
