//! Build sitemaps.org document trees with hreflang alternates.
//!
//! Takes page descriptions (URL, last-modified time, language, translations)
//! and returns an XML document tree. Pages that are translations of each
//! other are grouped transitively and each lists the whole group as
//! `<xhtml:link rel="alternate">`.
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── entry      # Input items and normalized entries
//! ├── sitemap/   # Aggregation and tree building
//! │   ├── collect
//! │   └── tree
//! ├── node       # XML document tree
//! ├── config     # [sitemap] section, TOML/JSON input
//! ├── error      # SitemapError
//! ├── logger     # log!/debug! macros
//! └── utils/     # url, lang, date collaborators
//! ```
//!
//! # Example
//!
//! ```
//! use tola_sitemap::{Descriptor, sitemap};
//!
//! let root = sitemap(&[
//!     Descriptor::new("https://example.com")
//!         .with_lang("en")
//!         .with_modified("2024-06-15")
//!         .with_alternate("nl", "https://example.nl")
//!         .into(),
//! ])?;
//!
//! let urlset = root.find("urlset").unwrap();
//! assert_eq!(urlset.attributes.get("xmlns:xhtml"), Some(tola_sitemap::XHTML_NS));
//! assert_eq!(urlset.children.len(), 2);
//! # Ok::<(), tola_sitemap::SitemapError>(())
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod logger;
pub mod node;
pub mod sitemap;
pub mod utils;

pub use config::{ConfigError, SitemapConfig};
pub use entry::{
    AlternateDescriptor, AlternateInput, Alternates, Descriptor, Entry, EntryInput, Modified,
};
pub use error::{Result, SitemapError};
pub use logger::set_verbose;
pub use node::{Element, Node, Root};
pub use sitemap::{SITEMAP_NS, XHTML_NS, sitemap};
