//! Sitemap generation.
//!
//! Turns a list of page descriptions into a sitemaps.org document tree with
//! hreflang alternates.
//!
//! Two passes:
//!
//! 1. [`collect`]: normalize each item and fold it into the URL table and
//!    the alternate groups
//! 2. [`tree`]: emit one `<url>` per distinct URL, in first-seen order
//!
//! The call is all-or-nothing: any invalid URL, missing language, or
//! invalid date aborts it.

pub mod collect;
pub mod tree;


pub use collect::{Collected, GroupId, Record, RecordId};
pub use tree::{SITEMAP_NS, XHTML_NS};

use crate::{debug, entry::EntryInput, error::Result, node::Root};

/// Build a sitemap tree.
///
/// An empty slice yields a root with an empty `<urlset>`.
///
/// # Example
///
/// ```
/// use tola_sitemap::{Descriptor, EntryInput, sitemap};
///
/// let items: Vec<EntryInput> = vec![
///     "https://example.com/about".into(),
///     Descriptor::new("https://example.com")
///         .with_lang("en")
///         .with_alternate("nl", "https://example.nl")
///         .into(),
/// ];
/// let root = sitemap(&items)?;
/// let urlset = root.find("urlset").unwrap();
/// assert_eq!(urlset.children.len(), 3);
/// # Ok::<(), tola_sitemap::SitemapError>(())
/// ```
pub fn sitemap(data: &[EntryInput]) -> Result<Root> {
    let collected = Collected::from_items(data)?;

    debug!(
        "sitemap";
        "{} items, {} urls, {} groups{}",
        data.len(),
        collected.records.len(),
        collected.groups.len(),
        if collected.i18n { ", i18n" } else { "" }
    );

    collected.into_tree()
}
