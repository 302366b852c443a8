//! Sitemap tree construction.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2011-10-05T14:48:00.000Z</lastmod>
//!     <xhtml:link rel="alternate" hreflang="en" href="https://example.com/"/>
//!     <xhtml:link rel="alternate" hreflang="nl" href="https://example.nl/"/>
//!   </url>
//! </urlset>
//! ```

use super::collect::{Collected, Record};
use crate::{
    error::Result,
    node::{Element, Node, Root},
    utils::date,
};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

const XML_DECLARATION: &str = r#"version="1.0" encoding="utf-8""#;

impl Collected {
    /// Build the document tree, one `<url>` per record in first-seen order.
    pub fn into_tree(self) -> Result<Root> {
        let urls = self
            .records
            .iter()
            .map(|record| self.url_element(record))
            .collect::<Result<Vec<_>>>()?;

        let mut urlset = Element::new("urlset").with_attr("xmlns", SITEMAP_NS);
        if self.i18n {
            urlset = urlset.with_attr("xmlns:xhtml", XHTML_NS);
        }

        Ok(Root::new(vec![
            Node::instruction("xml", XML_DECLARATION),
            urlset.with_children(urls).into(),
        ]))
    }

    fn url_element(&self, record: &Record) -> Result<Element> {
        let entry = &record.entry;
        let mut url = Element::new("url").with_child(Element::text("loc", &entry.url));

        if let Some(modified) = &entry.modified {
            let lastmod = date::to_iso_millis(&modified.to_datetime()?);
            url.push(Element::text("lastmod", lastmod));
        }

        if let Some(group) = record.group {
            for &member in &self.groups[group] {
                let member = &self.records[member].entry;
                url.push(
                    Element::new("xhtml:link")
                        .with_attr("rel", "alternate")
                        .with_attr_opt("hreflang", member.lang.as_deref())
                        .with_attr("href", &member.url),
                );
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Descriptor, EntryInput};

    fn tree(items: &[EntryInput]) -> Root {
        Collected::from_items(items).unwrap().into_tree().unwrap()
    }

    fn urlset(root: &Root) -> &Element {
        root.find("urlset").unwrap()
    }

    #[test]
    fn test_declaration_first() {
        let root = tree(&[]);
        assert_eq!(
            root.children[0],
            Node::instruction("xml", r#"version="1.0" encoding="utf-8""#)
        );
        assert!(urlset(&root).children.is_empty());
    }

    #[test]
    fn test_namespace_without_alternates() {
        let root = tree(&["https://example.com".into()]);
        let urlset = urlset(&root);
        assert_eq!(urlset.attributes.get("xmlns"), Some(SITEMAP_NS));
        assert!(!urlset.attributes.contains("xmlns:xhtml"));
    }

    #[test]
    fn test_namespace_with_alternates() {
        let root = tree(&[Descriptor::new("https://example.com")
            .with_lang("en")
            .with_alternate("nl", "https://example.nl")
            .into()]);
        assert_eq!(urlset(&root).attributes.get("xmlns:xhtml"), Some(XHTML_NS));
    }

    #[test]
    fn test_empty_alternate_map_sets_namespace() {
        let root = tree(&[Descriptor::new("https://example.com")
            .with_lang("en")
            .with_alternates(Default::default())
            .into()]);
        let urlset = urlset(&root);
        assert_eq!(urlset.attributes.get("xmlns:xhtml"), Some(XHTML_NS));

        // The entry still lists itself.
        let links: Vec<_> = urlset.children[0]
            .as_element()
            .unwrap()
            .find_all("xhtml:link")
            .collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attributes.get("hreflang"), Some("en"));
    }

    #[test]
    fn test_url_children_order() {
        let root = tree(&[Descriptor::new("https://example.com")
            .with_lang("en")
            .with_modified("2024-06-15")
            .with_alternate("nl", "https://example.nl")
            .into()]);

        let url = urlset(&root).children[0].as_element().unwrap();
        let names: Vec<&str> = url
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["loc", "lastmod", "xhtml:link", "xhtml:link"]);
    }

    #[test]
    fn test_link_attribute_order() {
        let root = tree(&[Descriptor::new("https://example.com")
            .with_lang("en")
            .with_alternate("nl", "https://example.nl")
            .into()]);

        let url = urlset(&root).children[0].as_element().unwrap();
        let link = url.find("xhtml:link").unwrap();
        let attrs: Vec<(&str, &str)> = link.attributes.iter().collect();
        assert_eq!(
            attrs,
            [
                ("rel", "alternate"),
                ("hreflang", "en"),
                ("href", "https://example.com/")
            ]
        );
    }

    #[test]
    fn test_member_without_lang_omits_hreflang() {
        let root = tree(&[
            "https://example.nl".into(),
            Descriptor::new("https://example.com")
                .with_lang("en")
                .with_alternate("nl", "https://example.nl")
                .into(),
        ]);

        let nl = urlset(&root).children[0].as_element().unwrap();
        let links: Vec<_> = nl.find_all("xhtml:link").collect();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].attributes.get("hreflang"), Some("en"));
        assert!(!links[1].attributes.contains("hreflang"));
        assert_eq!(links[1].attributes.get("href"), Some("https://example.nl/"));
    }

    #[test]
    fn test_invalid_modified_fails() {
        let items: [EntryInput; 1] = [Descriptor::new("https://example.com")
            .with_modified("asd")
            .into()];
        let collected = Collected::from_items(&items).unwrap();
        let err = collected.into_tree().unwrap_err();
        assert_eq!(err.to_string(), "Unexpected incorrect date `asd`");
    }
}
