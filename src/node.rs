//! XML document tree.
//!
//! A small, owned tree in the xast shape: a [`Root`] holding [`Node`]s,
//! where a node is an element, a text run, or a processing instruction.
//! Nodes serialize with serde into the xast JSON form:
//!
//! ```text
//! {"type": "root", "children": [...]}
//! {"type": "element", "name": "loc", "attributes": {}, "children": [...]}
//! {"type": "text", "value": "https://example.com/"}
//! {"type": "instruction", "name": "xml", "value": "version=\"1.0\""}
//! ```
//!
//! # Example
//!
//! ```
//! use tola_sitemap::node::{Element, Node};
//!
//! let url = Element::new("url").with_child(Element::text("loc", "https://example.com/"));
//! assert_eq!(url.children.len(), 1);
//! assert_eq!(url.find("loc").and_then(Element::text_content).as_deref(), Some("https://example.com/"));
//! ```

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "root")]
pub struct Root {
    pub children: Vec<Node>,
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// First element child with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        find_element(&self.children, name)
    }
}

/// A child node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { value: String },
    Instruction { name: String, value: String },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn instruction(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Instruction {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::default(),
            children: Vec::new(),
        }
    }

    /// Element whose only child is a text node: `<name>value</name>`.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name).with_child(Node::text(value))
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Set `key` only when `value` is present.
    pub fn with_attr_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_attr(key, value),
            None => self,
        }
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// First element child with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        find_element(&self.children, name)
    }

    /// All element children with the given name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(move |element| element.name == name)
    }

    /// Concatenated text of direct text children, `None` if there are none.
    pub fn text_content(&self) -> Option<String> {
        let mut texts = self.children.iter().filter_map(|child| match child {
            Node::Text { value } => Some(value.as_str()),
            _ => None,
        });
        let first = texts.next()?;
        Some(texts.fold(first.to_string(), |acc, text| acc + text))
    }
}

/// Element attributes in insertion order.
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn find_element<'a>(children: &'a [Node], name: &str) -> Option<&'a Element> {
    children
        .iter()
        .filter_map(Node::as_element)
        .find(|element| element.name == name)
}
