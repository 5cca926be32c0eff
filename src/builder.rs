//! Loosely-typed construction helpers
//!
//! The ergonomic way to build trees: pass strings, elements, and
//! existing content freely intermixed, and get back canonical model
//! values. Inputs are normalized (adjacent text merged, spliced content
//! flattened) and validated; misuse surfaces as Shape errors.

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::model::{Content, Element, Node};
use crate::validator;

/// One construction input: a piece of text, a child element, or an
/// existing content value to splice in.
#[derive(Clone, Debug)]
pub enum Item {
    Text(String),
    Element(Element),
    Content(Content),
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Element> for Item {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

impl From<Content> for Item {
    fn from(c: Content) -> Self {
        Self::Content(c)
    }
}

/// Build a [`Content`] from items concatenated in argument order.
pub fn content<I>(items: I) -> Result<Content>
where
    I: IntoIterator,
    I::Item: Into<Item>,
{
    let mut twine: Vec<Node> = vec![Node::Text(String::new())];

    for item in items {
        match item.into() {
            Item::Text(s) => {
                validator::check_char_data(&s)?;
                append_text(&mut twine, &s);
            }
            Item::Element(e) => twine.push(Node::Child(e)),
            Item::Content(c) => {
                for node in c.into_twine() {
                    match node {
                        Node::Text(s) => append_text(&mut twine, &s),
                        Node::Child(e) => twine.push(Node::Child(e)),
                    }
                }
            }
        }
        // A child entry must be followed by a text entry before the
        // twine is handed over.
        if matches!(twine.last(), Some(Node::Child(_))) {
            twine.push(Node::Text(String::new()));
        }
    }

    Content::from_twine(twine)
}

/// Build an [`Element`] from a type name, attribute pairs, and content
/// items. Duplicate attribute names are rejected.
pub fn element<A, K, V, I>(name: impl Into<String>, attributes: A, items: I) -> Result<Element>
where
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator,
    I::Item: Into<Item>,
{
    let mut map = IndexMap::new();
    for (key, value) in attributes {
        let key = key.into();
        if map.contains_key(&key) {
            return Err(Error::shape(ErrorKind::DuplicateKey { name: key }));
        }
        map.insert(key, value.into());
    }
    Element::new(name, map, content(items)?)
}

fn append_text(twine: &mut Vec<Node>, s: &str) {
    match twine.last_mut() {
        Some(Node::Text(tail)) => tail.push_str(s),
        _ => twine.push(Node::Text(s.to_string())),
    }
}

/// Attribute iterator for "no attributes", sidestepping type-inference
/// noise at call sites.
pub const NO_ATTRS: [(&str, &str); 0] = [];
