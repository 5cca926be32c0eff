//! Immutable XML tree model
//!
//! Two entity kinds: [`Content`], an alternating sequence of character
//! data and child elements (the "twine"), and [`Element`], a name plus
//! attributes plus content. Fields are private and every constructor
//! validates, so a value of either type is well formed by construction
//! and may be shared freely; transformation means building a new value.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::validator;

/// One twine entry: a run of character data or a child element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Text(String),
    Child(Element),
}

impl Node {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Child(_) => None,
        }
    }

    pub fn as_child(&self) -> Option<&Element> {
        match self {
            Self::Child(e) => Some(e),
            Self::Text(_) => None,
        }
    }
}

/// A chunk of XML content in canonical twine form.
///
/// The twine has odd length `2n + 1`: even indices hold character-data
/// strings (any of which may be empty), odd indices hold child elements.
/// Stored strings are literal text, post reference resolution and post
/// line-ending canonicalization; encoding of `<`, `&`, and `]]>` is the
/// serializer's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Node>", into = "Vec<Node>"))]
pub struct Content {
    twine: Vec<Node>,
}

impl Content {
    /// The canonical empty content, twine `[""]`.
    pub fn empty() -> Self {
        Self {
            twine: vec![Node::Text(String::new())],
        }
    }

    /// Build content from an already-alternating twine.
    ///
    /// Fails with a shape error unless the sequence has odd length,
    /// strictly alternates text and child entries starting and ending
    /// with text, and every text entry is a valid character-data string.
    pub fn from_twine(twine: Vec<Node>) -> Result<Self> {
        validator::check_twine(&twine)?;
        Ok(Self { twine })
    }

    /// Constructor for twines assembled by the parser, which validates
    /// inline as it reads.
    pub(crate) fn from_parts(twine: Vec<Node>) -> Self {
        debug_assert!(validator::check_twine(&twine).is_ok());
        Self { twine }
    }

    /// The underlying twine.
    pub fn twine(&self) -> &[Node] {
        &self.twine
    }

    /// Iterate over twine entries.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.twine.iter()
    }

    /// Iterate over child elements only.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.twine.iter().filter_map(Node::as_child)
    }

    /// True exactly for the canonical empty content `[""]`.
    pub fn is_empty(&self) -> bool {
        matches!(self.twine.as_slice(), [Node::Text(s)] if s.is_empty())
    }

    /// Concatenation of all character-data entries, ignoring children.
    pub fn text(&self) -> String {
        self.twine
            .iter()
            .filter_map(Node::as_text)
            .collect::<String>()
    }

    pub(crate) fn into_twine(self) -> Vec<Node> {
        self.twine
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Node>> for Content {
    type Error = Error;

    fn try_from(twine: Vec<Node>) -> Result<Self> {
        Self::from_twine(twine)
    }
}

impl From<Content> for Vec<Node> {
    fn from(content: Content) -> Self {
        content.twine
    }
}

/// One XML element: type name, attribute map, content.
///
/// Attribute iteration order is insertion order but carries no meaning;
/// the serializer emits attributes sorted by name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawElement", into = "RawElement"))]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    content: Content,
}

// Deserialization funnels through the validating constructor; a raw
// shadow struct keeps the derive from bypassing the invariants.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawElement {
    name: String,
    #[serde(default)]
    attributes: IndexMap<String, String>,
    #[serde(default)]
    content: Content,
}

#[cfg(feature = "serde")]
impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        Self {
            name: element.name,
            attributes: element.attributes,
            content: element.content,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawElement> for Element {
    type Error = Error;

    fn try_from(raw: RawElement) -> Result<Self> {
        Self::new(raw.name, raw.attributes, raw.content)
    }
}

impl Element {
    /// Build an element, validating the name and every attribute.
    pub fn new(
        name: impl Into<String>,
        attributes: IndexMap<String, String>,
        content: Content,
    ) -> Result<Self> {
        let name = name.into();
        validator::check_name(&name)?;
        validator::check_attributes(&attributes)?;
        Ok(Self {
            name,
            attributes,
            content,
        })
    }

    /// An element with no attributes and empty content.
    pub fn empty(name: impl Into<String>) -> Result<Self> {
        Self::new(name, IndexMap::new(), Content::empty())
    }

    /// Constructor for values whose parts were already validated
    /// (used by the parser, which checks inline as it reads).
    pub(crate) fn from_parts(
        name: String,
        attributes: IndexMap<String, String>,
        content: Content,
    ) -> Self {
        debug_assert!(crate::grammar::is_name(&name));
        Self {
            name,
            attributes,
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Look up one attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn content(&self) -> &Content {
        &self.content
    }
}
