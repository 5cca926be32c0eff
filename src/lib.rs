//! twine-xml - Strict XML 1.0 parser and serializer
//!
//! A data-interchange XML codec over an immutable document tree: text
//! parses into [`Content`] and [`Element`] values, trees serialize back
//! to deterministic text. Markup-oriented XML is deliberately out of
//! scope: no DTDs, no schemas, no entity declarations beyond the five
//! predefined ones, no namespace semantics (names are opaque strings),
//! no streaming.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> twine_xml::Result<()> {
//! let e = twine_xml::read_element("<a href=\"#there\">there</a>")?;
//! assert_eq!(e.name(), "a");
//! assert_eq!(e.attribute("href"), Some("#there"));
//! assert_eq!(e.content().text(), "there");
//! assert_eq!(twine_xml::write_element(&e), "<a href=\"#there\">there</a>");
//! # Ok(())
//! # }
//! ```
//!
//! Trees are immutable after construction and freely shareable across
//! threads; every failure is classified as a syntax error, a
//! well-formedness-constraint violation, or an invalid caller-supplied
//! value (see [`ErrorClass`]), and parsing is all-or-nothing.

#![forbid(unsafe_code)]

use tracing::{debug, instrument};

pub mod error;
pub use error::{Error, ErrorClass, ErrorKind, Pos, Result};

pub mod cursor;

pub mod grammar;
pub mod validator;

pub mod model;
pub use model::{Content, Element, Node};

pub mod builder;
pub use builder::{content, element, Item, NO_ATTRS};

pub mod parser;
pub use parser::Parser;

pub mod writer;

/// Parse a content fragment
#[instrument(skip(text), fields(len = text.len()))]
pub fn read_content(text: &str) -> Result<Content> {
    debug!("parsing content fragment");
    Parser::new(text).parse_content_input()
}

/// Parse a single element; the full input must be consumed
#[instrument(skip(text), fields(len = text.len()))]
pub fn read_element(text: &str) -> Result<Element> {
    debug!("parsing element");
    Parser::new(text).parse_element_input()
}

/// Parse a full document (no DOCTYPE) and return its root element
#[instrument(skip(text), fields(len = text.len()))]
pub fn read_document(text: &str) -> Result<Element> {
    debug!("parsing document");
    Parser::new(text).parse_document()
}

/// Parse an external parsed entity
#[instrument(skip(text), fields(len = text.len()))]
pub fn read_external_entity(text: &str) -> Result<Content> {
    debug!("parsing external parsed entity");
    Parser::new(text).parse_external_entity()
}

/// Serialize a content value
pub fn write_content(content: &Content) -> String {
    writer::write_content(content)
}

/// Serialize a single element
pub fn write_element(element: &Element) -> String {
    writer::write_element(element)
}

/// Serialize a full document with a synthesized XML declaration
pub fn write_document(root: &Element, encoding: Option<&str>) -> Result<String> {
    writer::write_document(root, encoding)
}

/// Serialize an external parsed entity, synthesizing a text declaration
/// when an encoding name is given
pub fn write_external_entity(content: &Content, encoding: Option<&str>) -> Result<String> {
    writer::write_external_entity(content, encoding)
}
