//! Shape assertions for candidate tree-model values
//!
//! Consumed by the model constructors and the builder, never by the
//! parser's inner loop (the parser checks inline for error locality).
//! The predicate forms live in [`crate::grammar`]; the assertions here
//! succeed silently or fail with a Shape-classified error naming the
//! check that failed.

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::grammar;
use crate::model::Node;

/// Assert that `s` satisfies the Name production.
pub fn check_name(s: &str) -> Result<()> {
    if grammar::is_name(s) {
        Ok(())
    } else {
        Err(Error::shape(ErrorKind::InvalidName {
            value: s.to_string(),
        }))
    }
}

/// Assert that `s` is a storable character-data string.
///
/// Stored text is post-reference-resolution, so literal `<`, `&`, and
/// `]]>` are fine here (escaping them back is the serializer's job);
/// only the acceptable-character class is enforced.
pub fn check_char_data(s: &str) -> Result<()> {
    if s.chars().all(grammar::is_xml_char) {
        Ok(())
    } else {
        Err(Error::shape(ErrorKind::InvalidCharData))
    }
}

/// Assert that every attribute key is a Name and every value is a valid
/// character-data string. Key uniqueness is the map's own invariant.
pub fn check_attributes(attributes: &IndexMap<String, String>) -> Result<()> {
    for (name, value) in attributes {
        if !grammar::is_name(name) || !attribute_value_ok(value) {
            return Err(Error::shape(ErrorKind::InvalidAttribute {
                name: name.clone(),
            }));
        }
    }
    Ok(())
}

/// Assert that `twine` is a canonical content twine: odd length, strict
/// text/child alternation starting and ending with text, every text
/// entry a valid character-data string.
pub fn check_twine(twine: &[Node]) -> Result<()> {
    if twine.len() % 2 == 0 {
        return Err(Error::shape(ErrorKind::InvalidTwine));
    }
    for (index, node) in twine.iter().enumerate() {
        match node {
            Node::Text(s) if index % 2 == 0 => check_char_data(s)?,
            Node::Child(_) if index % 2 == 1 => {}
            _ => return Err(Error::shape(ErrorKind::InvalidTwine)),
        }
    }
    Ok(())
}

/// Assert that `s` names an encoding per the EncName production.
pub fn check_encoding_name(s: &str) -> Result<()> {
    if grammar::is_encoding_name(s) {
        Ok(())
    } else {
        Err(Error::shape(ErrorKind::InvalidEncodingName {
            value: s.to_string(),
        }))
    }
}

// Attribute values are stored post-decoding too; only the character
// class matters.
fn attribute_value_ok(value: &str) -> bool {
    value.chars().all(grammar::is_xml_char)
}
