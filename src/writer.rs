//! XML serializer
//!
//! Mirror operations for the parser's entry points. Output is a total,
//! deterministic function of the tree: attributes are emitted sorted by
//! name (codepoint order), escaping is fixed, the attribute delimiter
//! is always `"`, and canonical-empty content collapses to the
//! self-closing tag form. Serializing the same tree twice yields
//! byte-identical text.
//!
//! Tree values are valid by construction (the model's constructors
//! validate and its fields are private), so content and element
//! serialization cannot fail; only the synthesized declarations can,
//! on a caller-supplied encoding name.

use std::fmt::Write;

use crate::error::Result;
use crate::model::{Content, Element, Node};
use crate::validator;

/// Serialize a content value, no declarations.
pub fn write_content(content: &Content) -> String {
    let mut out = String::new();
    push_content(&mut out, content);
    out
}

/// Serialize a single element, no declarations.
pub fn write_element(element: &Element) -> String {
    let mut out = String::new();
    push_element(&mut out, element);
    out
}

/// Serialize a full document: synthesized XML declaration (version 1.0,
/// optional encoding, `standalone="yes"`) followed by the root element.
pub fn write_document(root: &Element, encoding: Option<&str>) -> Result<String> {
    let mut out = String::from("<?xml version=\"1.0\"");
    if let Some(name) = encoding {
        validator::check_encoding_name(name)?;
        let _ = write!(out, " encoding=\"{name}\"");
    }
    out.push_str(" standalone=\"yes\"?>");
    push_element(&mut out, root);
    Ok(out)
}

/// Serialize an external parsed entity: a text declaration is
/// synthesized only when an encoding is given.
pub fn write_external_entity(content: &Content, encoding: Option<&str>) -> Result<String> {
    let mut out = String::new();
    if let Some(name) = encoding {
        validator::check_encoding_name(name)?;
        let _ = write!(out, "<?xml version=\"1.0\" encoding=\"{name}\"?>");
    }
    push_content(&mut out, content);
    Ok(out)
}

fn push_content(out: &mut String, content: &Content) {
    for node in content.nodes() {
        match node {
            Node::Text(text) => push_char_data(out, text),
            Node::Child(child) => push_element(out, child),
        }
    }
}

fn push_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.name());

    let mut attributes: Vec<_> = element.attributes().iter().collect();
    attributes.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        push_attribute_value(out, value);
        out.push('"');
    }

    if element.content().is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        push_content(out, element.content());
        out.push_str("</");
        out.push_str(element.name());
        out.push('>');
    }
}

// Character-data context: CR, '<', and '&' always escape; '>' escapes
// when it immediately follows "]]", so the literal sequence ']]>' can
// never appear in output text.
fn push_char_data(out: &mut String, text: &str) {
    let mut prev = ['\0', '\0'];
    for ch in text.chars() {
        match ch {
            '\r' | '<' | '&' => push_char_ref(out, ch),
            '>' if prev == [']', ']'] => push_char_ref(out, ch),
            _ => out.push(ch),
        }
        prev = [prev[1], ch];
    }
}

// Attribute-value context additionally escapes tab, LF, and the quote
// character; the delimiter is fixed at '"'.
fn push_attribute_value(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\t' | '\n' | '\r' | '<' | '&' | '"' => push_char_ref(out, ch),
            _ => out.push(ch),
        }
    }
}

fn push_char_ref(out: &mut String, ch: char) {
    let _ = write!(out, "&#x{:X};", u32::from(ch));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{content, element, Item, NO_ATTRS};
    use crate::parser::Parser;

    #[test]
    fn test_write_empty_element_self_closes() -> Result<()> {
        let e = Element::empty("a")?;
        assert_eq!(write_element(&e), "<a/>");
        Ok(())
    }

    #[test]
    fn test_write_mixed_content() -> Result<()> {
        let b = Element::empty("b")?;
        let div = element("div", NO_ATTRS, [Item::from("x"), Item::from(b), Item::from("y")])?;
        assert_eq!(write_element(&div), "<div>x<b/>y</div>");
        Ok(())
    }

    #[test]
    fn test_attributes_sorted_by_name() -> Result<()> {
        let e1 = element("e", [("b", "2"), ("a", "1")], Vec::<Item>::new())?;
        let e2 = element("e", [("a", "1"), ("b", "2")], Vec::<Item>::new())?;
        assert_eq!(write_element(&e1), "<e a=\"1\" b=\"2\"/>");
        assert_eq!(write_element(&e1), write_element(&e2));
        Ok(())
    }

    #[test]
    fn test_char_data_escaping() -> Result<()> {
        let c = content(["a<b&c\rd"])?;
        assert_eq!(write_content(&c), "a&#x3C;b&#x26;c&#xD;d");
        Ok(())
    }

    #[test]
    fn test_gt_escaped_only_after_double_bracket() -> Result<()> {
        let c = content(["x>y"])?;
        assert_eq!(write_content(&c), "x>y");
        let c = content(["a]]>"])?;
        assert_eq!(write_content(&c), "a]]&#x3E;");
        Ok(())
    }

    #[test]
    fn test_attribute_escaping() -> Result<()> {
        let e = element("a", [("x", "q\"w\t\ne<&")], Vec::<Item>::new())?;
        assert_eq!(
            write_element(&e),
            "<a x=\"q&#x22;w&#x9;&#xA;e&#x3C;&#x26;\"/>"
        );
        Ok(())
    }

    #[test]
    fn test_write_document_declarations() -> Result<()> {
        let root = Element::empty("r")?;
        assert_eq!(
            write_document(&root, None)?,
            "<?xml version=\"1.0\" standalone=\"yes\"?><r/>"
        );
        assert_eq!(
            write_document(&root, Some("UTF-8"))?,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?><r/>"
        );
        assert!(write_document(&root, Some("not an encoding")).is_err());
        Ok(())
    }

    #[test]
    fn test_write_external_entity_declaration_only_with_encoding() -> Result<()> {
        let c = content(["x"])?;
        assert_eq!(write_external_entity(&c, None)?, "x");
        assert_eq!(
            write_external_entity(&c, Some("UTF-8"))?,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>x"
        );
        Ok(())
    }

    #[test]
    fn test_serialization_is_idempotent() -> Result<()> {
        let e = element(
            "r",
            [("z", "1"), ("a", "2")],
            [Item::from("t<"), Item::from(Element::empty("c")?)],
        )?;
        assert_eq!(write_element(&e), write_element(&e));
        Ok(())
    }

    #[test]
    fn test_written_output_reparses_equal() -> Result<()> {
        let e = element(
            "r",
            [("a", "v&w")],
            [Item::from("x\ny"), Item::from(Element::empty("c")?), Item::from("]] >")],
        )?;
        let text = write_element(&e);
        let reparsed = Parser::new(&text).parse_element_input()?;
        assert_eq!(reparsed, e);
        Ok(())
    }
}
