//! Recursive-descent XML parser
//!
//! One shared cursor into the whole input, committed parsing across
//! element boundaries (once a start-tag matches, a matching end-tag is
//! required), bounded local alternatives only (quote choice, reference
//! form). Four entry points, one per supported top-level production;
//! each consumes the entire input or fails at the first violation with
//! a positioned, classified error. No partial trees.
//!
//! Well-formedness constraints that regular patterns cannot express are
//! enforced inline: tag-name matching, attribute uniqueness, reference
//! resolvability, character references landing inside the acceptable
//! character class.

use indexmap::IndexMap;

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind, Result};
use crate::grammar;
use crate::model::{Content, Element, Node};

// Which declaration flavor heads the input: the XML declaration
// (version mandatory) or an external entity's text declaration
// (encoding mandatory, version optional).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeclKind {
    Xml,
    Text,
}

#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Parse a full document: optional XML declaration, misc, exactly
    /// one root element, misc. Document type declarations are rejected.
    pub fn parse_document(&mut self) -> Result<Element> {
        if self.at_xml_declaration() {
            self.parse_declaration(DeclKind::Xml)?;
        }
        self.skip_misc()?;
        if !self.cursor.starts_with("<") || self.cursor.starts_with("</") {
            return Err(self.err_expected("root element"));
        }
        let root = self.parse_element()?;
        self.skip_misc()?;
        self.expect_eof()?;
        Ok(root)
    }

    /// Parse a standalone element; the full input must be consumed.
    pub fn parse_element_input(&mut self) -> Result<Element> {
        if !self.cursor.starts_with("<") || self.cursor.starts_with("</") {
            return Err(self.err_expected("element"));
        }
        let element = self.parse_element()?;
        self.expect_eof()?;
        Ok(element)
    }

    /// Parse a standalone content fragment.
    pub fn parse_content_input(&mut self) -> Result<Content> {
        let content = self.parse_content()?;
        self.expect_eof()?;
        Ok(content)
    }

    /// Parse an external parsed entity: optional text declaration
    /// followed by content, no element wrapper required.
    pub fn parse_external_entity(&mut self) -> Result<Content> {
        if self.at_xml_declaration() {
            self.parse_declaration(DeclKind::Text)?;
        }
        let content = self.parse_content()?;
        self.expect_eof()?;
        Ok(content)
    }

    // element ::= EmptyElemTag | STag content ETag
    fn parse_element(&mut self) -> Result<Element> {
        self.expect_char('<')?;
        let name = self.parse_name()?;
        let mut attributes = IndexMap::new();

        loop {
            let had_space = self.skip_space() > 0;
            match self.cursor.current() {
                Some('/') => {
                    self.cursor.advance();
                    self.expect_char('>')?;
                    return Ok(Element::from_parts(name, attributes, Content::empty()));
                }
                Some('>') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) if had_space => {
                    let attr_pos = self.cursor.position();
                    let attr_name = self.parse_name()?;
                    self.skip_space();
                    self.expect_char('=')?;
                    self.skip_space();
                    let value = self.parse_attribute_value()?;
                    if attributes.contains_key(&attr_name) {
                        return Err(Error::new(
                            ErrorKind::DuplicateAttribute { name: attr_name },
                            attr_pos,
                        ));
                    }
                    attributes.insert(attr_name, value);
                }
                Some(_) => return Err(self.err_expected("whitespace, '/>' or '>'")),
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
            }
        }

        let content = self.parse_content()?;

        if self.cursor.is_eof() {
            return Err(self.error(ErrorKind::UnexpectedEnd));
        }
        let end_pos = self.cursor.position();
        self.cursor.eat_str("</");
        let end_name = self.parse_name()?;
        if end_name != name {
            return Err(Error::new(
                ErrorKind::MismatchedTag {
                    start: name,
                    end: end_name,
                },
                end_pos,
            ));
        }
        self.skip_space();
        self.expect_char('>')?;

        Ok(Element::from_parts(name, attributes, content))
    }

    // content ::= CharData? ((element | Reference | CDSect | PI
    //             | Comment) CharData?)*
    //
    // Ends at an end-tag (not consumed) or end of input. Character
    // data, decoded references, and CDATA all accumulate into one
    // maximal text run per twine slot.
    fn parse_content(&mut self) -> Result<Content> {
        let mut twine: Vec<Node> = Vec::new();
        let mut text = String::new();

        loop {
            if self.cursor.is_eof() || self.cursor.starts_with("</") {
                break;
            }
            if self.cursor.starts_with("<!--") {
                self.parse_comment()?;
            } else if self.cursor.starts_with("<![CDATA[") {
                self.parse_cdata(&mut text)?;
            } else if self.cursor.starts_with("<!DOCTYPE") {
                return Err(self.error(ErrorKind::DoctypeUnsupported));
            } else if self.cursor.starts_with("<?") {
                self.parse_pi()?;
            } else if self.cursor.starts_with("<!") {
                return Err(self.err_expected("comment or CDATA section"));
            } else if self.cursor.current() == Some('<') {
                twine.push(Node::Text(std::mem::take(&mut text)));
                let child = self.parse_element()?;
                twine.push(Node::Child(child));
            } else if self.cursor.current() == Some('&') {
                text.push(self.parse_reference()?);
            } else {
                self.parse_char_data(&mut text)?;
            }
        }

        twine.push(Node::Text(text));
        Ok(Content::from_parts(twine))
    }

    // A maximal run of literal characters up to the next '<' or '&'.
    // CRLF and lone CR collapse to LF before storage; a literal ']]>'
    // is rejected here, outside CDATA.
    fn parse_char_data(&mut self, text: &mut String) -> Result<()> {
        while let Some(ch) = self.cursor.current() {
            match ch {
                '<' | '&' => break,
                ']' if self.cursor.starts_with("]]>") => {
                    return Err(self.error(ErrorKind::CdataEndInText));
                }
                '\r' => {
                    self.cursor.advance();
                    self.cursor.eat('\n');
                    text.push('\n');
                }
                _ if grammar::is_xml_char(ch) => {
                    self.cursor.advance();
                    text.push(ch);
                }
                _ => return Err(self.error(ErrorKind::IllegalChar { ch })),
            }
        }
        Ok(())
    }

    // CDSect ::= '<![CDATA[' (Char* - (Char* ']]>' Char*)) ']]>'
    //
    // Contributes literal, line-ending-canonicalized characters into
    // the surrounding run; no separate twine entry.
    fn parse_cdata(&mut self, text: &mut String) -> Result<()> {
        self.cursor.eat_str("<![CDATA[");
        loop {
            if self.cursor.eat_str("]]>") {
                return Ok(());
            }
            match self.cursor.current() {
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
                Some('\r') => {
                    self.cursor.advance();
                    self.cursor.eat('\n');
                    text.push('\n');
                }
                Some(ch) if grammar::is_xml_char(ch) => {
                    self.cursor.advance();
                    text.push(ch);
                }
                Some(ch) => return Err(self.error(ErrorKind::IllegalChar { ch })),
            }
        }
    }

    // Reference ::= EntityRef | CharRef. Only the five predefined
    // entities resolve; a character reference must land inside the
    // acceptable character class.
    fn parse_reference(&mut self) -> Result<char> {
        let start = self.cursor.position();
        self.cursor.eat('&');

        if self.cursor.eat('#') {
            let radix: u32 = if self.cursor.eat('x') { 16 } else { 10 };
            let digits_start = self.cursor.pos();
            while self
                .cursor
                .current()
                .is_some_and(|ch| ch.is_digit(radix))
            {
                self.cursor.advance();
            }
            let digits = self.cursor.slice_from(digits_start);
            if digits.is_empty() || !self.cursor.eat(';') {
                return Err(Error::new(ErrorKind::InvalidReference, start));
            }
            let value = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
            return match char::from_u32(value) {
                Some(ch) if grammar::is_xml_char(ch) => Ok(ch),
                _ => Err(Error::new(ErrorKind::CharRefOutOfRange { value }, start)),
            };
        }

        let name_start = self.cursor.pos();
        while self.cursor.current().is_some_and(grammar::is_name_char) {
            self.cursor.advance();
        }
        let name = self.cursor.slice_from(name_start);
        if name.is_empty() || !self.cursor.eat(';') {
            return Err(Error::new(ErrorKind::InvalidReference, start));
        }
        grammar::predefined_entity(name).ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownEntity {
                    name: name.to_string(),
                },
                start,
            )
        })
    }

    // AttValue ::= '"' ([^<&"] | Reference)* '"'
    //            | "'" ([^<&'] | Reference)* "'"
    //
    // Same reference decoding and line-ending canonicalization as
    // character data; ']]>' is not restricted here but a bare '<' is.
    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.err_expected("quoted attribute value")),
        };
        self.cursor.advance();

        let mut value = String::new();
        loop {
            match self.cursor.current() {
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
                Some(ch) if ch == quote => {
                    self.cursor.advance();
                    return Ok(value);
                }
                Some('<') => return Err(self.error(ErrorKind::BareLessThan)),
                Some('&') => value.push(self.parse_reference()?),
                Some('\r') => {
                    self.cursor.advance();
                    self.cursor.eat('\n');
                    value.push('\n');
                }
                Some(ch) if grammar::is_xml_char(ch) => {
                    self.cursor.advance();
                    value.push(ch);
                }
                Some(ch) => return Err(self.error(ErrorKind::IllegalChar { ch })),
            }
        }
    }

    // Comment ::= '<!--' ((Char - '-') | ('-' (Char - '-')))* '-->'
    fn parse_comment(&mut self) -> Result<()> {
        self.cursor.eat_str("<!--");
        loop {
            if self.cursor.eat_str("-->") {
                return Ok(());
            }
            if self.cursor.starts_with("--") {
                return Err(self.err_expected("'-->'"));
            }
            match self.cursor.current() {
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
                Some(ch) if grammar::is_xml_char(ch) => self.cursor.advance(),
                Some(ch) => return Err(self.error(ErrorKind::IllegalChar { ch })),
            }
        }
    }

    // PI ::= '<?' PITarget (S (Char* - (Char* '?>' Char*)))? '?>'
    fn parse_pi(&mut self) -> Result<()> {
        let target_pos = {
            self.cursor.eat_str("<?");
            self.cursor.position()
        };
        let target = self.parse_name()?;
        if !grammar::is_pi_target(&target) {
            return Err(Error::new(ErrorKind::ReservedPiTarget { target }, target_pos));
        }
        if self.cursor.eat_str("?>") {
            return Ok(());
        }
        if self.skip_space() == 0 {
            return Err(self.err_expected("whitespace or '?>'"));
        }
        loop {
            if self.cursor.eat_str("?>") {
                return Ok(());
            }
            match self.cursor.current() {
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
                Some(ch) if grammar::is_xml_char(ch) => self.cursor.advance(),
                Some(ch) => return Err(self.error(ErrorKind::IllegalChar { ch })),
            }
        }
    }

    // The XML declaration and the text declaration share their surface
    // syntax; which pseudo-attributes are mandatory differs.
    fn parse_declaration(&mut self, kind: DeclKind) -> Result<()> {
        let start = self.cursor.position();
        self.cursor.eat_str("<?xml");

        let mut had_space = self.skip_space() > 0;
        let mut version = None;
        if had_space && self.cursor.starts_with("version") {
            self.cursor.eat_str("version");
            version = Some(self.parse_pseudo_attribute_value()?);
            had_space = self.skip_space() > 0;
        }
        let mut encoding = None;
        if had_space && self.cursor.starts_with("encoding") {
            self.cursor.eat_str("encoding");
            encoding = Some(self.parse_pseudo_attribute_value()?);
            had_space = self.skip_space() > 0;
        }
        let mut standalone = None;
        if kind == DeclKind::Xml && had_space && self.cursor.starts_with("standalone") {
            self.cursor.eat_str("standalone");
            standalone = Some(self.parse_pseudo_attribute_value()?);
            self.skip_space();
        }
        if !self.cursor.eat_str("?>") {
            return Err(self.err_expected("'?>'"));
        }

        let version_ok = match &version {
            Some(v) => grammar::is_version_num(v),
            // The text declaration's version is optional; the XML
            // declaration's is not.
            None => kind == DeclKind::Text,
        };
        let encoding_ok = match &encoding {
            Some(e) => grammar::is_encoding_name(e),
            None => kind == DeclKind::Xml,
        };
        let standalone_ok = matches!(standalone.as_deref(), None | Some("yes") | Some("no"));
        if !(version_ok && encoding_ok && standalone_ok) {
            return Err(Error::new(ErrorKind::InvalidDeclaration, start));
        }
        Ok(())
    }

    // Eq plus a quoted literal value, no reference decoding.
    fn parse_pseudo_attribute_value(&mut self) -> Result<String> {
        self.skip_space();
        self.expect_char('=')?;
        self.skip_space();
        let quote = match self.cursor.current() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.err_expected("quoted value")),
        };
        self.cursor.advance();
        let start = self.cursor.pos();
        while self.cursor.current().is_some_and(|ch| ch != quote) {
            self.cursor.advance();
        }
        let value = self.cursor.slice_from(start).to_string();
        if !self.cursor.eat(quote) {
            return Err(self.error(ErrorKind::UnexpectedEnd));
        }
        Ok(value)
    }

    // Misc ::= Comment | PI | S
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_space();
            if self.cursor.starts_with("<!--") {
                self.parse_comment()?;
            } else if self.cursor.starts_with("<!DOCTYPE") {
                return Err(self.error(ErrorKind::DoctypeUnsupported));
            } else if self.cursor.starts_with("<?") {
                self.parse_pi()?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        match self.cursor.current() {
            Some(ch) if grammar::is_name_start_char(ch) => {}
            _ => return Err(self.err_expected("name")),
        }
        let start = self.cursor.pos();
        while self.cursor.current().is_some_and(grammar::is_name_char) {
            self.cursor.advance();
        }
        Ok(self.cursor.slice_from(start).to_string())
    }

    fn at_xml_declaration(&self) -> bool {
        // "<?xml" followed by whitespace is a declaration; anything
        // else starting "<?xml" is a (reserved or longer-named) PI.
        self.cursor.starts_with("<?xml")
            && self.cursor.peek(5).is_some_and(grammar::is_space)
    }

    fn skip_space(&mut self) -> usize {
        let mut count = 0;
        while self.cursor.current().is_some_and(grammar::is_space) {
            self.cursor.advance();
            count += 1;
        }
        count
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        if self.cursor.eat(expected) {
            Ok(())
        } else {
            Err(self.err_expected(&format!("'{expected}'")))
        }
    }

    fn expect_eof(&mut self) -> Result<()> {
        if self.cursor.is_eof() {
            Ok(())
        } else {
            Err(self.error(ErrorKind::TrailingInput))
        }
    }

    fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.cursor.position())
    }

    fn err_expected(&self, expected: &str) -> Error {
        let found = match self.cursor.current() {
            Some(ch) => format!("{ch:?}"),
            None => "end of input".to_string(),
        };
        self.error(ErrorKind::Expected {
            expected: expected.to_string(),
            found,
        })
    }
}
