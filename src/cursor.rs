//! Character cursor for input navigation with position tracking

use crate::error::Pos;

/// Cursor over a string with byte-offset and line/column tracking.
///
/// XML names and the acceptable-character class are defined per code
/// point, so the cursor walks chars rather than bytes; offsets are still
/// byte offsets into the underlying `&str` so slices can be taken cheaply.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Get current char without consuming
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at the char `ahead` chars past the current one
    pub fn peek(&self, ahead: usize) -> Option<char> {
        self.rest().chars().nth(ahead)
    }

    /// Advance cursor by one char
    pub fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Consume char if it matches
    pub fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a literal string if the input starts with it
    pub fn eat_str(&mut self, expected: &str) -> bool {
        if self.starts_with(expected) {
            for _ in expected.chars() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    /// Check whether the remaining input starts with a literal string
    pub fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    /// Get current position with line/column information
    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }

    /// Check if at end of input
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining input
    pub fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    /// Get current byte offset
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Get slice from a previously recorded offset to the current position
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new("hello");
        assert_eq!(cursor.current(), Some('h'));
        assert_eq!(cursor.peek(1), Some('e'));
        cursor.advance();
        assert_eq!(cursor.current(), Some('e'));
    }

    #[test]
    fn test_cursor_multibyte() {
        let mut cursor = Cursor::new("é<");
        assert_eq!(cursor.current(), Some('é'));
        cursor.advance();
        assert_eq!(cursor.current(), Some('<'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.position().col, 2);
    }

    #[test]
    fn test_cursor_line_tracking() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.position().col, 1);
    }

    #[test]
    fn test_cursor_eat() {
        let mut cursor = Cursor::new("abc");
        assert!(cursor.eat('a'));
        assert!(!cursor.eat('z'));
        assert_eq!(cursor.current(), Some('b'));
    }

    #[test]
    fn test_cursor_eat_str() {
        let mut cursor = Cursor::new("<![CDATA[x");
        assert!(cursor.eat_str("<![CDATA["));
        assert_eq!(cursor.current(), Some('x'));
        assert!(!cursor.eat_str("yz"));
    }

    #[test]
    fn test_cursor_eof() {
        let cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_cursor_slice() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.pos();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "hel");
    }
}
