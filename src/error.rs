//! Error types for twine-xml

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Broad failure family, for callers that dispatch on what went wrong
/// rather than on the exact kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Input does not match the required grammar production.
    Syntax,
    /// Input is locally grammatical but violates a well-formedness
    /// constraint (cross-reference rule).
    Constraint,
    /// A caller-supplied value has the wrong shape for the tree model.
    Shape,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax error"),
            Self::Constraint => write!(f, "well-formedness constraint violation"),
            Self::Shape => write!(f, "invalid value"),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    // Syntax
    UnexpectedEnd,
    Expected { expected: String, found: String },
    IllegalChar { ch: char },
    CdataEndInText,
    BareLessThan,
    InvalidReference,
    DoctypeUnsupported,
    TrailingInput,
    ReservedPiTarget { target: String },
    InvalidDeclaration,
    // Well-formedness constraints
    DuplicateAttribute { name: String },
    MismatchedTag { start: String, end: String },
    UnknownEntity { name: String },
    CharRefOutOfRange { value: u32 },
    // Shape
    InvalidName { value: String },
    InvalidCharData,
    InvalidAttribute { name: String },
    DuplicateKey { name: String },
    InvalidTwine,
    InvalidEncodingName { value: String },
}

impl ErrorKind {
    /// Which of the three failure families this kind belongs to.
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnexpectedEnd
            | Self::Expected { .. }
            | Self::IllegalChar { .. }
            | Self::CdataEndInText
            | Self::BareLessThan
            | Self::InvalidReference
            | Self::DoctypeUnsupported
            | Self::TrailingInput
            | Self::ReservedPiTarget { .. }
            | Self::InvalidDeclaration => ErrorClass::Syntax,
            Self::DuplicateAttribute { .. }
            | Self::MismatchedTag { .. }
            | Self::UnknownEntity { .. }
            | Self::CharRefOutOfRange { .. } => ErrorClass::Constraint,
            Self::InvalidName { .. }
            | Self::InvalidCharData
            | Self::InvalidAttribute { .. }
            | Self::DuplicateKey { .. }
            | Self::InvalidTwine
            | Self::InvalidEncodingName { .. } => ErrorClass::Shape,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::IllegalChar { ch } => {
                write!(f, "character U+{:04X} is not allowed in XML", *ch as u32)
            }
            Self::CdataEndInText => write!(f, "']]>' is not allowed in character data"),
            Self::BareLessThan => write!(f, "'<' is not allowed in attribute values"),
            Self::InvalidReference => write!(f, "malformed reference"),
            Self::DoctypeUnsupported => {
                write!(f, "document type declarations are not supported")
            }
            Self::TrailingInput => write!(f, "trailing input after document end"),
            Self::ReservedPiTarget { target } => {
                write!(f, "processing instruction target '{target}' is reserved")
            }
            Self::InvalidDeclaration => write!(f, "malformed XML or text declaration"),
            Self::DuplicateAttribute { name } => {
                write!(f, "duplicate attribute: {name}")
            }
            Self::MismatchedTag { start, end } => {
                write!(f, "end tag '{end}' does not match start tag '{start}'")
            }
            Self::UnknownEntity { name } => write!(f, "undeclared entity: &{name};"),
            Self::CharRefOutOfRange { value } => {
                write!(
                    f,
                    "character reference U+{value:04X} is outside the XML character range"
                )
            }
            Self::InvalidName { value } => write!(f, "not a valid XML name: {value:?}"),
            Self::InvalidCharData => write!(f, "not a valid character-data string"),
            Self::InvalidAttribute { name } => write!(f, "invalid attribute: {name:?}"),
            Self::DuplicateKey { name } => {
                write!(f, "attribute key supplied more than once: {name}")
            }
            Self::InvalidTwine => write!(f, "not a valid content twine"),
            Self::InvalidEncodingName { value } => {
                write!(f, "not a valid encoding name: {value:?}")
            }
        }
    }
}

/// Main error type for twine-xml
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{}", render(.kind, .pos, .message))]
pub struct Error {
    kind: ErrorKind,
    pos: Pos,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        let message = kind.to_string();
        Self { kind, pos, message }
    }

    /// Shape errors raised outside of parsing carry no source position.
    pub fn shape(kind: ErrorKind) -> Self {
        Self::new(kind, Pos::default())
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub const fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    pub const fn pos(&self) -> Pos {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// Shape errors carry no source position, so none is printed for them.
fn render(kind: &ErrorKind, pos: &Pos, message: &str) -> String {
    if *pos == Pos::default() {
        format!("{}: {message}", kind.class())
    } else {
        format!("{} at {pos}: {message}", kind.class())
    }
}

/// Result type alias for twine-xml
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "10:5");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(ErrorKind::UnexpectedEnd.class(), ErrorClass::Syntax);
        assert_eq!(
            ErrorKind::DuplicateAttribute {
                name: "x".to_string()
            }
            .class(),
            ErrorClass::Constraint
        );
        assert_eq!(ErrorKind::InvalidTwine.class(), ErrorClass::Shape);
        // Re-supplying a key to the builder is API misuse, not a
        // parse-time constraint violation.
        assert_eq!(
            ErrorKind::DuplicateKey {
                name: "x".to_string()
            }
            .class(),
            ErrorClass::Shape
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::new(
            ErrorKind::MismatchedTag {
                start: "a".to_string(),
                end: "b".to_string(),
            },
            Pos::new(10, 2, 5),
        );
        let display = err.to_string();
        assert!(display.contains("well-formedness"));
        assert!(display.contains("2:5"));
        assert!(display.contains("does not match"));
    }

    #[test]
    fn test_shape_error_display_has_no_position() {
        let err = Error::shape(ErrorKind::InvalidCharData);
        assert!(!err.to_string().contains(" at "));
    }
}
