//! Error types for parsing, querying and writing configuration text.
//!
//! ## Error Categories
//!
//! - **Grammar errors**: an unexpected character, an unknown escape sequence,
//!   input ending inside an entry or section, or nesting deeper than allowed.
//!   All of them carry the 1-based line and column of the failure.
//! - **I/O errors**: a failing reader (reported with the last known position)
//!   or a failing writer.
//! - **Conversion errors**: a matched value could not be read as the requested
//!   type.
//! - **Builder errors**: an illegal name, or unbalanced section calls.
//!
//! ## Examples
//!
//! ```rust
//! use braceconf::{parse, Error};
//!
//! let err = parse("server main {\n\tlisten 80:\n}").unwrap_err();
//! assert!(err.is_grammar());
//! assert_eq!(err.position(), Some((2, 11)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A character that the grammar does not allow at this point.
    #[error("invalid character {found:?} at line {line}, column {col}")]
    UnexpectedChar { found: char, line: usize, col: usize },

    /// A backslash followed by a character with no escape meaning.
    #[error("invalid escape sequence \"\\{found}\" at line {line}, column {col}")]
    InvalidEscape { found: char, line: usize, col: usize },

    /// Input ended in the middle of an entry or inside an open section.
    #[error("unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        expected: String,
        line: usize,
        col: usize,
    },

    /// Sections nested deeper than [`ParseOptions::max_depth`](crate::ParseOptions).
    #[error("sections nested deeper than {max} levels at line {line}, column {col}")]
    NestingTooDeep { max: usize, line: usize, col: usize },

    /// The underlying reader failed or produced invalid UTF-8.
    #[error("read error at line {line}, column {col}: {msg}")]
    Read { msg: String, line: usize, col: usize },

    /// The underlying writer failed.
    #[error("IO error: {0}")]
    Io(String),

    /// A value could not be converted to the requested type.
    #[error("cannot convert value {value:?} to {target}")]
    Conversion { value: String, target: &'static str },

    /// The builder was given a name outside `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("invalid name {0:?}")]
    InvalidName(String),

    /// `close_section` was called with no section open.
    #[error("no open section to close")]
    NoOpenSection,

    /// The builder was finished with sections still open.
    #[error("{0} section(s) left open")]
    UnclosedSections(usize),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    pub(crate) fn unexpected_char(found: char, line: usize, col: usize) -> Self {
        Error::UnexpectedChar { found, line, col }
    }

    pub(crate) fn invalid_escape(found: char, line: usize, col: usize) -> Self {
        Error::InvalidEscape { found, line, col }
    }

    pub(crate) fn unexpected_eof(expected: impl Into<String>, line: usize, col: usize) -> Self {
        Error::UnexpectedEof {
            expected: expected.into(),
            line,
            col,
        }
    }

    pub(crate) fn read(err: &std::io::Error, line: usize, col: usize) -> Self {
        Error::Read {
            msg: err.to_string(),
            line,
            col,
        }
    }

    pub(crate) fn conversion(value: &str, target: &'static str) -> Self {
        Error::Conversion {
            value: value.to_string(),
            target,
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braceconf::Error;
    ///
    /// let err = Error::custom("port out of range");
    /// assert!(err.to_string().contains("port out of range"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for a failing writer.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `(line, column)` for errors raised while reading input.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            Error::UnexpectedChar { line, col, .. }
            | Error::InvalidEscape { line, col, .. }
            | Error::UnexpectedEof { line, col, .. }
            | Error::NestingTooDeep { line, col, .. }
            | Error::Read { line, col, .. } => Some((line, col)),
            _ => None,
        }
    }

    /// Returns `true` if the input text itself violates the grammar.
    #[must_use]
    pub fn is_grammar(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedChar { .. }
                | Error::InvalidEscape { .. }
                | Error::UnexpectedEof { .. }
                | Error::NestingTooDeep { .. }
        )
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = Error::unexpected_char('$', 3, 7);
        assert_eq!(
            err.to_string(),
            "invalid character '$' at line 3, column 7"
        );
        assert_eq!(err.position(), Some((3, 7)));
    }

    #[test]
    fn test_escape_display() {
        let err = Error::invalid_escape('x', 1, 9);
        assert_eq!(
            err.to_string(),
            "invalid escape sequence \"\\x\" at line 1, column 9"
        );
    }

    #[test]
    fn test_non_positional_errors() {
        assert_eq!(Error::InvalidName("1abc".into()).position(), None);
        assert!(!Error::conversion("maybe", "bool").is_grammar());
        assert!(Error::unexpected_eof("`}`", 4, 1).is_grammar());
    }
}
