//! Options for parsing and writing configuration text.
//!
//! - [`ParseOptions`]: limits applied while parsing
//! - [`BuilderOptions`]: layout of the text the [`Builder`](crate::Builder) writes
//! - [`Indent`]: one tab or a number of spaces per nesting level
//!
//! ## Examples
//!
//! ```rust
//! use braceconf::{parse_with_options, Builder, BuilderOptions, Indent, ParseOptions};
//!
//! let options = ParseOptions::new().with_max_depth(2);
//! assert!(parse_with_options("a { b { c { } } }", options).is_err());
//!
//! let options = BuilderOptions::new().with_indent(Indent::Spaces(2));
//! let mut builder = Builder::with_options(Vec::new(), options);
//! builder.start_section("http").unwrap().write_value("sendfile", true).unwrap();
//! builder.close_section().unwrap();
//! assert_eq!(builder.into_inner(), b"http {\n  sendfile on;\n}\n");
//! ```

/// Default limit on section nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options applied while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested sections. Opening one more is an error.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default options (nesting limited to [`DEFAULT_MAX_DEPTH`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum section nesting depth.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braceconf::ParseOptions;
    ///
    /// let options = ParseOptions::new().with_max_depth(16);
    /// assert_eq!(options.max_depth, 16);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Indentation written per nesting level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    pub(crate) fn unit(self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(n),
        }
    }
}

/// Options controlling builder output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    pub indent: Indent,
}

impl BuilderOptions {
    /// Creates default options (one tab per level).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation written per level.
    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}
