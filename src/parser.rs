//! Configuration text parsing.
//!
//! This module provides the [`Parser`], a character-level state machine that
//! recurses once per `{ ... }` block and produces a [`Node`] tree.
//!
//! ## Overview
//!
//! - **Single pass**: every character is read exactly once, with no lookahead
//!   and no backtracking
//! - **Any character source**: `&str` input, or any [`io::Read`] decoded as
//!   UTF-8 one character at a time
//! - **Positioned errors**: every failure carries the 1-based line and column
//!   of the offending character
//!
//! Each nesting level owns its own scanner state, buffers and children. Only
//! the cursor (source, line and column) is shared between levels.
//!
//! ## Usage
//!
//! Most users should use [`parse`](crate::parse) in the crate root:
//!
//! ```rust
//! use braceconf::Parser;
//!
//! let root = Parser::from_str("worker_processes 4;\nevents { worker_connections 1024; }")
//!     .parse()
//!     .unwrap();
//! assert_eq!(root.get::<u32>("events/worker_connections").unwrap(), Some(1024));
//! ```

use crate::{Error, Node, ParseOptions, Result};
use std::io::{self, BufReader, Read};
use tracing::{debug, trace};

pub(crate) fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

pub(crate) fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Characters allowed in an unquoted value.
pub(crate) fn is_direct_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_')
}

/// Characters of `&str` input, which can never fail.
pub struct StrChars<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> StrChars<'a> {
    pub fn new(input: &'a str) -> Self {
        StrChars {
            chars: input.chars(),
        }
    }
}

impl Iterator for StrChars<'_> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.next().map(Ok)
    }
}

/// Characters decoded as UTF-8 from a reader.
///
/// Invalid or truncated UTF-8 is reported as an [`io::ErrorKind::InvalidData`]
/// error.
pub struct ReaderChars<R> {
    bytes: io::Bytes<BufReader<R>>,
}

impl<R: Read> ReaderChars<R> {
    pub fn new(reader: R) -> Self {
        ReaderChars {
            bytes: BufReader::new(reader).bytes(),
        }
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let lead = match self.bytes.next() {
            Some(byte) => byte?,
            None => return Ok(None),
        };

        let width = match lead {
            0x00..=0x7F => return Ok(Some(char::from(lead))),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(invalid_utf8()),
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = match self.bytes.next() {
                Some(byte) => byte?,
                None => return Err(invalid_utf8()),
            };
        }

        std::str::from_utf8(&buf[..width])
            .map(|s| s.chars().next())
            .map_err(|_| invalid_utf8())
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}

impl<R: Read> Iterator for ReaderChars<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_char().transpose()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Comment,
    Name,
    ValueStart,
    Value,
    ValueEscape,
    ValueDirect,
    ValueEnd,
}

impl State {
    /// What the grammar still needs when input ends in this state.
    fn expectation(self) -> &'static str {
        match self {
            State::Start | State::Comment => "`}`",
            State::Name => "whitespace and a value after the name",
            State::ValueStart => "a value or `{`",
            State::Value | State::ValueEscape => "closing `\"`",
            State::ValueDirect | State::ValueEnd => "`;` or `{`",
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Position {
    line: usize,
    col: usize,
}

/// The configuration parser.
///
/// Created with [`Parser::from_str`], [`Parser::from_reader`] or
/// [`Parser::new`] over any iterator of `io::Result<char>`.
pub struct Parser<I> {
    chars: I,
    line: usize,
    col: usize,
    options: ParseOptions,
}

impl<'a> Parser<StrChars<'a>> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Parser::new(StrChars::new(input))
    }
}

impl<R: Read> Parser<ReaderChars<R>> {
    pub fn from_reader(reader: R) -> Self {
        Parser::new(ReaderChars::new(reader))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    pub fn new(chars: I) -> Self {
        Parser {
            chars,
            line: 1,
            col: 1,
            options: ParseOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses the whole input into an unnamed, valueless root section.
    ///
    /// # Errors
    ///
    /// Returns a grammar error for the first character the grammar does not
    /// allow, for input that ends inside an entry or an open section, and for
    /// nesting deeper than [`ParseOptions::max_depth`]. Reader failures are
    /// returned as [`Error::Read`].
    pub fn parse(mut self) -> Result<Node> {
        let root = self.parse_section(String::new(), String::new(), 0)?;
        debug!(
            entries = root.children().len(),
            lines = self.line,
            "parsed configuration"
        );
        Ok(root)
    }

    fn next_char(&mut self) -> Result<Option<(char, Position)>> {
        let ch = match self.chars.next() {
            Some(Ok(ch)) => ch,
            Some(Err(err)) => return Err(Error::read(&err, self.line, self.col)),
            None => return Ok(None),
        };

        let position = Position {
            line: self.line,
            col: self.col,
        };
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Ok(Some((ch, position)))
    }

    fn open_section(
        &mut self,
        name: String,
        value: String,
        depth: usize,
        at: Position,
    ) -> Result<Node> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(Error::NestingTooDeep {
                max: self.options.max_depth,
                line: at.line,
                col: at.col,
            });
        }
        trace!(name = %name, value = %value, depth, "section opened");
        self.parse_section(name, value, depth)
    }

    fn parse_section(&mut self, name: String, value: String, depth: usize) -> Result<Node> {
        let mut state = State::Start;
        let mut entry = String::new();
        let mut buffer = String::new();
        let mut children = Vec::new();

        loop {
            let Some((ch, at)) = self.next_char()? else {
                return self.end_of_input(state, name, value, children, depth);
            };
            let unexpected = || Error::unexpected_char(ch, at.line, at.col);

            match state {
                State::Start => match ch {
                    c if is_space(c) => {}
                    '#' => state = State::Comment,
                    '}' if depth > 0 => {
                        trace!(name = %name, depth, "section closed");
                        return Ok(Node::section(name, value, children));
                    }
                    c if is_name_start(c) => {
                        entry.clear();
                        entry.push(c);
                        state = State::Name;
                    }
                    _ => return Err(unexpected()),
                },
                State::Comment => {
                    if ch == '\n' {
                        state = State::Start;
                    }
                }
                State::Name => match ch {
                    c if is_name_char(c) => entry.push(c),
                    ' ' | '\t' => state = State::ValueStart,
                    _ => return Err(unexpected()),
                },
                State::ValueStart => match ch {
                    ' ' | '\t' => {}
                    '"' => {
                        buffer.clear();
                        state = State::Value;
                    }
                    '{' => {
                        let child =
                            self.open_section(std::mem::take(&mut entry), String::new(), depth, at)?;
                        children.push(child);
                        state = State::Start;
                    }
                    c if is_direct_char(c) => {
                        buffer.clear();
                        buffer.push(c);
                        state = State::ValueDirect;
                    }
                    _ => return Err(unexpected()),
                },
                State::ValueDirect | State::ValueEnd => match ch {
                    c if state == State::ValueDirect && is_direct_char(c) => buffer.push(c),
                    c if is_space(c) => state = State::ValueEnd,
                    ';' => {
                        children.push(Node::leaf(
                            std::mem::take(&mut entry),
                            std::mem::take(&mut buffer),
                        ));
                        state = State::Start;
                    }
                    '{' => {
                        let child = self.open_section(
                            std::mem::take(&mut entry),
                            std::mem::take(&mut buffer),
                            depth,
                            at,
                        )?;
                        children.push(child);
                        state = State::Start;
                    }
                    _ => return Err(unexpected()),
                },
                State::Value => match ch {
                    '"' => state = State::ValueEnd,
                    '\\' => state = State::ValueEscape,
                    c => buffer.push(c),
                },
                State::ValueEscape => {
                    let unescaped = match ch {
                        '0' => '\0',
                        '"' => '"',
                        '\\' => '\\',
                        'b' => '\u{0008}',
                        'f' => '\u{000C}',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        _ => return Err(Error::invalid_escape(ch, at.line, at.col)),
                    };
                    buffer.push(unescaped);
                    state = State::Value;
                }
            }
        }
    }

    fn end_of_input(
        &self,
        state: State,
        name: String,
        value: String,
        children: Vec<Node>,
        depth: usize,
    ) -> Result<Node> {
        match state {
            State::Start | State::Comment if depth == 0 => Ok(Node::section(name, value, children)),
            State::Start | State::Comment => Err(Error::unexpected_eof(
                format!("`}}` closing section `{}`", name),
                self.line,
                self.col,
            )),
            _ => Err(Error::unexpected_eof(state.expectation(), self.line, self.col)),
        }
    }
}
