//! Configuration text writing.
//!
//! This module provides the [`Builder`], which writes well-formed
//! configuration text to any [`io::Write`] sink from a sequence of value,
//! section and comment calls.
//!
//! ## Overview
//!
//! - **Name validation**: names must match `[A-Za-z_][A-Za-z0-9_]*`
//! - **Quote minimization**: values made only of ASCII letters, digits and
//!   `_ / . [ ] :` are written bare; everything else is quoted and escaped.
//!   [`Builder::write_node`] also quotes `/ [ ] :` so trees parse back
//! - **Indentation**: one tab per nesting level by default, see
//!   [`BuilderOptions`]
//!
//! ## Usage
//!
//! ```rust
//! use braceconf::Builder;
//!
//! let mut builder = Builder::new(Vec::new());
//! builder
//!     .write_comment("Example configuration")?
//!     .start_section_with_value("database", "testdb")?
//!     .write_value("type", "elasticsearch")?
//!     .write_value("port", 9200)?
//!     .close_section()?;
//!
//! let text = String::from_utf8(builder.finish()?).unwrap();
//! assert_eq!(
//!     text,
//!     "# Example configuration\ndatabase testdb {\n\ttype elasticsearch;\n\tport 9200;\n}\n"
//! );
//! # Ok::<(), braceconf::Error>(())
//! ```

use crate::convert::ToValue;
use crate::parser::{is_direct_char, is_name_char, is_name_start};
use crate::{BuilderOptions, Error, Node, Result};
use std::io;
use tracing::trace;

/// Returns `true` if `name` can be written as an entry or section name.
///
/// # Examples
///
/// ```rust
/// use braceconf::builder::is_valid_name;
///
/// assert!(is_valid_name("worker_processes"));
/// assert!(is_valid_name("_h2"));
/// assert!(!is_valid_name("2fa"));
/// assert!(!is_valid_name(""));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
}

/// Returns `true` if `value` is written without quotes.
#[must_use]
pub fn is_bare_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '/' | '.' | '[' | ']' | ':'))
}

/// Renders `value` as it appears after a name: bare, or quoted and escaped.
///
/// # Examples
///
/// ```rust
/// use braceconf::builder::render_value;
///
/// assert_eq!(render_value("192.168.1.10"), "192.168.1.10");
/// assert_eq!(render_value("two words"), "\"two words\"");
/// assert_eq!(render_value("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
/// assert_eq!(render_value(""), "\"\"");
/// ```
#[must_use]
pub fn render_value(value: &str) -> String {
    if is_bare_value(value) {
        value.to_string()
    } else {
        quote(value)
    }
}

/// Like [`render_value`], but also quotes bare values the parser would reject
/// unquoted (`/ [ ] :`), so written trees parse back unchanged.
fn render_readable(value: &str) -> String {
    if is_bare_value(value) && value.chars().all(is_direct_char) {
        value.to_string()
    } else {
        quote(value)
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Writes configuration text to an [`io::Write`] sink.
///
/// Every method returns `&mut Self` so calls can be chained with `?`. The
/// builder does not buffer: wrap the sink in an [`io::BufWriter`] when
/// writing to a file.
pub struct Builder<W: io::Write> {
    writer: W,
    depth: usize,
    indent: String,
}

impl<W: io::Write> Builder<W> {
    pub fn new(writer: W) -> Self {
        Builder::with_options(writer, BuilderOptions::default())
    }

    pub fn with_options(writer: W, options: BuilderOptions) -> Self {
        Builder {
            writer,
            depth: 0,
            indent: options.indent.unit(),
        }
    }

    /// Number of sections currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns the sink without checking that every section was closed.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flushes the sink and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnclosedSections`] if sections are still open, or
    /// [`Error::Io`] if flushing fails.
    pub fn finish(mut self) -> Result<W> {
        if self.depth > 0 {
            return Err(Error::UnclosedSections(self.depth));
        }
        self.flush()?;
        Ok(self.writer)
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::io(&e.to_string()))
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.writer
            .write_all(s.as_bytes())
            .map_err(|e| Error::io(&e.to_string()))
    }

    fn write_indent(&mut self) -> Result<()> {
        for _ in 0..self.depth {
            self.writer
                .write_all(self.indent.as_bytes())
                .map_err(|e| Error::io(&e.to_string()))?;
        }
        Ok(())
    }

    fn check_name(name: &str) -> Result<()> {
        if is_valid_name(name) {
            Ok(())
        } else {
            Err(Error::InvalidName(name.to_string()))
        }
    }

    /// Writes `# text`, one comment line per line of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink fails.
    pub fn write_comment(&mut self, comment: &str) -> Result<&mut Self> {
        if comment.is_empty() {
            self.write_indent()?;
            self.write_str("#\n")?;
            return Ok(self);
        }
        for line in comment.lines() {
            self.write_indent()?;
            if line.is_empty() {
                self.write_str("#\n")?;
            } else {
                self.write_str("# ")?;
                self.write_str(line)?;
                self.write_str("\n")?;
            }
        }
        Ok(self)
    }

    /// Writes an empty line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink fails.
    pub fn write_line(&mut self) -> Result<&mut Self> {
        self.write_indent()?;
        self.write_str("\n")?;
        Ok(self)
    }

    /// Writes `name value;`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] for an illegal name (nothing is written
    /// for the entry), or [`Error::Io`] if the sink fails.
    pub fn write_value<V: ToValue>(&mut self, name: &str, value: V) -> Result<&mut Self> {
        self.write_entry(name, &render_value(&value.to_value()), ";\n")
    }

    fn write_entry(&mut self, name: &str, rendered: &str, end: &str) -> Result<&mut Self> {
        Self::check_name(name)?;
        self.write_indent()?;
        self.write_str(name)?;
        self.write_str(" ")?;
        self.write_str(rendered)?;
        self.write_str(end)?;
        Ok(self)
    }

    /// Writes `name {` and opens a section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] for an illegal name, or [`Error::Io`]
    /// if the sink fails.
    pub fn start_section(&mut self, name: &str) -> Result<&mut Self> {
        Self::check_name(name)?;
        self.write_indent()?;
        self.write_str(name)?;
        self.write_str(" {\n")?;
        self.open();
        Ok(self)
    }

    /// Writes `name value {` and opens a section tagged with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] for an illegal name, or [`Error::Io`]
    /// if the sink fails.
    pub fn start_section_with_value<V: ToValue>(&mut self, name: &str, value: V) -> Result<&mut Self> {
        self.write_entry(name, &render_value(&value.to_value()), " {\n")?;
        self.open();
        Ok(self)
    }

    fn open(&mut self) {
        self.depth += 1;
        trace!(depth = self.depth, "section started");
    }

    /// Writes `}` and closes the innermost section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenSection`] if no section is open, or
    /// [`Error::Io`] if the sink fails.
    pub fn close_section(&mut self) -> Result<&mut Self> {
        if self.depth == 0 {
            return Err(Error::NoOpenSection);
        }
        self.depth -= 1;
        self.write_indent()?;
        self.write_str("}\n")?;
        trace!(depth = self.depth, "section closed");
        Ok(self)
    }

    /// Writes a leaf as a value, or a section with all of its children.
    ///
    /// A section with an empty tag is written as `name {`. Unlike
    /// [`write_value`](Builder::write_value), values containing `/ [ ] :` are
    /// quoted, so the output parses back to an equal tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if any name in the tree is illegal, or
    /// [`Error::Io`] if the sink fails.
    pub fn write_node(&mut self, node: &Node) -> Result<&mut Self> {
        if node.is_leaf() {
            return self.write_entry(node.name(), &render_readable(node.value()), ";\n");
        }

        if node.value().is_empty() {
            self.start_section(node.name())?;
        } else {
            self.write_entry(node.name(), &render_readable(node.value()), " {\n")?;
            self.open();
        }
        self.write_children(node)?;
        self.close_section()
    }

    /// Writes the children of `node` at the current depth, without the node
    /// itself. Used to render a parsed root.
    ///
    /// # Errors
    ///
    /// Same as [`write_node`](Builder::write_node).
    pub fn write_children(&mut self, node: &Node) -> Result<&mut Self> {
        for child in node.children() {
            self.write_node(child)?;
        }
        Ok(self)
    }
}
