//! # braceconf
//!
//! A parser, path query engine and writer for brace-delimited,
//! semicolon-terminated configuration files in the style of reverse-proxy
//! configs.
//!
//! ## What does it look like?
//!
//! ```text
//! # Example configuration of an elasticsearch database
//! database testdb {
//!     type elasticsearch;
//!     node node-00 {
//!         host 192.168.1.10;
//!         port 9200;
//!     }
//! }
//! ```
//!
//! Entries are a name, an optional value, and either `;` or a nested
//! `{ ... }` block. Values are bare (`9200`, `node-00`) or quoted with
//! escapes (`"two words\n"`). See [`grammar`] for the full format.
//!
//! ## Key Features
//!
//! - **Tree parsing**: a single-pass character state machine builds an
//!   immutable [`Node`] tree, reporting errors with line and column
//! - **Path queries**: `database/node:node-00/port` finds the first match;
//!   [`Node::query_all`] collects every match in document order
//! - **Typed access**: [`Node::get`] converts values to `bool`, integers,
//!   floats and `char`, with conversion failures reported as errors
//! - **Writing**: [`Builder`] emits well-formed, escaped, indented text
//! - **Serde Compatible**: load a tree straight into `#[derive(Deserialize)]`
//!   types with [`from_str`]
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ### Parsing and Querying
//!
//! ```rust
//! use braceconf::parse;
//!
//! let text = "database testdb {
//!     type elasticsearch;
//!     node node-00 { host 192.168.1.10; port 9200; }
//!     node node-01 { host 192.168.1.11; port 9200; }
//! }";
//!
//! let root = parse(text).unwrap();
//! assert_eq!(root.query("database").unwrap().value(), "testdb");
//! assert_eq!(root.query("database/type").unwrap().value(), "elasticsearch");
//! assert_eq!(root.get::<u16>("database/node:node-00/port").unwrap(), Some(9200));
//!
//! let hosts: Vec<String> = root.get_all("database/node/host").unwrap();
//! assert_eq!(hosts, ["192.168.1.10", "192.168.1.11"]);
//!
//! // Misses are not errors
//! assert_eq!(root.get_or("database/timeout", 30u32).unwrap(), 30);
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use braceconf::Builder;
//!
//! let mut builder = Builder::new(Vec::new());
//! builder
//!     .start_section_with_value("database", "testdb")?
//!     .write_value("type", "elasticsearch")?
//!     .write_value("replicas", 2)?
//!     .close_section()?;
//!
//! let text = String::from_utf8(builder.finish()?).unwrap();
//! assert_eq!(text, "database testdb {\n\ttype elasticsearch;\n\treplicas 2;\n}\n");
//! # Ok::<(), braceconf::Error>(())
//! ```
//!
//! ### Typed Configuration
//!
//! ```rust
//! use braceconf::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Server {
//!     listen: Vec<u16>,
//!     gzip: Option<bool>,
//! }
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     server: Server,
//! }
//!
//! let config: Config = from_str("server { listen 80; listen 443; gzip on; }").unwrap();
//! assert_eq!(config.server.listen, [80, 443]);
//! assert_eq!(config.server.gzip, Some(true));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - No panics in the public API
//! - Parsed trees are immutable and `Send + Sync`

pub mod builder;
pub mod convert;
pub mod de;
pub mod error;
pub mod grammar;
pub mod node;
pub mod options;
pub mod parser;
pub mod query;

pub use builder::Builder;
pub use convert::{FromNode, ToValue};
pub use de::Deserializer;
pub use error::{Error, Result};
pub use node::Node;
pub use options::{BuilderOptions, Indent, ParseOptions};
pub use parser::Parser;
pub use query::Path;

use serde::de::{Deserialize, DeserializeOwned};
use std::io;
use tracing::debug;

/// Parses configuration text into an unnamed, valueless root [`Node`].
///
/// # Examples
///
/// ```rust
/// use braceconf::parse;
///
/// let root = parse("user www; events { worker_connections 1024; }").unwrap();
/// assert_eq!(root.children().len(), 2);
/// ```
///
/// # Errors
///
/// Returns a grammar error (with line and column) for the first character the
/// grammar does not allow, or for input that ends inside an entry or section.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Node> {
    parse_with_options(input, ParseOptions::default())
}

/// Parses configuration text with custom [`ParseOptions`].
///
/// # Errors
///
/// Same as [`parse`], plus [`Error::NestingTooDeep`] when sections nest
/// deeper than `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Node> {
    Parser::from_str(input).with_options(options).parse()
}

/// Parses configuration text from UTF-8 bytes.
///
/// Bytes are decoded as they are read, so invalid UTF-8 is reported at the
/// line and column where it occurs.
///
/// # Errors
///
/// Returns [`Error::Read`] if the bytes are not valid UTF-8, or any error of
/// [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(input: &[u8]) -> Result<Node> {
    Parser::from_reader(input).parse()
}

/// Parses configuration text decoded as UTF-8 from a reader.
///
/// The reader is consumed one character at a time; a read failure or invalid
/// UTF-8 is reported as [`Error::Read`] with the position reached so far.
///
/// # Examples
///
/// ```rust
/// use braceconf::parse_reader;
/// use std::io::Cursor;
///
/// let root = parse_reader(Cursor::new(b"listen 80;")).unwrap();
/// assert_eq!(root.get::<u16>("listen").unwrap(), Some(80));
/// ```
///
/// # Errors
///
/// Returns [`Error::Read`] if reading fails, or any error of [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R: io::Read>(reader: R) -> Result<Node> {
    let root = Parser::from_reader(reader).parse()?;
    debug!(entries = root.children().len(), "parsed configuration from reader");
    Ok(root)
}

/// Renders the children of `root` as configuration text.
///
/// The root itself is not written, so `to_string(&parse(text)?)` yields an
/// equivalent document. Values the parser only accepts quoted (such as
/// `/var/www`) are quoted, so the output parses back to an equal tree.
///
/// # Examples
///
/// ```rust
/// use braceconf::{parse, to_string};
///
/// let root = parse("server   main { listen 80 ; }").unwrap();
/// assert_eq!(to_string(&root).unwrap(), "server main {\n\tlisten 80;\n}\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the tree contains a name the grammar
/// does not allow.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(root: &Node) -> Result<String> {
    let mut builder = Builder::new(Vec::new());
    builder.write_children(root)?;
    let bytes = builder.finish()?;
    String::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))
}

/// Renders the children of `root` as configuration text into a writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails, or [`Error::InvalidName`] for an
/// illegal name in the tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(writer: W, root: &Node) -> Result<()> {
    let mut builder = Builder::new(writer);
    builder.write_children(root)?;
    builder.finish()?;
    Ok(())
}

/// Deserializes an instance of type `T` from a parsed tree.
///
/// # Examples
///
/// ```rust
/// use braceconf::{from_node, parse};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Events<'a> {
///     #[serde(rename = "use")]
///     method: &'a str,
/// }
///
/// let root = parse("use epoll;").unwrap();
/// let events: Events = from_node(&root).unwrap();
/// assert_eq!(events.method, "epoll");
/// ```
///
/// # Errors
///
/// Returns an error if the tree cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_node<'de, T>(node: &'de Node) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::new(node))
}

/// Deserializes an instance of type `T` from configuration text.
///
/// # Errors
///
/// Returns a parse error if the text is not valid, or an error if the tree
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_node(&parse(s)?)
}

/// Deserializes an instance of type `T` from UTF-8 bytes of configuration
/// text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid
/// configuration text, or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_node(&parse_slice(v)?)
}

/// Deserializes an instance of type `T` from a reader of configuration text.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid configuration
/// text, or the tree cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_node(&parse_reader(reader)?)
}
