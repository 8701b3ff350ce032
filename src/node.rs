//! The parsed configuration tree.
//!
//! A [`Node`] is either a *leaf* (`name value;`) holding a scalar value, or a
//! *section* (`name [value] { ... }`) holding an ordered list of children.
//! The parser returns an unnamed, valueless root section whose children are
//! the top-level declarations.
//!
//! Nodes are immutable once built. Queries borrow from the tree, so a parsed
//! configuration can be shared between threads and read concurrently.
//!
//! ## Examples
//!
//! ```rust
//! use braceconf::parse;
//!
//! let root = parse("database testdb { type elasticsearch; }").unwrap();
//! let database = &root.children()[0];
//!
//! assert_eq!(database.name(), "database");
//! assert_eq!(database.value(), "testdb");
//! assert!(database.is_section());
//! assert_eq!(database.children()[0].value(), "elasticsearch");
//! ```

use crate::convert::FromNode;
use crate::query::{self, Path};
use crate::Result;
use serde::Serialize;

/// A single entry of a configuration tree.
///
/// Children are kept in document order; order matters for
/// [`query_all`](Node::query_all) and for re-serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    name: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
}

impl Node {
    /// Creates a leaf node, written as `name value;`.
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            value: value.into(),
            children: None,
        }
    }

    /// Creates a section node, written as `name value { ... }`.
    ///
    /// An empty `value` is written as `name { ... }`.
    #[must_use]
    pub fn section(name: impl Into<String>, value: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            name: name.into(),
            value: value.into(),
            children: Some(children),
        }
    }

    /// Creates an unnamed, valueless root section.
    #[must_use]
    pub fn root(children: Vec<Node>) -> Self {
        Node::section(String::new(), String::new(), children)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scalar value of a leaf, or the tag of a section.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Child nodes in document order. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    #[must_use]
    pub fn is_section(&self) -> bool {
        self.children.is_some()
    }

    /// Converts this node's value with [`FromNode`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`](crate::Error::Conversion) if the value
    /// does not represent a `T`.
    pub fn value_as<T: FromNode>(&self) -> Result<T> {
        T::from_node(self)
    }

    /// Returns the first node matching `path`, searching depth-first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braceconf::parse;
    ///
    /// let root = parse("node a { port 1; } node b { port 2; }").unwrap();
    /// assert_eq!(root.query("node").map(|n| n.value()), Some("a"));
    /// assert_eq!(root.query("node:b/port").map(|n| n.value()), Some("2"));
    /// assert!(root.query("node:c/port").is_none());
    /// ```
    #[must_use]
    pub fn query(&self, path: &str) -> Option<&Node> {
        // Identity conversion cannot fail.
        query::resolve_first(self, &Path::parse(path), |node| Ok(node))
            .ok()
            .flatten()
    }

    /// Returns the first match of `path` passed through `convert`.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `convert`.
    pub fn query_with<'a, T, F>(&'a self, path: &str, convert: F) -> Result<Option<T>>
    where
        F: FnMut(&'a Node) -> Result<T>,
    {
        query::resolve_first(self, &Path::parse(path), convert)
    }

    /// Like [`query_with`](Node::query_with), returning `default` on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `convert`.
    pub fn query_or<'a, T, F>(&'a self, path: &str, convert: F, default: T) -> Result<T>
    where
        F: FnMut(&'a Node) -> Result<T>,
    {
        Ok(self.query_with(path, convert)?.unwrap_or(default))
    }

    /// Returns every node matching `path`, in document order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braceconf::parse;
    ///
    /// let root = parse("node a { } node b { } other c;").unwrap();
    /// let tags: Vec<&str> = root.query_all("node").iter().map(|n| n.value()).collect();
    /// assert_eq!(tags, ["a", "b"]);
    /// ```
    #[must_use]
    pub fn query_all(&self, path: &str) -> Vec<&Node> {
        query::resolve_all(self, &Path::parse(path), |node| Ok(node)).unwrap_or_default()
    }

    /// Returns every match of `path` passed through `convert`.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `convert`.
    pub fn query_all_with<'a, T, F>(&'a self, path: &str, convert: F) -> Result<Vec<T>>
    where
        F: FnMut(&'a Node) -> Result<T>,
    {
        query::resolve_all(self, &Path::parse(path), convert)
    }

    /// Returns the value of the first match of `path` as a `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braceconf::parse;
    ///
    /// let root = parse("server { port 8080; tls on; }").unwrap();
    /// assert_eq!(root.get::<u16>("server/port").unwrap(), Some(8080));
    /// assert_eq!(root.get::<bool>("server/tls").unwrap(), Some(true));
    /// assert_eq!(root.get::<bool>("server/gzip").unwrap(), None);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`](crate::Error::Conversion) if the matched
    /// value does not represent a `T`. A miss is not an error.
    pub fn get<T: FromNode>(&self, path: &str) -> Result<Option<T>> {
        self.query_with(path, T::from_node)
    }

    /// Returns the value of the first match of `path` as a `T`, or `default`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`](crate::Error::Conversion) if the matched
    /// value does not represent a `T`.
    pub fn get_or<T: FromNode>(&self, path: &str, default: T) -> Result<T> {
        self.query_or(path, T::from_node, default)
    }

    /// Returns the values of every match of `path` as `T`s.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`](crate::Error::Conversion) for the first
    /// matched value that does not represent a `T`.
    pub fn get_all<T: FromNode>(&self, path: &str) -> Result<Vec<T>> {
        self.query_all_with(path, T::from_node)
    }
}
