//! Path queries over a configuration tree.
//!
//! A path expression is a `/`-separated list of child names. Each segment may
//! carry a condition after its first `:`, which additionally requires the
//! matched node's value to equal the condition:
//!
//! ```text
//! database/node:node-00/port
//! ^^^^^^^^ ^^^^ ^^^^^^^ ^^^^
//! name     name condition name
//! ```
//!
//! Children are always visited in document order. [`resolve_first`] stops at
//! the first complete match anywhere in the tree (depth-first, left to
//! right); [`resolve_all`] visits every matching branch and collects every
//! match.
//!
//! ## Examples
//!
//! ```rust
//! use braceconf::parse;
//! use braceconf::query::{resolve_all, resolve_first, Path};
//!
//! let root = parse("node a { port 1; } node b { port 2; }").unwrap();
//! let path = Path::parse("node/port");
//!
//! let first = resolve_first(&root, &path, |n| n.value_as::<u16>()).unwrap();
//! assert_eq!(first, Some(1));
//!
//! let all = resolve_all(&root, &path, |n| n.value_as::<u16>()).unwrap();
//! assert_eq!(all, vec![1, 2]);
//! ```

use crate::{Node, Result};
use std::fmt;
use std::str::FromStr;

/// One step of a [`Path`]: a child name and an optional value condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub condition: Option<String>,
}

impl Segment {
    fn parse(segment: &str) -> Self {
        match segment.split_once(':') {
            Some((name, condition)) => Segment {
                name: name.to_string(),
                condition: Some(condition.to_string()),
            },
            None => Segment {
                name: segment.to_string(),
                condition: None,
            },
        }
    }

    /// Returns `true` if `node` satisfies this segment.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        !self.name.is_empty()
            && node.name() == self.name
            && self
                .condition
                .as_deref()
                .map_or(true, |condition| node.value() == condition)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "{}:{}", self.name, condition),
            None => f.write_str(&self.name),
        }
    }
}

/// A parsed path expression.
///
/// Parsing never fails. Trailing slashes are ignored (`a/` is the same as
/// `a`); other empty segments (as in `a//b`, `/a` or the empty path) match
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Splits `expr` on `/`, then each segment on its first `:`. Trailing
    /// empty segments are dropped, keeping at least one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braceconf::query::Path;
    ///
    /// let path = Path::parse("upstream:api/server:a:b");
    /// assert_eq!(path.segments()[0].condition.as_deref(), Some("api"));
    /// assert_eq!(path.segments()[1].name, "server");
    /// assert_eq!(path.segments()[1].condition.as_deref(), Some("a:b"));
    /// ```
    #[must_use]
    pub fn parse(expr: &str) -> Self {
        let mut parts: Vec<&str> = expr.split('/').collect();
        while parts.len() > 1 && parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
        Path {
            segments: parts.into_iter().map(Segment::parse).collect(),
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Finds the first node matching `path` below `root` and converts it.
///
/// Returns `Ok(None)` when nothing matches.
///
/// # Errors
///
/// Propagates the error returned by `convert`; it is not treated as a miss.
pub fn resolve_first<'a, T, F>(root: &'a Node, path: &Path, mut convert: F) -> Result<Option<T>>
where
    F: FnMut(&'a Node) -> Result<T>,
{
    first_match(root, &path.segments, &mut convert)
}

fn first_match<'a, T, F>(node: &'a Node, segments: &[Segment], convert: &mut F) -> Result<Option<T>>
where
    F: FnMut(&'a Node) -> Result<T>,
{
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(None);
    };

    for child in node.children().iter().filter(|child| segment.matches(child)) {
        if rest.is_empty() {
            return convert(child).map(Some);
        }
        if let Some(found) = first_match(child, rest, convert)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

/// Collects every node matching `path` below `root`, converted, in document
/// order.
///
/// # Errors
///
/// Propagates the first error returned by `convert`.
pub fn resolve_all<'a, T, F>(root: &'a Node, path: &Path, mut convert: F) -> Result<Vec<T>>
where
    F: FnMut(&'a Node) -> Result<T>,
{
    let mut found = Vec::new();
    all_matches(root, &path.segments, &mut convert, &mut found)?;
    Ok(found)
}

fn all_matches<'a, T, F>(
    node: &'a Node,
    segments: &[Segment],
    convert: &mut F,
    found: &mut Vec<T>,
) -> Result<()>
where
    F: FnMut(&'a Node) -> Result<T>,
{
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(());
    };

    for child in node.children().iter().filter(|child| segment.matches(child)) {
        if rest.is_empty() {
            found.push(convert(child)?);
        } else {
            all_matches(child, rest, convert, found)?;
        }
    }

    Ok(())
}
