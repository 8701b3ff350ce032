//! Typed conversions between node values and Rust primitives.
//!
//! - [`FromNode`] reads a matched [`Node`] as a typed value. It backs
//!   [`Node::get`] and friends, and the scalar side of the serde
//!   deserializer.
//! - [`ToValue`] renders a Rust value as the text the [`Builder`](crate::Builder)
//!   writes after a name.
//!
//! Booleans accept `on`/`true`/`1` and `off`/`false`/`0` in any case; any
//! other text is a conversion error rather than a silent default. Numbers use
//! the standard base-10 and decimal/exponent forms. Floats also accept
//! `Infinity`, `-Infinity` and `NaN`, spelled exactly that way.
//!
//! ## Examples
//!
//! ```rust
//! use braceconf::{FromNode, Node, ToValue};
//!
//! let node = Node::leaf("keepalive", "ON");
//! assert_eq!(bool::from_node(&node).unwrap(), true);
//!
//! assert_eq!(false.to_value(), "off");
//! assert_eq!(f64::INFINITY.to_value(), "Infinity");
//! ```

use crate::{Error, Node, Result};
use std::borrow::Cow;

/// Conversion from a configuration node to a typed value.
pub trait FromNode: Sized {
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if the node's value does not represent
    /// a `Self`.
    fn from_node(node: &Node) -> Result<Self>;
}

pub(crate) fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(Error::conversion(value, "bool")),
    }
}

pub(crate) fn parse_char(value: &str) -> Result<char> {
    value
        .chars()
        .next()
        .ok_or_else(|| Error::conversion(value, "char"))
}

pub(crate) fn parse_number<T: std::str::FromStr>(value: &str, target: &'static str) -> Result<T> {
    value.parse().map_err(|_| Error::conversion(value, target))
}

/// Decimal or exponent form, or exactly `Infinity`, `-Infinity`, `+Infinity`
/// or `NaN`. Other spellings `FromStr` knows (`inf`, `nan`, ...) are rejected.
pub(crate) fn parse_float<T: std::str::FromStr>(value: &str, target: &'static str) -> Result<T> {
    let unsigned = value
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(value);
    let literal = matches!(unsigned, "Infinity" | "NaN");
    let decimal = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if literal || decimal {
        parse_number(value, target)
    } else {
        Err(Error::conversion(value, target))
    }
}

impl FromNode for bool {
    fn from_node(node: &Node) -> Result<Self> {
        parse_bool(node.value())
    }
}

impl FromNode for char {
    fn from_node(node: &Node) -> Result<Self> {
        parse_char(node.value())
    }
}

impl FromNode for String {
    fn from_node(node: &Node) -> Result<Self> {
        Ok(node.value().to_string())
    }
}

macro_rules! impl_from_node_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromNode for $ty {
                fn from_node(node: &Node) -> Result<Self> {
                    parse_number(node.value(), stringify!($ty))
                }
            }
        )*
    };
}

impl_from_node_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_from_node_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromNode for $ty {
                fn from_node(node: &Node) -> Result<Self> {
                    parse_float(node.value(), stringify!($ty))
                }
            }
        )*
    };
}

impl_from_node_float!(f32, f64);

/// Conversion from a Rust value to configuration text.
///
/// The returned text is unescaped; the builder decides whether it needs
/// quoting.
pub trait ToValue {
    fn to_value(&self) -> Cow<'_, str>;
}

impl ToValue for str {
    fn to_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Cow<'_, str> {
        (**self).to_value()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "on" } else { "off" })
    }
}

impl ToValue for char {
    fn to_value(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

macro_rules! impl_to_value_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_to_value_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_to_value_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Cow<'_, str> {
                    if self.is_nan() {
                        Cow::Borrowed("NaN")
                    } else if self.is_infinite() {
                        Cow::Borrowed(if *self > 0.0 { "Infinity" } else { "-Infinity" })
                    } else {
                        // Debug keeps the trailing ".0" and round-trips exactly.
                        Cow::Owned(format!("{:?}", self))
                    }
                }
            }
        )*
    };
}

impl_to_value_float!(f32, f64);
