//! Deserializing Rust types from a parsed configuration tree.
//!
//! This module provides a serde [`Deserializer`] over a borrowed [`Node`].
//!
//! ## Mapping
//!
//! - A section is a map keyed by child name. Children that share a name form a
//!   group: a group deserializes as a sequence when the target is a `Vec`,
//!   and as its first member otherwise (the same node [`Node::query`] finds).
//! - A non-empty section tag is available under the key `$value`.
//! - A leaf is a scalar and converts like [`FromNode`](crate::FromNode):
//!   `on`/`off` booleans, base-10 integers, `Infinity`/`NaN` floats.
//! - A missing child leaves an `Option` field as `None`.
//! - Enums are read from unit variant names.
//!
//! ## Usage
//!
//! ```rust
//! use braceconf::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Database {
//!     #[serde(rename = "$value")]
//!     name: String,
//!     #[serde(rename = "type")]
//!     kind: String,
//!     node: Vec<Node>,
//! }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Node {
//!     #[serde(rename = "$value")]
//!     id: String,
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config {
//!     database: Database,
//! }
//!
//! let text = "database testdb {
//!     type elasticsearch;
//!     node node-00 { host 192.168.1.10; port 9200; }
//!     node node-01 { host 192.168.1.11; port 9200; }
//! }";
//! let config: Config = from_str(text).unwrap();
//! assert_eq!(config.database.name, "testdb");
//! assert_eq!(config.database.node[1].host, "192.168.1.11");
//! ```

use crate::convert::{parse_bool, parse_char, parse_float, parse_number};
use crate::{Error, Node, Result};
use indexmap::IndexMap;
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, IntoDeserializer};

/// Key under which a section's tag is exposed.
pub const TAG_KEY: &str = "$value";

/// Deserializes from a borrowed [`Node`].
pub struct Deserializer<'de> {
    node: &'de Node,
}

impl<'de> Deserializer<'de> {
    pub fn new(node: &'de Node) -> Self {
        Deserializer { node }
    }
}

/// Deserializes a single scalar: a leaf value or a section tag.
struct ScalarDeserializer<'de> {
    value: &'de str,
}

impl<'de> ScalarDeserializer<'de> {
    fn new(value: &'de str) -> Self {
        ScalarDeserializer { value }
    }

    fn expected_section(&self) -> Error {
        Error::custom(format!("expected a section, found value {:?}", self.value))
    }
}

macro_rules! scalar_numbers {
    ($($method:ident => $visit:ident: $ty:ty = $parse:ident),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit($parse::<$ty>(self.value, stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ScalarDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(parse_bool(self.value)?)
    }

    scalar_numbers! {
        deserialize_i8 => visit_i8: i8 = parse_number,
        deserialize_i16 => visit_i16: i16 = parse_number,
        deserialize_i32 => visit_i32: i32 = parse_number,
        deserialize_i64 => visit_i64: i64 = parse_number,
        deserialize_i128 => visit_i128: i128 = parse_number,
        deserialize_u8 => visit_u8: u8 = parse_number,
        deserialize_u16 => visit_u16: u16 = parse_number,
        deserialize_u32 => visit_u32: u32 = parse_number,
        deserialize_u64 => visit_u64: u64 = parse_number,
        deserialize_u128 => visit_u128: u128 = parse_number,
        deserialize_f32 => visit_f32: f32 = parse_float,
        deserialize_f64 => visit_f64: f64 = parse_float,
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_char(parse_char(self.value)?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.value.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.expected_section())
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.expected_section())
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.expected_section())
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.expected_section())
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.expected_section())
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::new(self.value))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

macro_rules! forward_to_scalar {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(ScalarDeserializer::new(self.node.value()), visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_leaf() {
            visitor.visit_borrowed_str(self.node.value())
        } else {
            visitor.visit_map(SectionAccess::new(self.node))
        }
    }

    forward_to_scalar! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_identifier
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_leaf() {
            return Err(ScalarDeserializer::new(self.node.value()).expected_section());
        }
        visitor.visit_seq(NodeSeq::new(self.node.children().iter()))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_leaf() {
            return Err(ScalarDeserializer::new(self.node.value()).expected_section());
        }
        visitor.visit_map(SectionAccess::new(self.node))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::new(self.node.value()))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Children sharing one name inside a section.
struct GroupDeserializer<'de> {
    nodes: Vec<&'de Node>,
}

impl<'de> GroupDeserializer<'de> {
    fn first(&self) -> Result<Deserializer<'de>> {
        self.nodes
            .first()
            .copied()
            .map(Deserializer::new)
            .ok_or_else(|| Error::custom("empty node group"))
    }
}

macro_rules! forward_to_first {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(self.first()?, visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for GroupDeserializer<'de> {
    type Error = Error;

    forward_to_first! {
        deserialize_any deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32
        deserialize_i64 deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32
        deserialize_u64 deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char
        deserialize_str deserialize_string deserialize_bytes deserialize_byte_buf
        deserialize_unit deserialize_map deserialize_identifier deserialize_ignored_any
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit_struct(self.first()?, name, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(NodeSeq::new(self.nodes.into_iter()))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(self.first()?, name, fields, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_enum(self.first()?, name, variants, visitor)
    }
}

struct NodeSeq<I> {
    iter: I,
}

impl<I> NodeSeq<I> {
    fn new(iter: I) -> Self {
        NodeSeq { iter }
    }
}

impl<'de, I> de::SeqAccess<'de> for NodeSeq<I>
where
    I: ExactSizeIterator<Item = &'de Node>,
{
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed.deserialize(Deserializer::new(node)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

enum Pending<'de> {
    Tag(&'de str),
    Group(Vec<&'de Node>),
}

struct SectionAccess<'de> {
    tag: Option<&'de str>,
    groups: indexmap::map::IntoIter<&'de str, Vec<&'de Node>>,
    pending: Option<Pending<'de>>,
}

impl<'de> SectionAccess<'de> {
    fn new(node: &'de Node) -> Self {
        let mut groups: IndexMap<&'de str, Vec<&'de Node>> = IndexMap::new();
        for child in node.children() {
            groups.entry(child.name()).or_default().push(child);
        }

        SectionAccess {
            tag: Some(node.value()).filter(|tag| !tag.is_empty()),
            groups: groups.into_iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for SectionAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if let Some(tag) = self.tag.take() {
            self.pending = Some(Pending::Tag(tag));
            return seed.deserialize(TAG_KEY.into_deserializer()).map(Some);
        }

        match self.groups.next() {
            Some((name, nodes)) => {
                self.pending = Some(Pending::Group(nodes));
                seed.deserialize(BorrowedStrDeserializer::new(name)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some(Pending::Tag(tag)) => seed.deserialize(ScalarDeserializer::new(tag)),
            Some(Pending::Group(nodes)) => seed.deserialize(GroupDeserializer { nodes }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.groups.len() + usize::from(self.tag.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    fn from_text<T: de::DeserializeOwned>(text: &str) -> Result<T> {
        let root = parse(text)?;
        T::deserialize(Deserializer::new(&root))
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Listen {
        #[serde(rename = "$value")]
        address: String,
        port: u16,
        ssl: Option<bool>,
    }

    #[test]
    fn test_section_tag_and_leaves() {
        let listen: BTreeMap<String, Listen> =
            from_text("listen main { port 443; ssl on; }").unwrap();
        assert_eq!(
            listen["listen"],
            Listen {
                address: "main".into(),
                port: 443,
                ssl: Some(true),
            }
        );
    }

    #[test]
    fn test_missing_option_is_none() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Root {
            listen: Listen,
        }
        let root: Root = from_text("listen \"0.0.0.0\" { port 80; }").unwrap();
        assert_eq!(root.listen.ssl, None);
        assert_eq!(root.listen.address, "0.0.0.0");
    }

    #[test]
    fn test_group_as_first_or_all() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct First {
            server: String,
        }
        #[derive(Deserialize, Debug, PartialEq)]
        struct All {
            server: Vec<String>,
        }

        let text = "server a; server b; server c;";
        assert_eq!(from_text::<First>(text).unwrap().server, "a");
        assert_eq!(from_text::<All>(text).unwrap().server, ["a", "b", "c"]);
        assert_eq!(from_text::<All>("server a;").unwrap().server, ["a"]);
    }

    #[test]
    fn test_root_as_sequence() {
        let values: Vec<String> = from_text("a 1; b 2; c \"3 3\";").unwrap();
        assert_eq!(values, ["1", "2", "3 3"]);
    }

    #[test]
    fn test_unit_enum() {
        #[derive(Deserialize, Debug, PartialEq)]
        #[serde(rename_all = "lowercase")]
        enum Level {
            Debug,
            Warn,
        }
        #[derive(Deserialize, Debug, PartialEq)]
        struct Log {
            level: Level,
        }
        assert_eq!(from_text::<Log>("level warn;").unwrap().level, Level::Warn);
        assert!(from_text::<Log>("level loud;").is_err());
    }

    #[test]
    fn test_conversion_errors_surface() {
        #[derive(Deserialize, Debug)]
        struct Port {
            #[allow(dead_code)]
            port: u16,
        }
        let err = from_text::<Port>("port 70000;").unwrap_err();
        assert_eq!(
            err,
            Error::Conversion {
                value: "70000".into(),
                target: "u16"
            }
        );
    }

    #[test]
    fn test_leaf_is_not_a_section() {
        #[derive(Deserialize, Debug)]
        struct Outer {
            #[allow(dead_code)]
            inner: Vec<BTreeMap<String, String>>,
        }
        assert!(from_text::<Outer>("inner x;").is_err());
    }

    #[test]
    fn test_any_yields_nested_maps() {
        let value: BTreeMap<String, BTreeMap<String, String>> =
            from_text("events { worker_connections 1024; use epoll; }").unwrap();
        assert_eq!(value["events"]["use"], "epoll");
        assert_eq!(value["events"]["worker_connections"], "1024");
    }
}
