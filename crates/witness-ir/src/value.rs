//! Tagged-union value tree
//!
//! A [`Data`] node pairs a [`Value`] with optional per-fragment HTTP metadata.
//! Values form an open-ended tree: primitives are leaves, every other variant
//! is a container of further [`Data`] nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::http::HttpMeta;

/// One node of a witness tree
///
/// Nodes reachable from a witness's args or responses may carry HTTP
/// metadata describing where the fragment was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    /// The value held by this node
    pub value: Value,

    /// HTTP metadata (location, response code)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<HttpMeta>,
}

impl Data {
    /// Create a node without metadata
    #[inline]
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value, meta: None }
    }

    /// Create a string primitive node
    #[inline]
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Value::Primitive(Primitive::string(value)))
    }

    /// Create a primitive node
    #[inline]
    #[must_use]
    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(Value::Primitive(primitive))
    }

    /// Create a struct node from `(name, node)` pairs
    #[must_use]
    pub fn structure<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Data)>,
        K: Into<String>,
    {
        Self::new(Value::Struct(Struct::from_fields(fields)))
    }

    /// Create a list node
    #[inline]
    #[must_use]
    pub fn list(elems: Vec<Data>) -> Self {
        Self::new(Value::List(List { elems }))
    }

    /// Create a present optional wrapping `inner`
    #[inline]
    #[must_use]
    pub fn some(inner: Data) -> Self {
        Self::new(Value::Optional(Optional::some(inner)))
    }

    /// Create an absent optional
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::new(Value::Optional(Optional::none()))
    }

    /// Create a oneof node from `(name, option)` pairs
    #[must_use]
    pub fn oneof<I, K>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, Data)>,
        K: Into<String>,
    {
        Self::new(Value::Oneof(Oneof {
            options: options.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }))
    }

    /// Attach HTTP metadata, returning the node
    #[inline]
    #[must_use]
    pub fn with_meta(mut self, meta: HttpMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// HTTP metadata, if any
    #[inline]
    #[must_use]
    pub fn http_meta(&self) -> Option<&HttpMeta> {
        self.meta.as_ref()
    }

    /// Mutable HTTP metadata, if any
    #[inline]
    pub fn http_meta_mut(&mut self) -> Option<&mut HttpMeta> {
        self.meta.as_mut()
    }

    /// Primitive payload, if this node is a leaf
    #[inline]
    #[must_use]
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match &self.value {
            Value::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Mutable primitive payload
    #[inline]
    pub fn as_primitive_mut(&mut self) -> Option<&mut Primitive> {
        match &mut self.value {
            Value::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Struct payload
    #[inline]
    #[must_use]
    pub fn as_struct(&self) -> Option<&Struct> {
        match &self.value {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable struct payload
    #[inline]
    pub fn as_struct_mut(&mut self) -> Option<&mut Struct> {
        match &mut self.value {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// String content, if this node is a string primitive
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_primitive().and_then(Primitive::as_str)
    }
}

/// Closed set of value shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Leaf value
    Primitive(Primitive),
    /// Named fields
    Struct(Struct),
    /// Ordered elements
    List(List),
    /// Present or absent wrapper
    Optional(Optional),
    /// Alternative options of a union-typed value
    Oneof(Oneof),
}

/// Leaf payload of a primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveValue {
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
    Int64(i64),
    Uint64(u64),
    Double(f64),
}

/// Leaf value with format annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Raw payload
    pub value: PrimitiveValue,

    /// Semantic subtype recorded by string categorization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,

    /// Custom format family (empty when untagged)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format_kind: String,

    /// Named format flags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub formats: BTreeMap<String, bool>,
}

impl Primitive {
    /// Untagged primitive holding `value`
    #[inline]
    #[must_use]
    pub fn new(value: PrimitiveValue) -> Self {
        Self {
            value,
            type_hint: None,
            format_kind: String::new(),
            formats: BTreeMap::new(),
        }
    }

    /// Untagged string primitive
    #[inline]
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(PrimitiveValue::String(value.into()))
    }

    /// String content, if any
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            PrimitiveValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check whether a named format flag is set
    #[inline]
    #[must_use]
    pub fn has_format(&self, name: &str) -> bool {
        self.formats.get(name).copied().unwrap_or(false)
    }
}

/// Mapping from field name to node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    /// Fields, unique by name
    #[serde(default)]
    pub fields: BTreeMap<String, Data>,
}

impl Struct {
    /// Build from `(name, node)` pairs; later duplicates replace earlier ones
    #[must_use]
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Data)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Ordered sequence of nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub elems: Vec<Data>,
}

/// Present/absent wrapper around one node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Optional {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<Data>>,
}

impl Optional {
    /// Present optional
    #[inline]
    #[must_use]
    pub fn some(inner: Data) -> Self {
        Self {
            value: Some(Box::new(inner)),
        }
    }

    /// Absent optional
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self { value: None }
    }
}

/// Alternative options of a union-typed node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Oneof {
    #[serde(default)]
    pub options: BTreeMap<String, Data>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpLocation;

    #[test]
    fn string_node_exposes_str() {
        let data = Data::string("hello");
        assert_eq!(data.as_str(), Some("hello"));
        assert!(data.as_struct().is_none());
    }

    #[test]
    fn non_string_primitive_has_no_str() {
        let data = Data::primitive(Primitive::new(PrimitiveValue::Int64(7)));
        assert!(data.as_primitive().is_some());
        assert_eq!(data.as_str(), None);
    }

    #[test]
    fn struct_fields_are_unique() {
        let data = Data::structure([("a", Data::string("1")), ("a", Data::string("2"))]);
        let s = data.as_struct().unwrap();
        assert_eq!(s.fields.len(), 1);
        assert_eq!(s.fields["a"].as_str(), Some("2"));
    }

    #[test]
    fn meta_is_attached() {
        let data = Data::string("x").with_meta(HttpMeta::new(HttpLocation::query("q")));
        assert_eq!(data.http_meta().and_then(HttpMeta::query_key), Some("q"));
    }

    #[test]
    fn format_flags_default_false() {
        let mut p = Primitive::string("x");
        assert!(!p.has_format("flag"));
        p.formats.insert("flag".to_string(), true);
        assert!(p.has_format("flag"));
    }

    #[test]
    fn value_serde_json_roundtrip() {
        let data = Data::structure([
            ("list", Data::list(vec![Data::string("a"), Data::none()])),
            ("opt", Data::some(Data::string("b"))),
        ]);
        let json = serde_json::to_string(&data).unwrap();
        let decoded: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(data, decoded);
    }
}
