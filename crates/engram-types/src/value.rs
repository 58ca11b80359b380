//! The canonical typed value union.
//!
//! Every property stored on a frame is one of these variants.  Untyped caller
//! input never crosses into a frame directly; it is coerced into a [`Value`]
//! first (see `engram-schema`).
//!
//! # Wire shape
//!
//! Values serialize with an adjacent tag so that every variant survives a
//! round trip through any storage backend without tag loss:
//!
//! ```json
//! { "t": "integer", "v": 42 }
//! { "t": "float",   "v": 3.1 }
//! { "t": "list",    "v": [ { "t": "string", "v": "a" } ] }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A canonical typed property value.
///
/// `Set` is represented as an insertion-ordered, exactly de-duplicated
/// vector rather than a hash set: values contain floats and therefore cannot
/// be `Eq + Hash`, and callers observe set members in the order they were
/// first supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v", rename_all = "lowercase")]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Stable name of this value's type tag (used in override logs and in
    /// coercion error messages).
    pub fn tag_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Timestamp(_) => "timestamp",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// `true` when `other` carries the same type tag as `self`.
    pub fn same_tag(&self, other: &Value) -> bool {
        self.tag_name() == other.tag_name()
    }

    /// `true` for the scalar variants (everything except list/set/map).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Set(_) | Value::Map(_))
    }

    /// Borrow the inner string when this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render a scalar value as display text (used for relationship targets
    /// and procedural steps supplied as non-string scalars).
    pub fn scalar_to_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Timestamp(ts) => Some(ts.to_rfc3339()),
            Value::List(_) | Value::Set(_) | Value::Map(_) => None,
        }
    }
}
