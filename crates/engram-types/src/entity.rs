//! The loosely-typed input shape accepted by the store.
//!
//! A [`RawEntity`] is what callers — human code or the NL-extraction
//! collaborator — hand to `FrameStore::add`.  Nothing about its provenance is
//! trusted: every entity is revalidated and coerced on the way in.
//!
//! # Wire shape
//!
//! ```json
//! {
//!     "column": "Semantic",
//!     "name": "Python_Language",
//!     "properties": { "creator": "Guido van Rossum", "year": "1991" },
//!     "relationships": { "used_for": ["Web_Development", "Data_Science"] }
//! }
//! ```
//!
//! `column` names the memory kind (the historical wire field name).  Any
//! unrecognized top-level key — `timestamp`, `action`, `steps` supplied at
//! the top level are the common cases — is folded into `properties` during
//! validation, with explicit `properties` entries taking precedence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::frame::Kind;

/// An untrusted, loosely-typed entity description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntity {
    /// Human-readable entity name; becomes the identity unless `identity`
    /// is supplied explicitly.
    pub name: String,

    /// Memory kind, under its historical wire name.
    pub column: Kind,

    /// Explicit identity override.  Rarely used; `name` is the normal key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    /// Source confidence in `[0.0, 1.0]`.  Defaults to `1.0` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Arbitrary key/value properties, coerced during validation.
    #[serde(default)]
    pub properties: BTreeMap<String, JsonValue>,

    /// Relationship name → target name(s); a bare string is accepted as a
    /// single-element list.
    #[serde(default)]
    pub relationships: BTreeMap<String, JsonValue>,

    /// Unrecognized top-level keys, folded into `properties` at validation
    /// time.
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl RawEntity {
    /// Start a new entity description with the given name and kind.
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            column: kind,
            ..Self::default()
        }
    }

    /// Attach a property (builder style).
    pub fn with_property(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Attach a relationship (builder style).
    pub fn with_relationship(mut self, relation: impl Into<String>, targets: JsonValue) -> Self {
        self.relationships.insert(relation.into(), targets);
        self
    }

    /// Set the source confidence (builder style).
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}
