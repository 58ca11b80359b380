//! The stored frame record and its metadata.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Kind
// ─────────────────────────────────────────────────────────────────────────────

/// The memory classification of a frame.
///
/// A closed set: each kind carries its own required-field table inside the
/// schema validator rather than per-kind subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Kind {
    /// Facts and concepts with no inherent time component.
    #[default]
    Semantic,
    /// Timestamped events; requires `timestamp` and `action` properties.
    Episodic,
    /// Ordered how-to knowledge; requires a non-empty `steps` sequence.
    Procedural,
}

// Deserialization goes through `parse` so the wire surface accepts the same
// casings callers can use everywhere else.
impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Kind::parse(&raw).ok_or_else(|| {
            serde::de::Error::unknown_variant(&raw, &["Semantic", "Episodic", "Procedural"])
        })
    }
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Semantic => "Semantic",
            Kind::Episodic => "Episodic",
            Kind::Procedural => "Procedural",
        }
    }

    /// Parse a kind name case-insensitively (callers and NL extractors are
    /// inconsistent about capitalization).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "semantic" => Some(Kind::Semantic),
            "episodic" => Some(Kind::Episodic),
            "procedural" => Some(Kind::Procedural),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FrameMetadata
// ─────────────────────────────────────────────────────────────────────────────

/// Bookkeeping attached to every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMetadata {
    /// Wall-clock time at which the frame was first stored.
    pub created_at: DateTime<Utc>,
    /// Wall-clock time of the most recent mutation.
    pub updated_at: DateTime<Utc>,
    /// Source confidence in `[0.0, 1.0]`; `1.0` when the caller supplied none.
    pub confidence: f64,
    /// Monotonic counter, incremented on every mutation of the frame.
    pub revision: u64,
}

impl FrameMetadata {
    /// Fresh metadata for a newly validated frame.
    pub fn new(confidence: f64) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            confidence: confidence.clamp(0.0, 1.0),
            revision: 1,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame
// ─────────────────────────────────────────────────────────────────────────────

/// The atomic stored memory record: one entity, one kind.
///
/// Frames are only ever constructed through the schema-validation path in
/// `engram-schema`; `identity` and `kind` are immutable once assigned.
/// Relationship targets are plain identity strings and may reference frames
/// that do not exist yet (forward references) — resolution happens lazily at
/// query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Unique key within the store, derived from (or overriding) the
    /// human-readable entity name.
    pub identity: String,
    /// Memory classification; immutable once assigned.
    pub kind: Kind,
    /// Named, canonically typed properties.
    pub properties: BTreeMap<String, Value>,
    /// Relationship name → insertion-ordered, de-duplicated target identities.
    pub relationships: BTreeMap<String, Vec<String>>,
    /// Timestamps, confidence and revision counter.
    pub metadata: FrameMetadata,
}

impl Frame {
    /// `true` when this frame's content (kind, properties, relationships)
    /// equals `other`'s, ignoring metadata.  Used by round-trip checks where
    /// timestamps are regenerated.
    pub fn content_eq(&self, other: &Frame) -> bool {
        self.identity == other.identity
            && self.kind == other.kind
            && self.properties == other.properties
            && self.relationships == other.relationships
    }
}
