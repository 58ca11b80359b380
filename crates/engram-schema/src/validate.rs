//! The single schema-validation entry point.
//!
//! `validate` is a pure function from a [`RawEntity`] to a well-typed
//! [`Frame`].  Every memory kind carries its own required-field table here;
//! dispatch happens through one entry point rather than per-kind types.
//!
//! # Required fields
//!
//! | kind       | field       | shape                                  |
//! |------------|-------------|----------------------------------------|
//! | Episodic   | `timestamp` | ISO-8601 string or numeric epoch       |
//! | Episodic   | `action`    | non-empty text                         |
//! | Procedural | `steps`     | non-empty ordered sequence of strings  |
//! | Semantic   | —           | nothing beyond name and kind           |
//!
//! Coercion failures across fields aggregate into a single
//! [`ValidationError::FieldErrors`] report so callers see every problem in
//! one pass.  Defaults are additive only and never override caller-supplied
//! values.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;
use tracing::debug;

use engram_types::{
    CoercionError, FieldError, Frame, FrameMetadata, Kind, RawEntity, ValidationError, Value,
};

use crate::coerce::{TypeHint, coerce};

/// Per-kind required-field table.
fn required_fields(kind: Kind) -> &'static [(&'static str, TypeHint)] {
    match kind {
        Kind::Semantic => &[],
        Kind::Episodic => &[("timestamp", TypeHint::Temporal), ("action", TypeHint::Text)],
        Kind::Procedural => &[("steps", TypeHint::Sequence)],
    }
}

/// Per-kind additive defaults, applied only when the caller supplied nothing.
fn kind_defaults(kind: Kind) -> &'static [(&'static str, &'static str)] {
    match kind {
        Kind::Episodic => &[("location", "")],
        Kind::Semantic | Kind::Procedural => &[],
    }
}

/// Validate a raw entity into a [`Frame`], or report exactly why it cannot be.
///
/// Pure over its input: no state is read or written, so a failed validation
/// can never leave partial effects anywhere.
pub fn validate(raw: &RawEntity) -> Result<Frame, ValidationError> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let identity = raw
        .identity
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(name)
        .to_string();
    let kind = raw.column;

    // Fold unrecognized top-level keys into the property map; explicit
    // `properties` entries win.  Null values mean "absent", never "clear".
    let mut raw_properties: BTreeMap<String, JsonValue> = BTreeMap::new();
    for (key, value) in raw.properties.iter().chain(raw.extra.iter()) {
        if value.is_null() {
            debug!(entity = %identity, property = %key, "skipping null property");
            continue;
        }
        raw_properties.entry(key.clone()).or_insert_with(|| value.clone());
    }

    let mut properties: BTreeMap<String, Value> = BTreeMap::new();
    let mut field_errors: Vec<FieldError> = Vec::new();

    // Required fields first: absence is its own error, distinct from a
    // present-but-malformed value.
    for &(field, hint) in required_fields(kind) {
        let Some(raw_value) = raw_properties.remove(field) else {
            return Err(ValidationError::MissingRequiredField { kind, field });
        };
        match coerce(field, &raw_value, Some(hint)) {
            Ok(value) => match check_required_content(kind, field, value) {
                Ok(value) => {
                    properties.insert(field.to_string(), value);
                }
                // Content-shape failures aggregate with the other fields;
                // emptiness stays an immediate missing-field error.
                Err(ValidationError::FieldErrors(errors)) => field_errors.extend(errors),
                Err(other) => return Err(other),
            },
            Err(source) => field_errors.push(FieldError {
                field: field.to_string(),
                source,
            }),
        }
    }

    // Everything else goes through pure inference.
    for (field, raw_value) in &raw_properties {
        match coerce(field, raw_value, None) {
            Ok(value) => {
                properties.insert(field.clone(), value);
            }
            Err(source) => field_errors.push(FieldError {
                field: field.clone(),
                source,
            }),
        }
    }

    // Relationships normalize to insertion-ordered, de-duplicated target
    // lists; targets may reference identities that do not exist yet.
    let mut relationships: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (relation, raw_targets) in &raw.relationships {
        match normalize_targets(relation, raw_targets) {
            Ok(targets) if targets.is_empty() => {}
            Ok(targets) => {
                relationships.insert(relation.clone(), targets);
            }
            Err(source) => field_errors.push(FieldError {
                field: relation.clone(),
                source,
            }),
        }
    }

    if !field_errors.is_empty() {
        return Err(ValidationError::FieldErrors(field_errors));
    }

    for &(field, default) in kind_defaults(kind) {
        properties
            .entry(field.to_string())
            .or_insert_with(|| Value::String(default.to_string()));
    }

    Ok(Frame {
        identity,
        kind,
        properties,
        relationships,
        metadata: FrameMetadata::new(raw.confidence.unwrap_or(1.0)),
    })
}

/// Enforce the non-emptiness half of the required-field contract and
/// canonicalize the stored shape (`steps` becomes a list of strings).
fn check_required_content(
    kind: Kind,
    field: &'static str,
    value: Value,
) -> Result<Value, ValidationError> {
    match (field, value) {
        ("action", Value::String(s)) if s.trim().is_empty() => {
            Err(ValidationError::MissingRequiredField { kind, field })
        }
        ("steps", Value::List(items)) | ("steps", Value::Set(items)) => {
            if items.is_empty() {
                return Err(ValidationError::MissingRequiredField { kind, field });
            }
            let mut steps = Vec::with_capacity(items.len());
            for item in &items {
                match item.scalar_to_text() {
                    Some(text) => steps.push(Value::String(text)),
                    None => {
                        return Err(ValidationError::FieldErrors(vec![FieldError {
                            field: field.to_string(),
                            source: CoercionError::UnexpectedShape {
                                property: field.to_string(),
                                expected: "sequence of text steps",
                                actual: item.tag_name().to_string(),
                            },
                        }]));
                    }
                }
            }
            Ok(Value::List(steps))
        }
        (_, value) => Ok(value),
    }
}

/// Normalize a relationship's raw targets: a bare string is a one-element
/// list, scalars render as text, order is kept and exact repeats collapse.
fn normalize_targets(relation: &str, raw: &JsonValue) -> Result<Vec<String>, CoercionError> {
    let items: Vec<JsonValue> = match raw {
        JsonValue::Array(items) => items.clone(),
        JsonValue::Null => Vec::new(),
        other => vec![other.clone()],
    };
    let mut targets: Vec<String> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("{relation}[{i}]");
        let text = match item {
            JsonValue::String(s) => s.trim().to_string(),
            JsonValue::Null => continue,
            other => match coerce(&path, other, None)?.scalar_to_text() {
                Some(text) => text,
                None => {
                    return Err(CoercionError::UnexpectedShape {
                        property: path,
                        expected: "relationship target identity",
                        actual: "collection".to_string(),
                    });
                }
            },
        };
        if !text.is_empty() && !targets.iter().any(|t| t == &text) {
            targets.push(text);
        }
    }
    Ok(targets)
}
