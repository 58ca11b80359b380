//! Type inference and coercion of raw values.
//!
//! Rules are applied in order, first match wins:
//!
//! 1. Already-canonical input (the adjacently tagged wire shape of
//!    [`Value`]) passes through unchanged.
//! 2. A temporal target (`timestamp` field name or an explicit
//!    [`TypeHint::Temporal`]) accepts ISO-8601 strings and numeric epochs.
//! 3. A numeric-looking string becomes `Integer` when it has no fractional
//!    or exponent part, otherwise `Float`.
//! 4. `"true"` / `"false"` (case-insensitive) becomes `Boolean`.
//! 5. A sequence becomes `List` with recursively coerced elements.
//! 6. A mapping becomes `Map` with recursively coerced values.
//! 7. Anything else stays `String`.
//!
//! Failures never produce silently-wrong values: a shape mismatch returns
//! [`CoercionError::UnexpectedShape`] naming the property and the
//! expected/actual shapes.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value as JsonValue;

use engram_types::{CoercionError, Value};

/// Declared shape expectation for a property.
///
/// Hints come from the per-kind required-field tables in
/// [`validate`][crate::validate]; most properties carry no hint and go
/// through pure inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    /// The property holds a point in time.
    Temporal,
    /// The property holds non-empty display text.
    Text,
    /// The property holds an ordered sequence.
    Sequence,
}

/// Coerce `raw` into a canonical [`Value`] for the named property.
///
/// The field name `timestamp` implies [`TypeHint::Temporal`] even when no
/// explicit hint is given; no other field name is guessed at, so tags stay
/// stable across revisions.
pub fn coerce(
    property: &str,
    raw: &JsonValue,
    hint: Option<TypeHint>,
) -> Result<Value, CoercionError> {
    let hint = hint.or_else(|| (property == "timestamp").then_some(TypeHint::Temporal));

    // Rule 1: canonical pass-through.
    if let Some(value) = try_canonical(raw) {
        return apply_hint(property, value, hint);
    }

    match hint {
        Some(TypeHint::Temporal) => coerce_temporal(property, raw),
        Some(TypeHint::Text) => coerce_text(property, raw),
        Some(TypeHint::Sequence) => match raw {
            JsonValue::Array(items) => coerce_sequence(property, items),
            other => Err(unexpected(property, "sequence", other)),
        },
        None => coerce_auto(property, raw),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Canonical pass-through
// ─────────────────────────────────────────────────────────────────────────────

/// Recognize the tagged wire shape `{ "t": ..., "v": ... }` and deserialize
/// it back into a [`Value`] directly.  Anything else returns `None` and
/// falls through to inference.
fn try_canonical(raw: &JsonValue) -> Option<Value> {
    let obj = raw.as_object()?;
    if obj.len() != 2 || !obj.contains_key("t") || !obj.contains_key("v") {
        return None;
    }
    serde_json::from_value::<Value>(raw.clone()).ok()
}

/// Re-check a passed-through canonical value against the declared hint.
fn apply_hint(
    property: &str,
    value: Value,
    hint: Option<TypeHint>,
) -> Result<Value, CoercionError> {
    match hint {
        None => Ok(value),
        Some(TypeHint::Temporal) => match value {
            Value::Timestamp(_) => Ok(value),
            Value::Integer(secs) => Ok(Value::Timestamp(epoch_from_secs(property, secs as f64)?)),
            Value::Float(secs) => Ok(Value::Timestamp(epoch_from_secs(property, secs)?)),
            other => Err(CoercionError::UnexpectedShape {
                property: property.to_string(),
                expected: "timestamp",
                actual: other.tag_name().to_string(),
            }),
        },
        Some(TypeHint::Text) => match value.scalar_to_text() {
            Some(text) => Ok(Value::String(text)),
            None => Err(CoercionError::UnexpectedShape {
                property: property.to_string(),
                expected: "text",
                actual: value.tag_name().to_string(),
            }),
        },
        Some(TypeHint::Sequence) => match value {
            Value::List(_) | Value::Set(_) => Ok(value),
            other => Err(CoercionError::UnexpectedShape {
                property: property.to_string(),
                expected: "sequence",
                actual: other.tag_name().to_string(),
            }),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inference
// ─────────────────────────────────────────────────────────────────────────────

/// Text-hinted coercion: scalars render as display text, collections are a
/// shape error.  Unlike pure inference, a numeric-looking string stays text.
fn coerce_text(property: &str, raw: &JsonValue) -> Result<Value, CoercionError> {
    match raw {
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Bool(b) => Ok(Value::String(b.to_string())),
        JsonValue::Number(n) => Ok(Value::String(n.to_string())),
        other => Err(unexpected(property, "text", other)),
    }
}

fn coerce_auto(property: &str, raw: &JsonValue) -> Result<Value, CoercionError> {
    match raw {
        JsonValue::Null => Err(unexpected(property, "non-null value", raw)),
        JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
        JsonValue::Number(n) => Ok(coerce_number(n)),
        JsonValue::String(s) => Ok(coerce_string(s)),
        JsonValue::Array(items) => coerce_sequence(property, items),
        JsonValue::Object(map) => {
            let mut out = BTreeMap::new();
            for (key, value) in map {
                let path = format!("{property}.{key}");
                out.insert(key.clone(), coerce(&path, value, None)?);
            }
            Ok(Value::Map(out))
        }
    }
}

fn coerce_number(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else {
        Value::Float(n.as_f64().unwrap_or(0.0))
    }
}

fn coerce_string(s: &str) -> Value {
    let trimmed = s.trim();
    if looks_integer(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        // Out of i64 range; fall through to the float path below.
    }
    if looks_numeric(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    Value::String(s.to_string())
}

fn coerce_sequence(property: &str, items: &[JsonValue]) -> Result<Value, CoercionError> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("{property}[{i}]");
        out.push(coerce(&path, item, None)?);
    }
    Ok(Value::List(out))
}

/// Optional sign followed by digits only: the integer form.
fn looks_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Restricted numeric alphabet with at least one digit, so words like
/// `"inf"` and `"nan"` (which `f64::from_str` would happily accept) stay
/// strings.
fn looks_numeric(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

// ─────────────────────────────────────────────────────────────────────────────
// Temporal coercion
// ─────────────────────────────────────────────────────────────────────────────

fn coerce_temporal(property: &str, raw: &JsonValue) -> Result<Value, CoercionError> {
    match raw {
        JsonValue::Number(n) => {
            let secs = n.as_f64().unwrap_or(0.0);
            Ok(Value::Timestamp(epoch_from_secs(property, secs)?))
        }
        JsonValue::String(s) => {
            let trimmed = s.trim();
            if let Some(ts) = parse_iso8601(trimmed) {
                return Ok(Value::Timestamp(ts));
            }
            if looks_numeric(trimmed) {
                if let Ok(secs) = trimmed.parse::<f64>() {
                    return Ok(Value::Timestamp(epoch_from_secs(property, secs)?));
                }
            }
            Err(unexpected(property, "ISO-8601 or numeric epoch timestamp", raw))
        }
        other => Err(unexpected(property, "ISO-8601 or numeric epoch timestamp", other)),
    }
}

fn epoch_from_secs(property: &str, secs: f64) -> Result<DateTime<Utc>, CoercionError> {
    // Euclidean split keeps the fraction non-negative, so pre-1970 epochs
    // like -1.5 land at -2s + 0.5s rather than one second late.
    let whole = secs.div_euclid(1.0) as i64;
    let nanos = (secs.rem_euclid(1.0) * 1e9) as u32;
    DateTime::from_timestamp(whole, nanos).ok_or_else(|| CoercionError::UnexpectedShape {
        property: property.to_string(),
        expected: "epoch seconds within the representable range",
        actual: format!("{secs}"),
    })
}

fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn unexpected(property: &str, expected: &'static str, actual: &JsonValue) -> CoercionError {
    CoercionError::UnexpectedShape {
        property: property.to_string(),
        expected,
        actual: shape_of(actual).to_string(),
    }
}

fn shape_of(raw: &JsonValue) -> &'static str {
    match raw {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "sequence",
        JsonValue::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    // ── scalar inference ─────────────────────────────────────────────────────

    #[test]
    fn integer_string_becomes_integer() {
        assert_eq!(coerce("year", &json!("1991"), None).unwrap(), Value::Integer(1991));
        assert_eq!(coerce("delta", &json!("-42"), None).unwrap(), Value::Integer(-42));
    }

    #[test]
    fn fractional_string_becomes_float() {
        assert_eq!(coerce("accel", &json!("3.1"), None).unwrap(), Value::Float(3.1));
        assert_eq!(coerce("big", &json!("1e6"), None).unwrap(), Value::Float(1e6));
    }

    #[test]
    fn boolean_strings_become_boolean() {
        assert_eq!(coerce("ok", &json!("true"), None).unwrap(), Value::Boolean(true));
        assert_eq!(coerce("ok", &json!("FALSE"), None).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn native_json_types_pass_through() {
        assert_eq!(coerce("n", &json!(7), None).unwrap(), Value::Integer(7));
        assert_eq!(coerce("f", &json!(2.5), None).unwrap(), Value::Float(2.5));
        assert_eq!(coerce("b", &json!(false), None).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn plain_words_stay_strings() {
        assert_eq!(
            coerce("color", &json!("red"), None).unwrap(),
            Value::String("red".to_string())
        );
        // f64::from_str would accept these; we must not.
        assert_eq!(coerce("x", &json!("inf"), None).unwrap(), Value::String("inf".to_string()));
        assert_eq!(coerce("x", &json!("nan"), None).unwrap(), Value::String("nan".to_string()));
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        let huge = "99999999999999999999";
        match coerce("n", &json!(huge), None).unwrap() {
            Value::Float(f) => assert!(f > 9.9e19),
            other => panic!("expected float, got {other:?}"),
        }
    }

    // ── temporal ─────────────────────────────────────────────────────────────

    #[test]
    fn timestamp_field_name_implies_temporal() {
        let expected = Utc.with_ymd_and_hms(2024, 4, 25, 0, 26, 40).unwrap();
        assert_eq!(
            coerce("timestamp", &json!(1714004800), None).unwrap(),
            Value::Timestamp(expected)
        );
    }

    #[test]
    fn iso8601_string_with_temporal_hint() {
        let got = coerce("timestamp", &json!("2024-05-01T12:30:00Z"), Some(TypeHint::Temporal))
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(got, Value::Timestamp(expected));
    }

    #[test]
    fn bare_date_accepted_as_midnight_utc() {
        let got = coerce("timestamp", &json!("2024-05-01"), None).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(got, Value::Timestamp(expected));
    }

    #[test]
    fn epoch_without_temporal_context_stays_integer() {
        // Same digits, different field name: no temporal guessing.
        assert_eq!(
            coerce("mileage", &json!(1714004800), None).unwrap(),
            Value::Integer(1714004800)
        );
    }

    #[test]
    fn negative_fractional_epoch_keeps_its_fraction() {
        let got = coerce("timestamp", &json!(-1.5), None).unwrap();
        let expected = DateTime::from_timestamp(-2, 500_000_000).unwrap();
        assert_eq!(got, Value::Timestamp(expected));

        let got = coerce("timestamp", &json!(2.25), None).unwrap();
        let expected = DateTime::from_timestamp(2, 250_000_000).unwrap();
        assert_eq!(got, Value::Timestamp(expected));
    }

    #[test]
    fn garbage_temporal_input_is_rejected() {
        let err = coerce("timestamp", &json!("yesterday-ish"), None).unwrap_err();
        assert!(matches!(err, CoercionError::UnexpectedShape { .. }));
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn list_rejected_where_timestamp_required() {
        let err = coerce("timestamp", &json!([1, 2]), None).unwrap_err();
        let CoercionError::UnexpectedShape { actual, .. } = err;
        assert_eq!(actual, "sequence");
    }

    // ── hints ────────────────────────────────────────────────────────────────

    #[test]
    fn text_hint_accepts_scalars_rejects_collections() {
        assert_eq!(
            coerce("action", &json!("reviewed code"), Some(TypeHint::Text)).unwrap(),
            Value::String("reviewed code".to_string())
        );
        let err = coerce("action", &json!({"verb": "review"}), Some(TypeHint::Text)).unwrap_err();
        assert!(matches!(err, CoercionError::UnexpectedShape { .. }));
    }

    #[test]
    fn sequence_hint_rejects_scalars() {
        let err = coerce("steps", &json!("just one step"), Some(TypeHint::Sequence)).unwrap_err();
        let CoercionError::UnexpectedShape { expected, actual, .. } = err;
        assert_eq!(expected, "sequence");
        assert_eq!(actual, "string");
    }

    // ── collections ──────────────────────────────────────────────────────────

    #[test]
    fn sequences_coerce_recursively() {
        let got = coerce("specs", &json!(["358", "3.1", "fast"]), None).unwrap();
        assert_eq!(
            got,
            Value::List(vec![
                Value::Integer(358),
                Value::Float(3.1),
                Value::String("fast".to_string()),
            ])
        );
    }

    #[test]
    fn mappings_coerce_recursively() {
        let got = coerce("engine", &json!({"horsepower": "283", "electric": "true"}), None)
            .unwrap();
        match got {
            Value::Map(map) => {
                assert_eq!(map.get("horsepower"), Some(&Value::Integer(283)));
                assert_eq!(map.get("electric"), Some(&Value::Boolean(true)));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn nested_errors_carry_the_property_path() {
        let err = coerce("spec", &json!({"inner": null}), None).unwrap_err();
        let CoercionError::UnexpectedShape { property, .. } = err;
        assert_eq!(property, "spec.inner");
    }

    // ── canonical pass-through ───────────────────────────────────────────────

    #[test]
    fn tagged_wire_shape_passes_through() {
        let raw = serde_json::to_value(Value::Float(2.5)).unwrap();
        assert_eq!(coerce("x", &raw, None).unwrap(), Value::Float(2.5));

        let raw = serde_json::to_value(Value::Set(vec![Value::Integer(1)])).unwrap();
        assert_eq!(coerce("x", &raw, None).unwrap(), Value::Set(vec![Value::Integer(1)]));
    }

    #[test]
    fn tagged_integer_under_temporal_hint_converts() {
        let raw = serde_json::to_value(Value::Integer(1714004800)).unwrap();
        let got = coerce("timestamp", &raw, None).unwrap();
        assert!(matches!(got, Value::Timestamp(_)));
    }

    #[test]
    fn two_key_map_that_is_not_tagged_stays_a_map() {
        let got = coerce("x", &json!({"t": "shirt", "v": "neck"}), None).unwrap();
        // "t" is not a valid tag, so this is an ordinary map.
        match got {
            Value::Map(map) => assert_eq!(map.len(), 2),
            other => panic!("expected map, got {other:?}"),
        }
    }
}
