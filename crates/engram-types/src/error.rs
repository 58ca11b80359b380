//! Error taxonomy spanning validation, coercion and storage.
//!
//! Validation and coercion failures are always returned to the immediate
//! caller — retrying unchanged invalid input cannot succeed, so nothing here
//! is retried automatically.  [`StorageError::Locked`] is the one condition a
//! caller may sensibly retry with backoff.

use thiserror::Error;

use crate::frame::Kind;

// ─────────────────────────────────────────────────────────────────────────────
// CoercionError
// ─────────────────────────────────────────────────────────────────────────────

/// A raw value could not be coerced into its required canonical shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The raw value's shape does not fit what the property requires
    /// (e.g. a list where a scalar is needed).
    #[error("property `{property}`: expected {expected}, got {actual}")]
    UnexpectedShape {
        property: String,
        expected: &'static str,
        actual: String,
    },
}

/// One field's coercion failure inside an aggregated validation report.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source}")]
pub struct FieldError {
    /// The offending property name.
    pub field: String,
    #[source]
    pub source: CoercionError,
}

// ─────────────────────────────────────────────────────────────────────────────
// ValidationError
// ─────────────────────────────────────────────────────────────────────────────

/// An entity failed schema validation; nothing was written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The entity name is empty after trimming.
    #[error("entity name is missing or empty")]
    MissingName,

    /// A kind-specific required field is absent or empty.
    #[error("{kind} entity is missing required field `{field}`")]
    MissingRequiredField { kind: Kind, field: &'static str },

    /// An identity already exists under a different kind; frames never
    /// change kind.
    #[error("identity `{identity}` already stored as {existing}, cannot re-add as {requested}")]
    KindConflict {
        identity: String,
        existing: Kind,
        requested: Kind,
    },

    /// One or more property values failed coercion.  Every failing field is
    /// reported in a single pass so callers see the whole problem at once.
    #[error("{} field(s) failed validation: {}", .0.len(), format_fields(.0))]
    FieldErrors(Vec<FieldError>),
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("`{}` ({})", e.field, e.source))
        .collect::<Vec<_>>()
        .join(", ")
}

// ─────────────────────────────────────────────────────────────────────────────
// StorageError
// ─────────────────────────────────────────────────────────────────────────────

/// A storage backend failed to persist, load or open.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend's native lock could not be acquired within the bounded
    /// wait.  Eligible for caller-directed retry with backoff.
    #[error("storage lock not acquired within the bounded wait")]
    Locked,

    /// Any read/write/serialization failure underneath the backend.
    #[error("storage I/O failure: {0}")]
    IoFailure(String),

    /// Opening the store required a migration that did not complete; fatal —
    /// there is no partial or degraded mode.
    #[error("schema migration failed: {0}")]
    MigrationFailed(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// StoreError
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level error for `FrameStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No frame matched the requested name or identity.  A normal, expected
    /// outcome of `get`, never a crash.
    #[error("no frame found for `{0}`")]
    NotFound(String),
}
