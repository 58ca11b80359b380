//! `engram-types` – Shared Data Model.
//!
//! The vocabulary every other `engram` crate speaks: memory kinds, the
//! canonical typed [`Value`] union, the stored [`Frame`] record, the
//! loosely-typed [`RawEntity`] input shape, and the full error taxonomy.
//!
//! # Modules
//!
//! - [`value`] – [`Value`][value::Value]: the tagged union every stored
//!   property is coerced into.  Serialized with an adjacent tag so that a
//!   `Float` written to disk always reads back as a `Float`, never a string.
//! - [`frame`] – [`Frame`][frame::Frame] / [`FrameMetadata`][frame::FrameMetadata]:
//!   the atomic stored memory record (one entity, one kind) together with its
//!   bookkeeping metadata (timestamps, confidence, revision counter).
//! - [`entity`] – [`RawEntity`][entity::RawEntity]: the untrusted key/value
//!   input shape accepted from callers and NL-extraction collaborators alike.
//! - [`error`] – the error taxonomy: validation, coercion and storage errors
//!   plus the top-level [`StoreError`][error::StoreError].

pub mod entity;
pub mod error;
pub mod frame;
pub mod value;

pub use entity::RawEntity;
pub use error::{CoercionError, FieldError, StorageError, StoreError, ValidationError};
pub use frame::{Frame, FrameMetadata, Kind};
pub use value::Value;
