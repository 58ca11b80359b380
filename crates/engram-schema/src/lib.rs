//! `engram-schema` – Validation & Type Inference.
//!
//! The strict boundary between loosely-typed caller input and the canonical
//! frame model.  Untyped data never crosses into a [`Frame`][engram_types::Frame]
//! uncoerced: everything funnels through [`validate`], which in turn drives
//! the coercion rules in [`coerce`].
//!
//! # Modules
//!
//! - [`coerce`] – [`coerce`][coerce::coerce]: infers or coerces a raw JSON
//!   value into a canonical [`Value`][engram_types::Value], with an ordered
//!   rule set and optional shape hints.
//! - [`validate`] – [`validate`][validate::validate]: the single validation
//!   entry point.  Enforces per-kind required fields, aggregates every field
//!   failure into one report, applies additive defaults and normalizes
//!   relationship targets.  Pure: no partial writes on failure.

pub mod coerce;
pub mod validate;

pub use coerce::{TypeHint, coerce};
pub use validate::validate;
