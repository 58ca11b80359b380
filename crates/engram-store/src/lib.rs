//! `engram-store` – Frame Store Orchestration.
//!
//! The public face of the memory store.  Wires the schema validator, the
//! relationship graph and a storage backend into one synchronized
//! create/read/update/delete surface.
//!
//! # Modules
//!
//! - [`store`] – [`FrameStore`][store::FrameStore]: the orchestrator.  Every
//!   public operation serializes through one exclusive lock around the
//!   validate→merge→persist sequence; the in-memory view and the durable
//!   view never diverge from the caller's perspective.
//! - [`graph`] – [`RelationshipGraph`][graph::RelationshipGraph]: named
//!   relationship edges between frame identities, with lazy forward-reference
//!   resolution at query time.
//! - [`config`] – [`StoreConfig`][config::StoreConfig]: TOML-persisted
//!   configuration (backend choice, path, lock wait) with `ENGRAM_*`
//!   environment overrides.

pub mod config;
pub mod graph;
pub mod store;

pub use config::{BackendChoice, StoreConfig};
pub use graph::{RelationshipGraph, Resolution};
pub use store::FrameStore;
