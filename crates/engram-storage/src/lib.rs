//! `engram-storage` – Persistence Backends.
//!
//! One [`StorageBackend`] interface, two independent implementations chosen
//! at store construction time:
//!
//! - [`durable`] – [`DurableBackend`][durable::DurableBackend]: transactional
//!   SQLite storage (one atomic transaction per persist, versioned additive
//!   schema migrations, cross-process safety via SQLite's native file
//!   locking with a bounded busy wait).
//! - [`ephemeral`] – [`EphemeralBackend`][ephemeral::EphemeralBackend]: a
//!   single JSON document rewritten whole on every persist.  Single-process,
//!   low-volume use only.
//!
//! Both backends round-trip every [`Value`][engram_types::Value] tag
//! losslessly: a `Float` written always reads back as a `Float`.

pub mod backend;
pub mod durable;
pub mod ephemeral;

pub use backend::StorageBackend;
pub use durable::DurableBackend;
pub use ephemeral::EphemeralBackend;
