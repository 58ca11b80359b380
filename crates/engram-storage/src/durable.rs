//! Transactional SQLite backend.
//!
//! # Storage layout
//!
//! One row per frame in the `frames` table:
//!
//! | column        | type    | description                                   |
//! |---------------|---------|-----------------------------------------------|
//! | identity      | TEXT    | Unique frame identity (primary key)           |
//! | kind          | TEXT    | `Semantic` / `Episodic` / `Procedural`        |
//! | properties    | TEXT    | Type-tagged JSON encoding of the property map |
//! | relationships | TEXT    | JSON map of relation → ordered target list    |
//! | revision      | INTEGER | Monotonic mutation counter                    |
//! | created_at    | TEXT    | RFC-3339 creation time (UTC)                  |
//! | updated_at    | TEXT    | RFC-3339 last-mutation time (UTC)             |
//! | confidence    | REAL    | Source confidence in `[0, 1]` (schema v2)     |
//!
//! A `schema_meta` table records the schema version.  Opening a store
//! created by an older version runs the additive migration chain once, inside
//! a transaction; a failed migration is fatal to the open — there is no
//! partial or degraded mode.
//!
//! # Concurrency
//!
//! Concurrent opens from multiple processes are serialized by SQLite's
//! native file locking.  A write that cannot acquire the lock within the
//! configured busy wait fails with [`StorageError::Locked`] instead of
//! blocking indefinitely.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, params};
use tracing::{debug, info};

use engram_types::{Frame, FrameMetadata, Kind, StorageError};

use crate::backend::StorageBackend;

/// Schema version written by this build.
const SCHEMA_VERSION: i64 = 2;

/// Default bounded wait for SQLite's file lock.
pub const DEFAULT_LOCK_WAIT: Duration = Duration::from_millis(5_000);

/// ACID, on-disk storage backend over SQLite.
#[derive(Debug)]
pub struct DurableBackend {
    conn: Connection,
}

impl DurableBackend {
    /// Open (or create) a durable store at `path`, running any pending
    /// schema migration first.  `lock_wait` bounds how long any statement
    /// waits on SQLite's file lock before failing with
    /// [`StorageError::Locked`].
    pub fn open(path: &Path, lock_wait: Duration) -> Result<Self, StorageError> {
        let mut conn = Connection::open(path).map_err(map_sqlite)?;
        conn.busy_timeout(lock_wait).map_err(map_sqlite)?;
        migrate(&mut conn)?;
        debug!(path = %path.display(), "opened durable frame store");
        Ok(Self { conn })
    }

    /// Open a temporary in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let mut conn = Connection::open_in_memory().map_err(map_sqlite)?;
        migrate(&mut conn)?;
        Ok(Self { conn })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration
// ─────────────────────────────────────────────────────────────────────────────

/// Bring the on-disk schema up to [`SCHEMA_VERSION`].
///
/// Every step is additive (new tables or new columns with defaults), never
/// destructive, so an older store's rows survive unchanged.  The whole chain
/// runs inside one transaction.
fn migrate(conn: &mut Connection) -> Result<(), StorageError> {
    let failed = |e: rusqlite::Error| StorageError::MigrationFailed(e.to_string());

    let tx = conn.transaction().map_err(failed)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS schema_meta (version INTEGER NOT NULL);")
        .map_err(failed)?;
    let version: i64 = tx
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_meta", [], |row| row.get(0))
        .map_err(failed)?;

    if version > SCHEMA_VERSION {
        return Err(StorageError::MigrationFailed(format!(
            "store schema version {version} is newer than this build's {SCHEMA_VERSION}"
        )));
    }

    if version < 1 {
        tx.execute_batch(
            "CREATE TABLE IF NOT EXISTS frames (
                identity      TEXT NOT NULL PRIMARY KEY,
                kind          TEXT NOT NULL,
                properties    TEXT NOT NULL,
                relationships TEXT NOT NULL,
                revision      INTEGER NOT NULL,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL
            );",
        )
        .map_err(failed)?;
    }
    if version < 2 {
        // v2 adds source confidence; existing rows default to full confidence.
        tx.execute_batch("ALTER TABLE frames ADD COLUMN confidence REAL NOT NULL DEFAULT 1.0;")
            .map_err(failed)?;
    }

    tx.execute("DELETE FROM schema_meta", []).map_err(failed)?;
    tx.execute("INSERT INTO schema_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
        .map_err(failed)?;
    tx.commit().map_err(failed)?;

    if version != SCHEMA_VERSION {
        info!(from = version, to = SCHEMA_VERSION, "migrated frame store schema");
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// StorageBackend impl
// ─────────────────────────────────────────────────────────────────────────────

impl StorageBackend for DurableBackend {
    fn persist(&mut self, frame: &Frame) -> Result<(), StorageError> {
        let properties = serde_json::to_string(&frame.properties)
            .map_err(|e| StorageError::IoFailure(e.to_string()))?;
        let relationships = serde_json::to_string(&frame.relationships)
            .map_err(|e| StorageError::IoFailure(e.to_string()))?;

        let tx = self.conn.transaction().map_err(map_sqlite)?;
        tx.execute(
            "INSERT OR REPLACE INTO frames
                 (identity, kind, properties, relationships,
                  revision, created_at, updated_at, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                frame.identity,
                frame.kind.as_str(),
                properties,
                relationships,
                frame.metadata.revision as i64,
                frame.metadata.created_at.to_rfc3339(),
                frame.metadata.updated_at.to_rfc3339(),
                frame.metadata.confidence,
            ],
        )
        .map_err(map_sqlite)?;
        tx.commit().map_err(map_sqlite)
    }

    fn load(&self, identity: &str) -> Result<Option<Frame>, StorageError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT identity, kind, properties, relationships,
                        revision, created_at, updated_at, confidence
                 FROM frames WHERE identity = ?1",
            )
            .map_err(map_sqlite)?;
        let mut rows = stmt.query_map(params![identity], row_to_frame).map_err(map_sqlite)?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(map_sqlite)?)),
            None => Ok(None),
        }
    }

    fn load_all(&self) -> Result<Vec<Frame>, StorageError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT identity, kind, properties, relationships,
                        revision, created_at, updated_at, confidence
                 FROM frames ORDER BY created_at ASC, identity ASC",
            )
            .map_err(map_sqlite)?;
        let rows = stmt.query_map([], row_to_frame).map_err(map_sqlite)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite)
    }

    fn remove(&mut self, identity: &str) -> Result<bool, StorageError> {
        let tx = self.conn.transaction().map_err(map_sqlite)?;
        let changed = tx
            .execute("DELETE FROM frames WHERE identity = ?1", params![identity])
            .map_err(map_sqlite)?;
        tx.commit().map_err(map_sqlite)?;
        Ok(changed > 0)
    }

    fn close(&mut self) -> Result<(), StorageError> {
        self.conn.execute_batch("PRAGMA optimize;").map_err(map_sqlite)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row mapping & error classification
// ─────────────────────────────────────────────────────────────────────────────

fn row_to_frame(row: &rusqlite::Row<'_>) -> rusqlite::Result<Frame> {
    let identity: String = row.get(0)?;
    let kind_str: String = row.get(1)?;
    let properties_json: String = row.get(2)?;
    let relationships_json: String = row.get(3)?;
    let revision: i64 = row.get(4)?;
    let created_str: String = row.get(5)?;
    let updated_str: String = row.get(6)?;
    let confidence: f64 = row.get(7)?;

    let kind = Kind::parse(&kind_str).ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(1, kind_str, rusqlite::types::Type::Text)
    })?;
    let properties = serde_json::from_str(&properties_json).map_err(|e| {
        rusqlite::Error::InvalidColumnType(2, e.to_string(), rusqlite::types::Type::Text)
    })?;
    let relationships = serde_json::from_str(&relationships_json).map_err(|e| {
        rusqlite::Error::InvalidColumnType(3, e.to_string(), rusqlite::types::Type::Text)
    })?;
    let created_at = created_str.parse::<DateTime<Utc>>().map_err(|e| {
        rusqlite::Error::InvalidColumnType(5, e.to_string(), rusqlite::types::Type::Text)
    })?;
    let updated_at = updated_str.parse::<DateTime<Utc>>().map_err(|e| {
        rusqlite::Error::InvalidColumnType(6, e.to_string(), rusqlite::types::Type::Text)
    })?;

    Ok(Frame {
        identity,
        kind,
        properties,
        relationships,
        metadata: FrameMetadata {
            created_at,
            updated_at,
            confidence,
            revision: revision.max(0) as u64,
        },
    })
}

/// Classify SQLite failures: lock contention is the one retryable condition,
/// everything else surfaces as an I/O failure.
fn map_sqlite(err: rusqlite::Error) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
        {
            StorageError::Locked
        }
        _ => StorageError::IoFailure(err.to_string()),
    }
}
