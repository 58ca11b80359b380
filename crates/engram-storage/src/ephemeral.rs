//! Whole-file JSON document backend.
//!
//! The entire store is one JSON document (identity → frame) read once at
//! open and rewritten whole on every persist.  There are **no transactional
//! guarantees and no cross-process safety** — this is a hard constraint of
//! the backend, not a bug to fix at this layer.  Two processes writing the
//! same document race each other; the last writer wins.  Acceptable only for
//! single-process, low-volume use; anything else belongs on
//! [`DurableBackend`][crate::durable::DurableBackend].
//!
//! The rewrite goes through a sibling temp file and an atomic rename so a
//! crash mid-write cannot truncate the document, which is still well short
//! of a transaction.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use engram_types::{Frame, StorageError};

use crate::backend::StorageBackend;

/// Document-file storage backend without transactional guarantees.
#[derive(Debug)]
pub struct EphemeralBackend {
    path: PathBuf,
    frames: BTreeMap<String, Frame>,
}

impl EphemeralBackend {
    /// Open (or create) the document at `path`, reading any existing frames
    /// into memory.  A malformed document surfaces as
    /// [`StorageError::IoFailure`] rather than being silently discarded.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let frames = if path.exists() {
            let raw = fs::read_to_string(path)
                .map_err(|e| StorageError::IoFailure(format!("{}: {e}", path.display())))?;
            serde_json::from_str(&raw)
                .map_err(|e| StorageError::IoFailure(format!("{}: {e}", path.display())))?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), frames = frames.len(), "opened ephemeral frame store");
        Ok(Self {
            path: path.to_path_buf(),
            frames,
        })
    }

    /// Rewrite the whole document from the in-memory map.
    fn rewrite(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.frames)
            .map_err(|e| StorageError::IoFailure(e.to_string()))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, raw)
            .map_err(|e| StorageError::IoFailure(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StorageError::IoFailure(format!("{}: {e}", self.path.display())))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageBackend for EphemeralBackend {
    fn persist(&mut self, frame: &Frame) -> Result<(), StorageError> {
        let previous = self.frames.insert(frame.identity.clone(), frame.clone());
        if let Err(e) = self.rewrite() {
            // Keep the in-memory view consistent with what is on disk.
            match previous {
                Some(old) => {
                    self.frames.insert(frame.identity.clone(), old);
                }
                None => {
                    self.frames.remove(&frame.identity);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn load(&self, identity: &str) -> Result<Option<Frame>, StorageError> {
        Ok(self.frames.get(identity).cloned())
    }

    fn load_all(&self) -> Result<Vec<Frame>, StorageError> {
        let mut all: Vec<Frame> = self.frames.values().cloned().collect();
        all.sort_by(|a, b| {
            a.metadata
                .created_at
                .cmp(&b.metadata.created_at)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        Ok(all)
    }

    fn remove(&mut self, identity: &str) -> Result<bool, StorageError> {
        let Some(previous) = self.frames.remove(identity) else {
            return Ok(false);
        };
        if let Err(e) = self.rewrite() {
            self.frames.insert(identity.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    fn close(&mut self) -> Result<(), StorageError> {
        self.rewrite()
    }
}
