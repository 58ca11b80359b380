//! The storage interface `FrameStore` writes through.

use engram_types::{Frame, StorageError};

/// A pluggable persistence backend.
///
/// All calls are synchronous and may block on I/O (the durable backend
/// acquiring its file lock); callers needing responsiveness must keep store
/// operations off any latency-sensitive path.  Implementations share no
/// state with one another.
pub trait StorageBackend: Send {
    /// Write one frame durably (insert or overwrite by identity).  Returns
    /// only after the frame is persisted; on error nothing was written.
    fn persist(&mut self, frame: &Frame) -> Result<(), StorageError>;

    /// Read one frame by exact identity.
    fn load(&self, identity: &str) -> Result<Option<Frame>, StorageError>;

    /// Read every stored frame, ordered by creation time ascending with ties
    /// broken by identity.
    fn load_all(&self) -> Result<Vec<Frame>, StorageError>;

    /// Delete one frame by exact identity; `false` when nothing matched.
    fn remove(&mut self, identity: &str) -> Result<bool, StorageError>;

    /// Flush and release backend resources.  Further use after a successful
    /// close is a caller bug.
    fn close(&mut self) -> Result<(), StorageError>;
}
