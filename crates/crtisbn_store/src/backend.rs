//! Snapshot backend trait definition.

use crate::error::StoreResult;

/// A low-level snapshot store for the identifier ledger.
///
/// Snapshot backends are **opaque byte stores**. They hold exactly one
/// snapshot at a time: `persist` replaces the previous snapshot in full,
/// and `load` returns the last snapshot that was durably persisted. The
/// ledger owns all format interpretation - backends do not understand
/// publisher buckets or offsets.
///
/// # Invariants
///
/// - After `persist` returns `Ok`, the snapshot survives process
///   termination (for durable backends)
/// - `load` returns `None` when no snapshot has ever been persisted
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait SnapshotBackend: Send + Sync {
    /// Loads the last persisted snapshot, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn load(&self) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically replaces the snapshot with `data` and makes it durable.
    ///
    /// A failed persist must leave the previous snapshot intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the durability step fails.
    fn persist(&mut self, data: &[u8]) -> StoreResult<()>;
}
