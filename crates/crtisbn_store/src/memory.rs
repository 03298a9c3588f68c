//! In-memory snapshot backend for testing.

use crate::backend::SnapshotBackend;
use crate::error::{StoreError, StoreResult};

/// An in-memory snapshot backend.
///
/// This backend keeps the snapshot in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral ledgers that don't need persistence
///
/// It also supports injected persist failures so callers can test their
/// rollback behavior.
///
/// # Example
///
/// ```rust
/// use crtisbn_store::{InMemoryBackend, SnapshotBackend};
///
/// let mut backend = InMemoryBackend::new();
/// backend.persist(b"snapshot").unwrap();
/// assert_eq!(backend.load().unwrap(), Some(b"snapshot".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: Option<Vec<u8>>,
    failures_remaining: u32,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-loaded with a snapshot.
    ///
    /// Useful for testing reload scenarios.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            failures_remaining: 0,
        }
    }

    /// Makes the next `count` persists fail.
    ///
    /// Failed persists leave the previous snapshot intact, matching the
    /// contract of durable backends.
    pub fn fail_next_persists(&mut self, count: u32) {
        self.failures_remaining = count;
    }

    /// Returns a copy of the current snapshot, if any.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.data.clone()
    }
}

impl SnapshotBackend for InMemoryBackend {
    fn load(&self) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.clone())
    }

    fn persist(&mut self, data: &[u8]) -> StoreResult<()> {
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            return Err(StoreError::PersistFailed("injected failure".into()));
        }
        self.data = Some(data.to_vec());
        Ok(())
    }
}
