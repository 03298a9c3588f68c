//! The identifier ledger and its store contract.

use crate::backend::SnapshotBackend;
use crate::error::StoreResult;
use crate::record::LedgerRecord;
use std::collections::HashSet;
use tracing::warn;

/// Number of distinct offsets the cycling search can use per prefix.
///
/// Equal to the product of the congruence moduli 3, 5 and 7.
pub const OFFSET_CYCLE: u32 = 105;

/// Contract for the durable store of issued identifiers.
///
/// The engine is written against this trait so it can be bound to a
/// file-backed ledger in production and an in-memory one in tests. A
/// single logical writer is assumed; implementations do not coordinate
/// concurrent mutation.
pub trait IdentifierStore {
    /// True if `isbn` was issued under any publisher code.
    fn contains(&self, isbn: &str) -> bool;

    /// The 7-digit suffix of the first identifier issued under exactly
    /// this 6-digit prefix, or `None` if the publisher bucket holds no
    /// exact-prefix match.
    ///
    /// Buckets are keyed by publisher code, not full prefix, so a bucket
    /// may hold identifiers from another region sharing the code. Those
    /// never match here: only an exact string-prefix match counts.
    fn last_suffix(&self, prefix: &str) -> Option<u32>;

    /// The next offset to try for `prefix`: one past the last committed
    /// offset, wrapping at [`OFFSET_CYCLE`], or 0 if none was recorded.
    ///
    /// Stable across repeated calls without an intervening commit.
    fn next_offset(&self, prefix: &str) -> u32;

    /// Appends `isbn` to `publisher`'s bucket, records `offset` as the
    /// last used for `prefix`, and persists the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. In that case the in-memory
    /// state must be left as it was before the call.
    fn commit(&mut self, publisher: u8, isbn: &str, prefix: &str, offset: u32) -> StoreResult<()>;

    /// Total number of issued identifiers across all publisher codes.
    fn count(&self) -> usize;

    /// Identifiers issued under `publisher`, in issuance order.
    fn issued_for_publisher(&self, publisher: u8) -> &[String];
}

/// The durable ledger of issued identifiers.
///
/// Holds the [`LedgerRecord`] as source of truth plus a set index over
/// all issued identifiers so existence checks don't scan every bucket.
/// Every mutation is persisted through the backend before it becomes
/// visible; a failed persist is rolled back so memory and durable state
/// never diverge.
#[derive(Debug)]
pub struct Ledger<B> {
    backend: B,
    record: LedgerRecord,
    issued: HashSet<String>,
}

impl<B: SnapshotBackend> Ledger<B> {
    /// Opens the ledger, loading any previously persisted snapshot.
    ///
    /// Never hard-fails: an unreadable or corrupt snapshot degrades to an
    /// empty ledger with a warning.
    pub fn open(backend: B) -> Self {
        let record = match backend.load() {
            Ok(Some(bytes)) => match LedgerRecord::decode(&bytes) {
                Ok(record) => record,
                Err(err) => {
                    warn!(error = %err, "could not parse ledger snapshot, starting empty");
                    LedgerRecord::default()
                }
            },
            Ok(None) => LedgerRecord::default(),
            Err(err) => {
                warn!(error = %err, "could not read ledger snapshot, starting empty");
                LedgerRecord::default()
            }
        };

        let issued = record.isbns.values().flatten().cloned().collect();

        Self {
            backend,
            record,
            issued,
        }
    }

    /// Read access to the full persisted record.
    #[must_use]
    pub fn record(&self) -> &LedgerRecord {
        &self.record
    }

    /// Consumes the ledger, returning its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn persist(&mut self) -> StoreResult<()> {
        let bytes = self.record.encode()?;
        self.backend.persist(&bytes)
    }
}

/// Publisher bucket key for a 6-digit prefix, or `None` if the prefix is
/// too short or non-numeric. Keys are unpadded (`"5"`, not `"05"`).
fn bucket_key(prefix: &str) -> Option<String> {
    let code: u8 = prefix.get(4..6)?.parse().ok()?;
    Some(code.to_string())
}

impl<B: SnapshotBackend> IdentifierStore for Ledger<B> {
    fn contains(&self, isbn: &str) -> bool {
        self.issued.contains(isbn)
    }

    fn last_suffix(&self, prefix: &str) -> Option<u32> {
        let bucket = self.record.isbns.get(&bucket_key(prefix)?)?;
        bucket
            .iter()
            .find(|isbn| isbn.starts_with(prefix))
            .and_then(|isbn| isbn.get(6..)?.parse().ok())
    }

    fn next_offset(&self, prefix: &str) -> u32 {
        match self.record.prefix_offsets.get(prefix) {
            Some(last) => (last + 1) % OFFSET_CYCLE,
            None => 0,
        }
    }

    fn commit(&mut self, publisher: u8, isbn: &str, prefix: &str, offset: u32) -> StoreResult<()> {
        let key = publisher.to_string();
        self.record
            .isbns
            .entry(key.clone())
            .or_default()
            .push(isbn.to_string());
        let previous_offset = self.record.prefix_offsets.insert(prefix.to_string(), offset);
        self.issued.insert(isbn.to_string());

        if let Err(err) = self.persist() {
            // Roll back so memory matches the durable snapshot.
            if let Some(bucket) = self.record.isbns.get_mut(&key) {
                bucket.pop();
                if bucket.is_empty() {
                    self.record.isbns.remove(&key);
                }
            }
            match previous_offset {
                Some(last) => {
                    self.record.prefix_offsets.insert(prefix.to_string(), last);
                }
                None => {
                    self.record.prefix_offsets.remove(prefix);
                }
            }
            self.issued.remove(isbn);
            return Err(err);
        }

        Ok(())
    }

    fn count(&self) -> usize {
        self.record.count()
    }

    fn issued_for_publisher(&self, publisher: u8) -> &[String] {
        self.record
            .isbns
            .get(&publisher.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use crate::StoreError;

    fn empty_ledger() -> Ledger<InMemoryBackend> {
        Ledger::open(InMemoryBackend::new())
    }

    #[test]
    fn open_empty_backend_starts_empty() {
        let ledger = empty_ledger();
        assert_eq!(ledger.count(), 0);
        assert_eq!(ledger.next_offset("978316"), 0);
        assert_eq!(ledger.last_suffix("978316"), None);
    }

    #[test]
    fn corrupt_snapshot_degrades_to_empty() {
        let ledger = Ledger::open(InMemoryBackend::with_data(b"{{{ not json".to_vec()));
        assert_eq!(ledger.count(), 0);
    }

    #[test]
    fn commit_then_reload_round_trips() {
        let mut ledger = empty_ledger();
        ledger.commit(16, "9783160000021", "978316", 0).unwrap();
        ledger.commit(16, "9783160000126", "978316", 1).unwrap();

        let reloaded = Ledger::open(ledger.into_backend());
        assert_eq!(reloaded.count(), 2);
        assert!(reloaded.contains("9783160000021"));
        assert!(reloaded.contains("9783160000126"));
        assert_eq!(reloaded.next_offset("978316"), 2);
        assert_eq!(reloaded.last_suffix("978316"), Some(21));
    }

    #[test]
    fn next_offset_is_cyclic_successor() {
        let mut ledger = empty_ledger();
        assert_eq!(ledger.next_offset("978316"), 0);
        // Stable until a commit intervenes.
        assert_eq!(ledger.next_offset("978316"), 0);

        ledger.commit(16, "9783160000021", "978316", 0).unwrap();
        assert_eq!(ledger.next_offset("978316"), 1);

        ledger.commit(16, "9783160010941", "978316", 104).unwrap();
        assert_eq!(ledger.next_offset("978316"), 0);
    }

    #[test]
    fn last_suffix_requires_exact_prefix_match() {
        let mut ledger = empty_ledger();
        // Same publisher code 16, different region digit.
        ledger.commit(16, "9784160000022", "978416", 0).unwrap();

        assert_eq!(ledger.last_suffix("978316"), None);
        assert_eq!(ledger.last_suffix("978416"), Some(22));
    }

    #[test]
    fn last_suffix_returns_first_match() {
        let mut ledger = empty_ledger();
        ledger.commit(16, "9783160000021", "978316", 0).unwrap();
        ledger.commit(16, "9783160000126", "978316", 1).unwrap();

        assert_eq!(ledger.last_suffix("978316"), Some(21));
    }

    #[test]
    fn bucket_keys_are_unpadded() {
        let mut ledger = empty_ledger();
        ledger.commit(5, "9783050000005", "978305", 0).unwrap();

        assert_eq!(ledger.issued_for_publisher(5), ["9783050000005"]);
        assert!(ledger.record().isbns.contains_key("5"));
        assert!(!ledger.record().isbns.contains_key("05"));
        assert_eq!(ledger.last_suffix("978305"), Some(5));
    }

    #[test]
    fn failed_persist_rolls_back_memory() {
        let mut ledger = empty_ledger();
        ledger.commit(16, "9783160000021", "978316", 0).unwrap();

        ledger.backend.fail_next_persists(1);

        let result = ledger.commit(16, "9783160000126", "978316", 1);
        assert!(matches!(result, Err(StoreError::PersistFailed(_))));

        // The failed commit left no trace in memory.
        assert_eq!(ledger.count(), 1);
        assert!(!ledger.contains("9783160000126"));
        assert_eq!(ledger.next_offset("978316"), 1);

        // And the next commit goes through cleanly.
        ledger.commit(16, "9783160000126", "978316", 1).unwrap();
        assert_eq!(ledger.count(), 2);
    }

    #[test]
    fn rollback_removes_fresh_bucket() {
        let mut ledger = Ledger::open(InMemoryBackend::new());
        ledger.backend.fail_next_persists(1);

        assert!(ledger.commit(16, "9783160000021", "978316", 0).is_err());
        assert!(ledger.record().isbns.is_empty());
        assert_eq!(ledger.next_offset("978316"), 0);
    }

    #[test]
    fn count_sums_all_buckets() {
        let mut ledger = empty_ledger();
        ledger.commit(16, "9783160000021", "978316", 0).unwrap();
        ledger.commit(42, "9783420000084", "978342", 0).unwrap();
        ledger.commit(42, "9783420000189", "978342", 1).unwrap();

        assert_eq!(ledger.count(), 3);
    }
}
