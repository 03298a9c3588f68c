//! Persisted ledger record format.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The persisted form of the ledger.
///
/// Two maps: publisher code (unpadded decimal string, `"5"` not `"05"`)
/// to the ordered list of identifiers issued under it, and full 6-digit
/// prefix to the last offset the cycling search used for it.
///
/// The on-disk encoding is JSON. An older layout that stored the bare
/// publisher map with no wrapper object is still accepted on load and
/// upgraded in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Issued identifiers, bucketed by publisher code, in issuance order.
    #[serde(default)]
    pub isbns: BTreeMap<String, Vec<String>>,

    /// Last offset used per prefix, in `[0, 104]`.
    #[serde(default)]
    pub prefix_offsets: BTreeMap<String, u32>,
}

impl LedgerRecord {
    /// Decodes a record from its persisted bytes.
    ///
    /// Accepts both the current layout and the legacy bare-map layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid JSON in either layout.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        if value.get("isbns").is_some() {
            return serde_json::from_value(value);
        }
        // Legacy layout: the whole document is the publisher map.
        let isbns: BTreeMap<String, Vec<String>> = serde_json::from_value(value)?;
        Ok(Self {
            isbns,
            prefix_offsets: BTreeMap::new(),
        })
    }

    /// Encodes the record for persistence.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// Total number of identifiers across all publisher buckets.
    #[must_use]
    pub fn count(&self) -> usize {
        self.isbns.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips() {
        let mut record = LedgerRecord::default();
        record
            .isbns
            .insert("16".into(), vec!["9783160000021".into()]);
        record.prefix_offsets.insert("978316".into(), 0);

        let bytes = record.encode().unwrap();
        assert_eq!(LedgerRecord::decode(&bytes).unwrap(), record);
    }

    #[test]
    fn decode_legacy_bare_map() {
        let bytes = br#"{"16": ["9783160000021", "9783160000126"]}"#;
        let record = LedgerRecord::decode(bytes).unwrap();

        assert_eq!(record.isbns["16"].len(), 2);
        assert!(record.prefix_offsets.is_empty());
    }

    #[test]
    fn decode_missing_offsets_defaults_empty() {
        let bytes = br#"{"isbns": {"5": ["9780050000025"]}}"#;
        let record = LedgerRecord::decode(bytes).unwrap();

        assert_eq!(record.count(), 1);
        assert!(record.prefix_offsets.is_empty());
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(LedgerRecord::decode(b"not json").is_err());
        assert!(LedgerRecord::decode(br#"{"16": "not a list"}"#).is_err());
    }
}
