//! Ordered, deduplicated ledger of block hashes the wallet has confirmed.
//!
//! The remote fetch protocol anchors each request to the most recently seen
//! hash, so the node re-confirming a hash the wallet already holds must not
//! perturb ordering or count as new progress.

use std::collections::HashSet;

use crate::error::{SyncError, SyncResult};
use crate::types::BlockHash;

/// Append-only list of checkpoint hashes, deduplicated by equality and
/// preserving the order of first insertion.
#[derive(Debug, Clone, Default)]
pub struct CheckpointLedger {
    hashes: Vec<BlockHash>,
    seen: HashSet<BlockHash>,
}

impl CheckpointLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hash unless it is already present.
    ///
    /// Returns `true` if the hash was newly inserted.
    pub fn append(&mut self, hash: BlockHash) -> bool {
        if !self.seen.insert(hash) {
            return false;
        }
        self.hashes.push(hash);
        true
    }

    /// The most recently first-seen hash, used as the next sync anchor.
    pub fn latest(&self) -> SyncResult<BlockHash> {
        self.hashes.last().copied().ok_or(SyncError::EmptyLedger)
    }

    /// Number of checkpoints held.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the ledger holds no checkpoints yet.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// All checkpoints in first-insertion order.
    pub fn hashes(&self) -> &[BlockHash] {
        &self.hashes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(seed: u8) -> BlockHash {
        BlockHash([seed; 32])
    }

    #[test]
    fn latest_fails_on_empty_ledger() {
        let ledger = CheckpointLedger::new();
        assert_eq!(ledger.latest(), Err(SyncError::EmptyLedger));
        assert!(ledger.is_empty());
    }

    #[test]
    fn append_preserves_first_insertion_order() {
        let mut ledger = CheckpointLedger::new();
        assert!(ledger.append(hash(1)));
        assert!(ledger.append(hash(2)));
        assert!(ledger.append(hash(3)));
        assert_eq!(ledger.hashes(), &[hash(1), hash(2), hash(3)]);
        assert_eq!(ledger.latest(), Ok(hash(3)));
    }

    #[test]
    fn duplicate_append_is_ignored() {
        let mut ledger = CheckpointLedger::new();
        ledger.append(hash(1));
        ledger.append(hash(2));

        // The node re-confirming an older hash is not new progress.
        assert!(!ledger.append(hash(1)));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.latest(), Ok(hash(2)));
        assert_eq!(ledger.hashes(), &[hash(1), hash(2)]);
    }
}
