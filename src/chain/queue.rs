//! FIFO queue of fetched blocks awaiting scan.
//!
//! Heights are strictly increasing; a gap or regression coming out of the
//! fetch path is a defect in fetch logic, not a valid queue state, so pushes
//! that would break the invariant are rejected. Blocks are removed only
//! after they have been fully scanned (pop-front, never mid-iteration).

use std::collections::VecDeque;

use crate::error::{SyncError, SyncResult};
use crate::types::Block;

/// Ordered sequence of blocks awaiting scan, strictly increasing by height.
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    blocks: VecDeque<Block>,
}

impl PendingQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a block at the back.
    ///
    /// Fails with `InvalidState` if the block's height is not strictly
    /// greater than the last queued height.
    pub fn push(&mut self, block: Block) -> SyncResult<()> {
        if let Some(back) = self.blocks.back() {
            if block.block_height <= back.block_height {
                return Err(SyncError::InvalidState(format!(
                    "block height {} does not extend queued height {}",
                    block.block_height, back.block_height
                )));
            }
        }
        self.blocks.push_back(block);
        Ok(())
    }

    /// The oldest queued block, if any. The block stays queued until
    /// [`pop_front`](Self::pop_front) after a full scan.
    pub fn front(&self) -> Option<&Block> {
        self.blocks.front()
    }

    /// Remove the oldest queued block after it has been fully processed.
    pub fn pop_front(&mut self) -> Option<Block> {
        self.blocks.pop_front()
    }

    /// Number of blocks awaiting scan.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockHash;

    fn block(height: u64) -> Block {
        Block {
            block_hash: BlockHash([height as u8; 32]),
            block_height: height,
            transactions: vec![],
        }
    }

    #[test]
    fn drains_in_fifo_order() {
        let mut queue = PendingQueue::new();
        queue.push(block(101)).unwrap();
        queue.push(block(102)).unwrap();
        queue.push(block(103)).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.front().unwrap().block_height, 101);
        assert_eq!(queue.pop_front().unwrap().block_height, 101);
        assert_eq!(queue.pop_front().unwrap().block_height, 102);
        assert_eq!(queue.pop_front().unwrap().block_height, 103);
        assert!(queue.is_empty());
    }

    #[test]
    fn rejects_non_increasing_heights() {
        let mut queue = PendingQueue::new();
        queue.push(block(101)).unwrap();

        assert!(queue.push(block(101)).is_err());
        assert!(queue.push(block(100)).is_err());
        assert_eq!(queue.len(), 1);

        // Gaps are accepted here; contiguity is the fetch path's concern.
        queue.push(block(105)).unwrap();
        assert_eq!(queue.len(), 2);
    }
}
