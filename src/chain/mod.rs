//! Chain-side state the wallet keeps between node responses.
//!
//! This module provides:
//! - The checkpoint ledger anchoring each sync-data request
//! - The pending queue of fetched blocks awaiting scan

pub mod checkpoints;
pub mod queue;

pub use checkpoints::CheckpointLedger;
pub use queue::PendingQueue;
