//! Synchronization engine for the SPV client.
//!
//! The engine tracks wallet height against node height and drives two
//! independently cadenced background tasks:
//! - a height poll that refreshes the node's reported chain height
//! - a block-fetch poll that requests wallet sync data anchored at the
//!   latest checkpoint and enqueues returned blocks for scanning

pub mod engine;


pub use engine::{SyncEngine, SyncState};

/// Lifecycle state of the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Initial state; no tasks scheduled.
    Idle,
    /// Both poll tasks are scheduled.
    Running,
    /// Tasks have been cancelled via `stop()`.
    Stopped,
}
