//! The checkpoint-driven block-fetch engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::chain::{CheckpointLedger, PendingQueue};
use crate::client::ClientConfig;
use crate::error::{Result, SpvError, SyncError};
use crate::network::NodeClient;
use crate::sync::SyncStatus;
use crate::types::SyncProgress;

/// State shared between the two poll tasks and the scanner.
///
/// Writer discipline: the block-fetch task is the sole writer of the
/// checkpoint ledger, the queue's tail, and the fetch-side height advance;
/// the scanner is the sole writer of queue removal and the scan-side height
/// advance; the height poll only writes `node_height`.
#[derive(Debug, Default)]
pub struct SyncState {
    /// Last chain height reported by the node; `None` until the first
    /// successful height poll.
    pub node_height: Option<u64>,

    /// Durable wallet height. Monotonically non-decreasing.
    pub wallet_height: u64,

    /// Checkpoint hashes anchoring sync-data requests.
    pub checkpoints: CheckpointLedger,

    /// Fetched blocks awaiting scan.
    pub queue: PendingQueue,
}

impl SyncState {
    /// Snapshot the current progress counters.
    pub fn progress(&self) -> SyncProgress {
        SyncProgress {
            wallet_height: self.wallet_height,
            node_height: self.node_height,
            pending_blocks: self.queue.len(),
            checkpoints: self.checkpoints.len(),
        }
    }
}

/// Drives wallet synchronization against a remote node.
pub struct SyncEngine<N: NodeClient> {
    node: Arc<N>,
    start_height: u64,
    node_poll_interval: Duration,
    sync_interval: Duration,
    state: Arc<RwLock<SyncState>>,
    status: SyncStatus,
    shutdown: CancellationToken,
    tasks: JoinSet<()>,
}

impl<N: NodeClient> SyncEngine<N> {
    /// Create an idle engine over the given node client.
    pub fn new(node: Arc<N>, config: &ClientConfig) -> Self {
        Self {
            node,
            start_height: config.start_height,
            node_poll_interval: config.node_poll_interval,
            sync_interval: config.sync_interval,
            state: Arc::new(RwLock::new(SyncState::default())),
            status: SyncStatus::Idle,
            shutdown: CancellationToken::new(),
            tasks: JoinSet::new(),
        }
    }

    /// Handle to the shared sync state, for the scanner and progress queries.
    pub fn state(&self) -> Arc<RwLock<SyncState>> {
        Arc::clone(&self.state)
    }

    /// The node client this engine polls.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Start syncing: establish the first checkpoint from the configured
    /// start height, then schedule the height poll and block-fetch tasks.
    ///
    /// Starting again after `stop()` re-seeds the wallet height from the
    /// configured start height but resumes fetching from the existing
    /// checkpoint ledger and queue; the reported height under-counts until
    /// the scanner catches back up past the start height.
    ///
    /// Fails with [`SyncError::AlreadyRunning`] if called while running, and
    /// with a network error if the initial checkpoint cannot be fetched.
    pub async fn start(&mut self) -> Result<()> {
        if self.status == SyncStatus::Running {
            return Err(SpvError::Sync(SyncError::AlreadyRunning));
        }

        tracing::info!(start_height = self.start_height, "starting sync process");

        let details = self
            .node
            .get_block_details_by_height(self.start_height)
            .await
            .map_err(SpvError::Network)?;

        {
            let mut state = self.state.write().await;
            state.wallet_height = self.start_height;
            state.checkpoints.append(details.hash);
        }

        self.shutdown = CancellationToken::new();

        let node = Arc::clone(&self.node);
        let state = Arc::clone(&self.state);
        let token = self.shutdown.child_token();
        let every = self.node_poll_interval;
        self.tasks.spawn(async move {
            height_poll_loop(node, state, every, token).await;
        });

        let node = Arc::clone(&self.node);
        let state = Arc::clone(&self.state);
        let token = self.shutdown.child_token();
        let every = self.sync_interval;
        self.tasks.spawn(async move {
            block_fetch_loop(node, state, every, token).await;
        });

        self.status = SyncStatus::Running;
        Ok(())
    }

    /// Stop syncing, cancelling both poll tasks. A no-op when not running.
    ///
    /// Cancellation is observed between poll iterations; an in-flight
    /// request completes and its result is discarded.
    pub async fn stop(&mut self) -> Result<()> {
        if self.status != SyncStatus::Running {
            return Ok(());
        }

        tracing::info!("stopping sync process");
        self.shutdown.cancel();
        while self.tasks.join_next().await.is_some() {}
        self.status = SyncStatus::Stopped;
        Ok(())
    }
}

/// Periodically refresh the node's reported chain height.
///
/// Purely informational; never blocks the block-fetch cadence.
async fn height_poll_loop<N: NodeClient>(
    node: Arc<N>,
    state: Arc<RwLock<SyncState>>,
    every: Duration,
    token: CancellationToken,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                match node.get_node_info().await {
                    Ok(info) => {
                        tracing::debug!(height = info.height, "node height updated");
                        state.write().await.node_height = Some(info.height);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "node info fetch failed, retrying next interval");
                    }
                }
            }
        }
    }
}

/// Periodically fetch the next batch of blocks while the wallet is behind
/// the node.
async fn block_fetch_loop<N: NodeClient>(
    node: Arc<N>,
    state: Arc<RwLock<SyncState>>,
    every: Duration,
    token: CancellationToken,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => fetch_once(&node, &state).await,
        }
    }
}

async fn fetch_once<N: NodeClient>(node: &N, state: &RwLock<SyncState>) {
    let (node_height, wallet_height, anchor) = {
        let state = state.read().await;
        (state.node_height, state.wallet_height, state.checkpoints.latest())
    };

    // Until the first height poll succeeds we do not know whether we are
    // behind; skipping is not the same as being caught up.
    let Some(node_height) = node_height else {
        tracing::debug!("node height not yet known, skipping block fetch");
        return;
    };

    if wallet_height >= node_height {
        return;
    }

    let anchor = match anchor {
        Ok(anchor) => anchor,
        Err(e) => {
            // Unreachable after start() establishes the first checkpoint.
            tracing::error!(error = %e, "block fetch scheduled without a checkpoint");
            return;
        }
    };

    match node.get_wallet_sync_data(&[anchor]).await {
        Ok(data) if !data.items.is_empty() => {
            let fetched = data.items.len() as u64;
            let mut state = state.write().await;

            if let Some(last) = data.items.last() {
                state.checkpoints.append(last.block_hash);
            }
            state.wallet_height += fetched;

            for block in data.items {
                if let Err(e) = state.queue.push(block) {
                    tracing::warn!(error = %e, "dropping out-of-order block from sync data");
                }
            }

            tracing::info!(
                fetched,
                wallet_height = state.wallet_height,
                "fetched block(s)"
            );
        }
        Ok(_) => {
            tracing::debug!("sync data empty, retrying next interval");
        }
        Err(e) => {
            tracing::warn!(error = %e, "sync data fetch failed, retrying next interval");
        }
    }
}
