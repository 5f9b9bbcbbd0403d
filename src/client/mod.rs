//! Client facade: wires the sync engine and output scanner together and
//! exposes the wallet-facing API.

pub mod config;

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SpvError};
use crate::network::NodeClient;
use crate::sync::{SyncEngine, SyncState, SyncStatus};
use crate::types::{OwnedInput, SyncProgress};
use crate::wallet::{OutputScanner, WalletKeys};

pub use config::ClientConfig;

/// SPV client for a CryptoNote wallet.
///
/// Owns the sync engine and the output scanner. `start()` schedules the
/// engine's two poll tasks plus a scan task that drains the pending queue;
/// owned inputs discovered by scanning are delivered on the stream returned
/// by [`take_owned_input_receiver`](Self::take_owned_input_receiver).
pub struct SpvClient<N: NodeClient> {
    config: ClientConfig,
    engine: SyncEngine<N>,
    scanner: OutputScanner,
    state: Arc<RwLock<SyncState>>,
    shutdown: CancellationToken,
    tasks: JoinSet<()>,
    owned_rx: Option<mpsc::UnboundedReceiver<OwnedInput>>,
}

impl<N: NodeClient> SpvClient<N> {
    /// Create a new client over the given node client and wallet keys.
    pub fn new(config: ClientConfig, node: N, keys: WalletKeys) -> Result<Self> {
        config.validate().map_err(SpvError::Config)?;

        let (owned_tx, owned_rx) = mpsc::unbounded_channel();
        let engine = SyncEngine::new(Arc::new(node), &config);
        let state = engine.state();
        let scanner = OutputScanner::new(keys, config.unlock_confirmations, owned_tx);

        Ok(Self {
            config,
            engine,
            scanner,
            state,
            shutdown: CancellationToken::new(),
            tasks: JoinSet::new(),
            owned_rx: Some(owned_rx),
        })
    }

    /// Start the client: the engine's poll tasks plus the scan task.
    pub async fn start(&mut self) -> Result<()> {
        self.engine.start().await?;

        self.shutdown = CancellationToken::new();
        let scanner = self.scanner.clone();
        let state = Arc::clone(&self.state);
        let token = self.shutdown.child_token();
        let every = self.config.scan_interval;

        self.tasks.spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        scanner.process_queue(&state).await;
                    }
                }
            }
        });

        Ok(())
    }

    /// Stop the client. A no-op when not running.
    pub async fn stop(&mut self) -> Result<()> {
        if self.engine.status() != SyncStatus::Running {
            return Ok(());
        }

        self.shutdown.cancel();
        while self.tasks.join_next().await.is_some() {}
        self.engine.stop().await
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SyncStatus {
        self.engine.status()
    }

    /// Durable wallet height: every block at or below it has been fetched
    /// and credited.
    pub async fn synced_height(&self) -> u64 {
        self.state.read().await.wallet_height
    }

    /// Number of fetched blocks awaiting scan.
    pub async fn pending_block_count(&self) -> usize {
        self.state.read().await.queue.len()
    }

    /// Snapshot of sync progress.
    pub async fn progress(&self) -> SyncProgress {
        self.state.read().await.progress()
    }

    /// Take the stream of owned inputs discovered by scanning.
    ///
    /// Yields `Some` on first call, `None` afterwards; the stream is handed
    /// to exactly one consumer (typically the wallet-balance/persistence
    /// component).
    pub fn take_owned_input_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<OwnedInput>> {
        self.owned_rx.take()
    }

    /// Run one scan pass over the pending queue on the caller's task.
    ///
    /// The background scan task does this on its own cadence; tests and
    /// callers that want deterministic scanning can drive it directly.
    pub async fn process_queue(&self) -> usize {
        self.scanner.process_queue(&self.state).await
    }
}
