//! Configuration management for the SPV client.

use std::time::Duration;

/// Configuration for the SPV client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the node's HTTP API, e.g. `http://127.0.0.1:11898`.
    pub node_url: String,

    /// Height the wallet starts syncing from. The block at this height
    /// seeds the checkpoint ledger.
    pub start_height: u64,

    /// Cadence of the block-fetch poll.
    pub sync_interval: Duration,

    /// Cadence of the node-height poll.
    pub node_poll_interval: Duration,

    /// Cadence of the scan pass over the pending queue.
    pub scan_interval: Duration,

    /// Per-request network timeout. A timed-out request counts as a failed
    /// fetch for that interval and is retried on the next one.
    pub request_timeout: Duration,

    /// Confirmations before a coin-generating (miner reward) output
    /// becomes spendable.
    pub unlock_confirmations: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:11898".to_string(),
            start_height: 0,
            sync_interval: Duration::from_secs(5),
            node_poll_interval: Duration::from_secs(10),
            scan_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(10),
            unlock_confirmations: 60,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the node at `node_url`.
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            ..Self::default()
        }
    }

    /// Set the start height.
    pub fn with_start_height(mut self, height: u64) -> Self {
        self.start_height = height;
        self
    }

    /// Set the block-fetch poll interval.
    pub fn with_sync_interval(mut self, interval: Duration) -> Self {
        self.sync_interval = interval;
        self
    }

    /// Set the node-height poll interval.
    pub fn with_node_poll_interval(mut self, interval: Duration) -> Self {
        self.node_poll_interval = interval;
        self
    }

    /// Set the scan pass interval.
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    /// Set the per-request network timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the coinbase unlock window.
    pub fn with_unlock_confirmations(mut self, confirmations: u64) -> Self {
        self.unlock_confirmations = confirmations;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.node_url.is_empty() {
            return Err("node_url must not be empty".to_string());
        }
        if self.sync_interval.is_zero()
            || self.node_poll_interval.is_zero()
            || self.scan_interval.is_zero()
        {
            return Err("poll intervals must be non-zero".to_string());
        }
        if self.request_timeout.is_zero() {
            return Err("request_timeout must be non-zero".to_string());
        }
        Ok(())
    }
}
