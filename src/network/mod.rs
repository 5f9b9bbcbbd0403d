//! Node communication for the SPV client.
//!
//! The engine talks to the remote node through the [`NodeClient`] trait;
//! [`HttpNodeClient`] is the production implementation over the node's HTTP
//! JSON API. Tests substitute a scripted mock (see `test_utils`).

pub mod http;

use async_trait::async_trait;

use crate::error::NetworkResult;
use crate::types::{BlockDetails, BlockHash, NodeInfo, WalletSyncData};

pub use http::HttpNodeClient;

/// Abstract interface to a remote CryptoNote node.
///
/// Every call carries the configured request timeout; a timed-out or failed
/// call is reported as a [`NetworkError`](crate::error::NetworkError) and
/// recovered by the caller's retry cadence.
#[async_trait]
pub trait NodeClient: Send + Sync + 'static {
    /// Fetch node status, including its current chain height.
    async fn get_node_info(&self) -> NetworkResult<NodeInfo>;

    /// Fetch details of the block at the given height.
    async fn get_block_details_by_height(&self, height: u64) -> NetworkResult<BlockDetails>;

    /// Given known block-hash checkpoints, fetch the next contiguous range
    /// of blocks the node believes the wallet has not yet seen.
    async fn get_wallet_sync_data(
        &self,
        checkpoints: &[BlockHash],
    ) -> NetworkResult<WalletSyncData>;
}
