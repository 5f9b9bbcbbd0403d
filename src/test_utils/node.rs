//! Scripted mock node client.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{NetworkError, NetworkResult};
use crate::network::NodeClient;
use crate::types::{Block, BlockDetails, BlockHash, NodeInfo, WalletSyncData};

/// Mock node client scripted with a fixed height, block details, and a
/// queue of sync-data batches served one per request.
pub struct MockNodeClient {
    node_height: Mutex<Option<u64>>,
    block_details: Mutex<HashMap<u64, BlockHash>>,
    sync_batches: Mutex<VecDeque<NetworkResult<Vec<Block>>>>,
    sync_data_calls: AtomicUsize,
}

impl MockNodeClient {
    /// Create a mock that reports no height (node info requests fail).
    pub fn new() -> Self {
        Self {
            node_height: Mutex::new(None),
            block_details: Mutex::new(HashMap::new()),
            sync_batches: Mutex::new(VecDeque::new()),
            sync_data_calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock reporting the given chain height.
    pub fn with_height(height: u64) -> Self {
        let mock = Self::new();
        *mock.node_height.lock().unwrap() = Some(height);
        mock
    }

    /// Script the hash returned for a block-details request at `height`.
    pub fn set_block_details(&self, height: u64, hash: BlockHash) {
        self.block_details.lock().unwrap().insert(height, hash);
    }

    /// Queue a batch to be served by the next sync-data request. Once all
    /// scripted batches are consumed, further requests return empty data.
    pub fn push_sync_batch(&self, blocks: Vec<Block>) {
        self.sync_batches.lock().unwrap().push_back(Ok(blocks));
    }

    /// Script the next sync-data request to fail with the given error.
    pub fn push_sync_failure(&self, error: NetworkError) {
        self.sync_batches.lock().unwrap().push_back(Err(error));
    }

    /// Update the reported chain height.
    pub fn set_height(&self, height: u64) {
        *self.node_height.lock().unwrap() = Some(height);
    }

    /// Number of sync-data requests served so far.
    pub fn sync_data_calls(&self) -> usize {
        self.sync_data_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockNodeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    async fn get_node_info(&self) -> NetworkResult<NodeInfo> {
        match *self.node_height.lock().unwrap() {
            Some(height) => Ok(NodeInfo {
                height,
                network_height: Some(height),
            }),
            None => Err(NetworkError::Timeout),
        }
    }

    async fn get_block_details_by_height(&self, height: u64) -> NetworkResult<BlockDetails> {
        self.block_details
            .lock()
            .unwrap()
            .get(&height)
            .map(|hash| BlockDetails { hash: *hash })
            .ok_or_else(|| {
                NetworkError::MalformedResponse(format!("no block details at height {height}"))
            })
    }

    async fn get_wallet_sync_data(
        &self,
        _checkpoints: &[BlockHash],
    ) -> NetworkResult<WalletSyncData> {
        self.sync_data_calls.fetch_add(1, Ordering::SeqCst);
        match self.sync_batches.lock().unwrap().pop_front() {
            Some(Ok(items)) => Ok(WalletSyncData { items }),
            Some(Err(error)) => Err(error),
            None => Ok(WalletSyncData::default()),
        }
    }
}
