//! HTTP implementation of [`NodeClient`] over the node's JSON API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};
use crate::network::NodeClient;
use crate::types::{BlockDetails, BlockHash, NodeInfo, WalletSyncData};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockDetailsByHeightRequest {
    block_height: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockDetailsResponse {
    block: BlockDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletSyncDataRequest<'a> {
    block_hash_checkpoints: &'a [BlockHash],
}

/// Node client over the node's HTTP JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpNodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpNodeClient {
    /// Create a client for a node at `base_url` (e.g. `http://127.0.0.1:11898`)
    /// with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> NetworkResult<Self> {
        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(NetworkError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn get_node_info(&self) -> NetworkResult<NodeInfo> {
        let info = self
            .http
            .get(self.url("info"))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| NetworkError::Request(e.to_string()))?
            .json::<NodeInfo>()
            .await?;

        tracing::trace!(height = info.height, "fetched node info");
        Ok(info)
    }

    async fn get_block_details_by_height(&self, height: u64) -> NetworkResult<BlockDetails> {
        let response = self
            .http
            .post(self.url("get_block_details_by_height"))
            .json(&BlockDetailsByHeightRequest { block_height: height })
            .send()
            .await?
            .error_for_status()
            .map_err(|e| NetworkError::Request(e.to_string()))?
            .json::<BlockDetailsResponse>()
            .await?;

        Ok(response.block)
    }

    async fn get_wallet_sync_data(
        &self,
        checkpoints: &[BlockHash],
    ) -> NetworkResult<WalletSyncData> {
        let data = self
            .http
            .post(self.url("getwalletsyncdata"))
            .json(&WalletSyncDataRequest { block_hash_checkpoints: checkpoints })
            .send()
            .await?
            .error_for_status()
            .map_err(|e| NetworkError::Request(e.to_string()))?
            .json::<WalletSyncData>()
            .await?;

        tracing::trace!(blocks = data.items.len(), "fetched wallet sync data");
        Ok(data)
    }
}
