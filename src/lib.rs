//! CryptoNote SPV (wallet-side) sync and output-scanning client.
//!
//! This library keeps a local wallet's view of a CryptoNote chain in step
//! with a remote node and discovers which transaction outputs belong to the
//! wallet's keys:
//!
//! - Checkpoint-driven block fetching that tracks wallet height against the
//!   node's reported height
//! - Per-output ownership testing via asymmetric key derivation, yielding
//!   the key image that makes an owned output spendable
//! - Two independently cadenced poll tasks plus a sequential scanner over a
//!   shared pending queue
//!
//! # Quick Start
//!
//! ```no_run
//! use cryptonote_spv::network::HttpNodeClient;
//! use cryptonote_spv::{ClientConfig, SpvClient, WalletKeys};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://127.0.0.1:11898").with_start_height(186_000);
//!
//!     let node = HttpNodeClient::new(&config.node_url, config.request_timeout)?;
//!     let keys = WalletKeys::from_hex(
//!         "b72c00a54aef2ee122ceeb1358c46357512d74846887eaf6bd5141556a797c01",
//!         "57b6a1553b053fd53b421a6ff1ab0092c9df7c2ad66fa4b28f9fe840905c7a0f",
//!     )?;
//!
//!     let mut client = SpvClient::new(config, node, keys)?;
//!     let mut owned_inputs = client.take_owned_input_receiver().expect("first take");
//!
//!     client.start().await?;
//!     while let Some(input) = owned_inputs.recv().await {
//!         println!("owned output: {} unlocks at {}", input.amount, input.unlock_height);
//!     }
//!     client.stop().await?;
//!     Ok(())
//! }
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub mod chain;
pub mod client;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod network;
pub mod sync;
pub mod types;
pub mod wallet;

// Re-export main types for convenience
pub use chain::{CheckpointLedger, PendingQueue};
pub use client::{ClientConfig, SpvClient};
pub use error::{CryptoError, NetworkError, Result, SpvError, SyncError};
pub use logging::init_console_logging;
pub use sync::{SyncEngine, SyncStatus};
pub use tracing::level_filters::LevelFilter;
pub use types::{
    Block, BlockHash, KeyImage, NodeInfo, OwnedInput, PublicKey, SyncProgress, Transaction,
    TransactionOutput, WalletSyncData,
};
pub use wallet::{OutputScanner, WalletKeys};

/// Current version of the cryptonote-spv library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
