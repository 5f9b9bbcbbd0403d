//! Common type definitions for the CryptoNote SPV client.
//!
//! Wire-facing types deserialize from the node's JSON (camelCase field
//! names); fixed-length identifiers are hex-encoded strings on the wire and
//! 32-byte arrays in memory.

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Defines a 32-byte identifier newtype with hex parsing, display and
/// string-backed serde.
macro_rules! hex_bytes_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(pub [u8; 32]);

        impl $name {
            /// Parse from a 64-character hex string.
            pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
                let bytes = hex::decode(s)?;
                let arr: [u8; 32] =
                    bytes.try_into().map_err(|b: Vec<u8>| CryptoError::InvalidLength {
                        expected: 32,
                        actual: b.len(),
                    })?;
                Ok(Self(arr))
            }

            /// The raw 32-byte value.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Hex encoding of the identifier.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CryptoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CryptoError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::from_hex(&s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_hex()
            }
        }
    };
}

hex_bytes_newtype! {
    /// A block hash, used as a synchronization checkpoint between wallet
    /// and node.
    BlockHash
}

hex_bytes_newtype! {
    /// A compressed Ed25519 public key (transaction key, one-time output
    /// key, or wallet spend key).
    PublicKey
}

hex_bytes_newtype! {
    /// A key image: the unique tag derived from an owned output that proves
    /// and prevents double-spending without revealing the output.
    KeyImage
}

/// Node status as reported by the `/info` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// Current chain height of the node.
    pub height: u64,

    /// Height of the wider network, if the node reports it.
    #[serde(default)]
    pub network_height: Option<u64>,
}

/// Block details returned by the block-details-by-height endpoint.
///
/// Only the hash is consumed here; it seeds the checkpoint ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDetails {
    /// Hash of the block at the requested height.
    pub hash: BlockHash,
}

/// A single transaction output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    /// The one-time public key the sender generated for this output.
    pub key: PublicKey,

    /// Amount carried by the output, in atomic units.
    pub amount: u64,
}

/// A transaction as returned in wallet sync data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The transaction public key used for output key derivation.
    pub public_key: PublicKey,

    /// Outputs in transaction order; an output's index is its position here.
    #[serde(default)]
    pub outputs: Vec<TransactionOutput>,

    /// Whether this is the block's coin-generating (miner reward)
    /// transaction, whose outputs are subject to the unlock window.
    #[serde(default)]
    pub is_coinbase: bool,
}

/// A block returned by the wallet sync data endpoint. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Hash of the block.
    pub block_hash: BlockHash,

    /// Height of the block.
    pub block_height: u64,

    /// Transactions in block order.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Response body of the wallet sync data endpoint: the next contiguous run
/// of blocks after the newest checkpoint the node recognizes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSyncData {
    /// Blocks in ascending height order. May be empty or shorter than the
    /// requested window; both are normal partial-availability outcomes.
    #[serde(default)]
    pub items: Vec<Block>,
}

/// A transaction input the wallet can spend, discovered by scanning.
///
/// Created exactly once per owned output and handed to the consumer of the
/// owned-input stream; re-scanning the same output reproduces the same key
/// image, so downstream deduplication is by key image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedInput {
    /// Key image uniquely identifying the spendable output.
    pub key_image: KeyImage,

    /// Amount of the output, in atomic units.
    pub amount: u64,

    /// Index of the output within its transaction.
    pub output_index: u64,

    /// Height of the block the output originated in.
    pub block_height: u64,

    /// Height at or above which the output becomes spendable.
    pub unlock_height: u64,
}

/// Snapshot of sync progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncProgress {
    /// Durable wallet height: every block at or below it is fully scanned
    /// or already queued for scanning.
    pub wallet_height: u64,

    /// Last node height seen by the height poll, if any.
    pub node_height: Option<u64>,

    /// Number of fetched blocks awaiting scan.
    pub pending_blocks: usize,

    /// Number of checkpoints in the ledger.
    pub checkpoints: usize,
}
