//! Test utilities: a scripted mock node client and fixture builders.

mod node;

pub use node::MockNodeClient;

use crate::crypto;
use crate::types::{Block, BlockHash, PublicKey, Transaction, TransactionOutput};
use crate::wallet::WalletKeys;

/// Deterministic wallet keys for tests, derived from a seed byte.
pub fn test_wallet_keys(seed: u8) -> WalletKeys {
    WalletKeys::from_secrets([seed; 32], [seed.wrapping_add(1); 32])
}

/// A deterministic block hash for tests.
pub fn test_block_hash(seed: u8) -> BlockHash {
    BlockHash([seed; 32])
}

/// Build a block at `height` with the given transactions. The hash is
/// derived from the height so consecutive heights get distinct hashes.
pub fn make_block(height: u64, transactions: Vec<Transaction>) -> Block {
    Block {
        block_hash: test_block_hash(height as u8),
        block_height: height,
        transactions,
    }
}

/// Build a run of empty blocks covering `start..start + count` heights.
pub fn make_empty_blocks(start: u64, count: u64) -> Vec<Block> {
    (start..start + count).map(|h| make_block(h, vec![])).collect()
}

/// Build a transaction whose outputs at the given indices are destined for
/// `recipient`, interleaved with outputs owned by nobody the wallet knows.
///
/// `tx_seed` picks the ephemeral transaction key; `owned_indices` must be
/// positions within `0..output_count`.
pub fn make_transaction_for(
    recipient: &WalletKeys,
    tx_seed: u8,
    output_count: usize,
    owned_indices: &[usize],
    amount: u64,
    is_coinbase: bool,
) -> Transaction {
    let tx_secret = [tx_seed; 32];
    let tx_public = crypto::public_key_from_secret(&tx_secret);

    // Sender side: derivation from the recipient's public view key and the
    // ephemeral transaction secret.
    let derivation =
        crypto::generate_key_derivation(recipient.public_view_key().as_bytes(), &tx_secret)
            .expect("test view key is a valid point");

    let stranger = test_wallet_keys(tx_seed.wrapping_add(100));

    let outputs = (0..output_count)
        .map(|index| {
            let destination = if owned_indices.contains(&index) {
                recipient.public_spend_key()
            } else {
                stranger.public_spend_key()
            };
            let key =
                crypto::derive_public_key(&derivation, index as u64, destination.as_bytes())
                    .expect("test spend key is a valid point");
            TransactionOutput {
                key: PublicKey(key),
                amount,
            }
        })
        .collect();

    Transaction {
        public_key: PublicKey(tx_public),
        outputs,
        is_coinbase,
    }
}
