//! Output-ownership scanning over queued blocks.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use crate::crypto;
use crate::sync::SyncState;
use crate::types::{Block, KeyImage, OwnedInput, Transaction};
use crate::wallet::WalletKeys;

/// Scans fetched blocks for outputs spendable by the wallet's keys.
///
/// Blocks are consumed from the pending queue in strict height order. A
/// block is credited only after every one of its transactions has been
/// scanned: the wallet height advance and the queue removal happen together,
/// so an interrupted scan leaves the block queued for a full re-scan.
/// Re-scanning is idempotent; the same owned output always yields the same
/// key image.
#[derive(Debug, Clone)]
pub struct OutputScanner {
    keys: WalletKeys,
    unlock_confirmations: u64,
    owned_tx: mpsc::UnboundedSender<OwnedInput>,
}

impl OutputScanner {
    /// Create a scanner emitting owned inputs on `owned_tx`.
    pub fn new(
        keys: WalletKeys,
        unlock_confirmations: u64,
        owned_tx: mpsc::UnboundedSender<OwnedInput>,
    ) -> Self {
        Self {
            keys,
            unlock_confirmations,
            owned_tx,
        }
    }

    /// Drain the pending queue, scanning each block in FIFO order.
    ///
    /// Returns the number of blocks fully processed.
    pub async fn process_queue(&self, state: &Arc<RwLock<SyncState>>) -> usize {
        let mut processed = 0;

        loop {
            // Scan on a clone so the fetch tasks are never blocked behind
            // curve arithmetic.
            let block = match state.read().await.queue.front() {
                Some(block) => block.clone(),
                None => break,
            };

            let inputs = self.scan_block(&block);
            let owned = inputs.len();

            {
                let mut state = state.write().await;
                for input in inputs {
                    // Receiver dropped means no one wants the stream; the
                    // height bookkeeping still has to advance.
                    let _ = self.owned_tx.send(input);
                }
                state.queue.pop_front();
                state.wallet_height = state.wallet_height.max(block.block_height);
            }

            if owned > 0 {
                tracing::info!(
                    height = block.block_height,
                    owned,
                    "found owned output(s) in block"
                );
            } else {
                tracing::debug!(height = block.block_height, "block scanned, nothing owned");
            }
            processed += 1;
        }

        processed
    }

    /// Scan every transaction of a block, collecting all owned inputs.
    fn scan_block(&self, block: &Block) -> Vec<OwnedInput> {
        let mut inputs = Vec::new();
        for transaction in &block.transactions {
            inputs.extend(self.scan_transaction(transaction, block.block_height));
        }
        inputs
    }

    /// Test every output of a transaction for ownership.
    ///
    /// A single transaction may carry several outputs to the same wallet, so
    /// the test runs for every output even after a match. A malformed output
    /// is skipped without aborting the rest of the transaction.
    fn scan_transaction(&self, transaction: &Transaction, block_height: u64) -> Vec<OwnedInput> {
        let derivation = match crypto::generate_key_derivation(
            transaction.public_key.as_bytes(),
            self.keys.private_view_key(),
        ) {
            Ok(derivation) => derivation,
            Err(e) => {
                tracing::warn!(
                    tx_key = %transaction.public_key,
                    error = %e,
                    "skipping transaction with malformed public key"
                );
                return Vec::new();
            }
        };

        let mut inputs = Vec::new();
        for (index, output) in transaction.outputs.iter().enumerate() {
            let index = index as u64;

            let candidate =
                match crypto::underive_public_key(&derivation, index, output.key.as_bytes()) {
                    Ok(candidate) => candidate,
                    Err(e) => {
                        tracing::warn!(index, error = %e, "skipping malformed output");
                        continue;
                    }
                };

            if candidate != self.keys.public_spend_key().0 {
                continue;
            }

            let key_image = match crypto::generate_key_image(
                &derivation,
                index,
                self.keys.private_spend_key(),
            ) {
                Ok(key_image) => key_image,
                Err(e) => {
                    tracing::warn!(index, error = %e, "owned output but key image failed");
                    continue;
                }
            };

            inputs.push(OwnedInput {
                key_image: KeyImage(key_image),
                amount: output.amount,
                output_index: index,
                block_height,
                unlock_height: self.unlock_height(transaction, block_height),
            });
        }

        inputs
    }

    /// Coin-generating outputs unlock only after the configured confirmation
    /// window; ordinary outputs are spendable from their origin height.
    fn unlock_height(&self, transaction: &Transaction, block_height: u64) -> u64 {
        if transaction.is_coinbase {
            block_height + self.unlock_confirmations
        } else {
            block_height
        }
    }
}
