//! Unit tests for output scanning.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::{mpsc, RwLock};

    use crate::sync::SyncState;
    use crate::test_utils::{make_block, make_empty_blocks, make_transaction_for, test_wallet_keys};
    use crate::types::OwnedInput;
    use crate::wallet::OutputScanner;

    const UNLOCK_WINDOW: u64 = 60;

    fn scanner_with_channel(seed: u8) -> (OutputScanner, mpsc::UnboundedReceiver<OwnedInput>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scanner = OutputScanner::new(test_wallet_keys(seed), UNLOCK_WINDOW, tx);
        (scanner, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<OwnedInput>) -> Vec<OwnedInput> {
        let mut inputs = Vec::new();
        while let Ok(input) = rx.try_recv() {
            inputs.push(input);
        }
        inputs
    }

    /// A 32-byte string that is not a valid compressed Edwards point.
    fn non_point_key() -> crate::types::PublicKey {
        let bytes = (0u8..=255)
            .map(|b| [b; 32])
            .find(|candidate| {
                curve25519_dalek::edwards::CompressedEdwardsY(*candidate)
                    .decompress()
                    .is_none()
            })
            .expect("some candidate must fail decompression");
        crate::types::PublicKey(bytes)
    }

    async fn state_with_blocks(blocks: Vec<crate::types::Block>) -> Arc<RwLock<SyncState>> {
        let state = SyncState::default();
        let state = Arc::new(RwLock::new(state));
        {
            let mut guard = state.write().await;
            for block in blocks {
                guard.queue.push(block).unwrap();
            }
        }
        state
    }

    #[tokio::test]
    async fn empty_block_advances_height_and_yields_nothing() {
        let (scanner, mut rx) = scanner_with_channel(1);
        let state = state_with_blocks(vec![make_block(42, vec![])]).await;

        let processed = scanner.process_queue(&state).await;

        assert_eq!(processed, 1);
        assert!(drain(&mut rx).is_empty());
        let guard = state.read().await;
        assert_eq!(guard.wallet_height, 42);
        assert!(guard.queue.is_empty());
    }

    #[tokio::test]
    async fn two_owned_outputs_yield_two_inputs_with_distinct_indices() {
        let keys = test_wallet_keys(2);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scanner = OutputScanner::new(keys.clone(), UNLOCK_WINDOW, tx);

        // Four outputs, positions 1 and 3 destined for the wallet. Both must
        // be found even though the match at 1 comes first.
        let transaction = make_transaction_for(&keys, 9, 4, &[1, 3], 5000, false);
        let state = state_with_blocks(vec![make_block(100, vec![transaction])]).await;

        scanner.process_queue(&state).await;

        let inputs = drain(&mut rx);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].output_index, 1);
        assert_eq!(inputs[1].output_index, 3);
        assert_ne!(inputs[0].key_image, inputs[1].key_image);
        assert!(inputs.iter().all(|i| i.amount == 5000 && i.block_height == 100));
    }

    #[tokio::test]
    async fn outputs_for_other_wallets_are_skipped() {
        let ours = test_wallet_keys(3);
        let theirs = test_wallet_keys(40);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scanner = OutputScanner::new(ours, UNLOCK_WINDOW, tx);

        let transaction = make_transaction_for(&theirs, 11, 3, &[0, 1, 2], 1000, false);
        let state = state_with_blocks(vec![make_block(50, vec![transaction])]).await;

        scanner.process_queue(&state).await;

        assert!(drain(&mut rx).is_empty());
        assert_eq!(state.read().await.wallet_height, 50);
    }

    #[tokio::test]
    async fn rescanning_the_same_output_yields_the_same_key_image() {
        let keys = test_wallet_keys(4);
        let transaction = make_transaction_for(&keys, 13, 1, &[0], 777, false);
        let block = make_block(60, vec![transaction]);

        let mut key_images = Vec::new();
        for _ in 0..2 {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let scanner = OutputScanner::new(keys.clone(), UNLOCK_WINDOW, tx);
            let state = state_with_blocks(vec![block.clone()]).await;
            scanner.process_queue(&state).await;

            let inputs = drain(&mut rx);
            assert_eq!(inputs.len(), 1);
            key_images.push(inputs[0].key_image);
        }

        assert_eq!(key_images[0], key_images[1]);
    }

    #[tokio::test]
    async fn coinbase_outputs_honor_the_unlock_window() {
        let keys = test_wallet_keys(5);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scanner = OutputScanner::new(keys.clone(), UNLOCK_WINDOW, tx);

        let coinbase = make_transaction_for(&keys, 17, 1, &[0], 30000, true);
        let ordinary = make_transaction_for(&keys, 19, 1, &[0], 4000, false);
        let state =
            state_with_blocks(vec![make_block(200, vec![coinbase, ordinary])]).await;

        scanner.process_queue(&state).await;

        let inputs = drain(&mut rx);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].unlock_height, 200 + UNLOCK_WINDOW);
        assert_eq!(inputs[1].unlock_height, 200);
    }

    #[tokio::test]
    async fn queue_drains_in_height_order_and_height_tracks_highest_block() {
        let (scanner, mut rx) = scanner_with_channel(6);
        let state = state_with_blocks(make_empty_blocks(101, 5)).await;

        // Fetch-side accounting has already credited the batch.
        state.write().await.wallet_height = 105;

        let processed = scanner.process_queue(&state).await;

        assert_eq!(processed, 5);
        assert!(drain(&mut rx).is_empty());
        let guard = state.read().await;
        assert_eq!(guard.wallet_height, 105);
        assert!(guard.queue.is_empty());
    }

    #[tokio::test]
    async fn malformed_transaction_key_does_not_block_the_rest_of_the_block() {
        let keys = test_wallet_keys(7);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scanner = OutputScanner::new(keys.clone(), UNLOCK_WINDOW, tx);

        // A transaction key that is not a valid curve point.
        let mut bad_tx = make_transaction_for(&keys, 23, 1, &[0], 100, false);
        bad_tx.public_key = non_point_key();
        let good_tx = make_transaction_for(&keys, 29, 1, &[0], 200, false);

        let state = state_with_blocks(vec![make_block(70, vec![bad_tx, good_tx])]).await;
        scanner.process_queue(&state).await;

        let inputs = drain(&mut rx);
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].amount, 200);
        assert_eq!(state.read().await.wallet_height, 70);
    }

    #[tokio::test]
    async fn malformed_output_key_is_skipped_without_losing_later_matches() {
        let keys = test_wallet_keys(8);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scanner = OutputScanner::new(keys.clone(), UNLOCK_WINDOW, tx);

        // Output 0 carries a key that is not a valid curve point; output 1 is
        // a well-formed output destined for the wallet.
        let mut transaction = make_transaction_for(&keys, 31, 2, &[1], 900, false);
        transaction.outputs[0].key = non_point_key();

        let state = state_with_blocks(vec![make_block(80, vec![transaction])]).await;
        scanner.process_queue(&state).await;

        let inputs = drain(&mut rx);
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].output_index, 1);
        assert_eq!(inputs[0].amount, 900);
        assert_eq!(state.read().await.wallet_height, 80);
    }
}
