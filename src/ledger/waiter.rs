//! Polling for transaction receipts.
//!
//! # State Transitions
//! ```text
//! Pending → Confirmed:   receipt with success status
//! Pending → Reverted:    receipt with failure status (Error::ExecutionFailed)
//! Pending → TimedOut:    no receipt once the deadline has passed
//! Pending → LookupError: receipt query failed; not retried
//! Pending → Cancelled:   caller's cancel token fired
//! ```
//!
//! Only "not mined yet" is retried. The deadline is measured from the first
//! poll attempt.

use std::time::Duration;

use alloy::primitives::TxHash;
use tokio::time::{sleep, Instant};

use crate::error::{Error, Result};
use crate::ledger::gateway::LedgerGateway;
use crate::ledger::types::{ConfirmationState, Receipt};
use crate::lifecycle::CancelToken;
use crate::observability::metrics;

/// Default pause between receipt lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Waits for submitted transactions to reach a terminal state.
#[derive(Debug, Clone)]
pub struct ConfirmationWaiter {
    gateway: LedgerGateway,
    poll_interval: Duration,
}

impl ConfirmationWaiter {
    /// Create a waiter polling every [`DEFAULT_POLL_INTERVAL`].
    pub fn new(gateway: LedgerGateway) -> Self {
        Self { gateway, poll_interval: DEFAULT_POLL_INTERVAL }
    }

    /// Override the pause between lookups.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Wait up to `timeout` for the receipt of `tx_hash`.
    pub async fn wait_for_transaction(&self, tx_hash: TxHash, timeout: Duration) -> Result<Receipt> {
        self.wait_for_transaction_with_cancel(tx_hash, timeout, CancelToken::never())
            .await
    }

    /// Like [`Self::wait_for_transaction`], but `cancel` can end the wait early.
    pub async fn wait_for_transaction_with_cancel(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
        mut cancel: CancelToken,
    ) -> Result<Receipt> {
        let start = Instant::now();
        let (state, result) = loop {
            if cancel.is_cancelled() {
                break (ConfirmationState::Cancelled, Err(Error::Cancelled));
            }
            if start.elapsed() > timeout {
                break (ConfirmationState::TimedOut, Err(Error::Timeout(timeout)));
            }

            match self.gateway.transaction_receipt(tx_hash).await {
                Err(e) => break (ConfirmationState::LookupError, Err(e)),
                Ok(Some(receipt)) if receipt.is_success() => {
                    break (ConfirmationState::Confirmed, Ok(receipt));
                }
                Ok(Some(receipt)) => {
                    break (ConfirmationState::Reverted, Err(Error::ExecutionFailed(Box::new(receipt))));
                }
                Ok(None) => {
                    tracing::debug!(tx_hash = %tx_hash, elapsed_ms = start.elapsed().as_millis() as u64, "Transaction pending");
                }
            }

            tokio::select! {
                _ = sleep(self.poll_interval) => {}
                _ = cancel.cancelled() => {}
            }
        };

        let waited = start.elapsed();
        metrics::record_confirmation(state, waited);
        match &result {
            Ok(receipt) => tracing::info!(
                tx_hash = %tx_hash,
                block_number = ?receipt.block_number,
                waited_ms = waited.as_millis() as u64,
                "Transaction confirmed"
            ),
            Err(e) => tracing::warn!(
                tx_hash = %tx_hash,
                state = state.as_str(),
                error = %e,
                "Transaction wait ended without confirmation"
            ),
        }
        result
    }
}
