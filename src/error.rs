//! Client error types.

use std::time::Duration;

use thiserror::Error;

use crate::ledger::types::Receipt;

/// Errors surfaced by key handling, submission and confirmation.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed hex, wrong length, or a point that is not on the curve.
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// Malformed raw transaction payload.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Node unreachable, RPC-level failure, or RPC timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Transaction was mined but reverted. The receipt is kept for diagnostics.
    #[error("Transaction {} failed to execute", .0.transaction_hash)]
    ExecutionFailed(Box<Receipt>),

    /// No receipt was observed before the deadline.
    #[error("Transaction not found within timeout period of {0:?}")]
    Timeout(Duration),

    /// A required on-chain resource is missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The wait was cancelled by the caller.
    #[error("Wait cancelled")]
    Cancelled,

    /// Signing the transaction failed.
    #[error("Signing failed: {0}")]
    Signing(String),
}

impl Error {
    /// The receipt attached to an on-chain execution failure, if any.
    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            Error::ExecutionFailed(receipt) => Some(receipt),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::ReceiptStatus;
    use alloy::primitives::B256;

    #[test]
    fn test_error_display() {
        let err = Error::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Transaction not found within timeout period of 5s");

        let err = Error::InvalidKeyFormat("odd length".into());
        assert!(err.to_string().contains("odd length"));
    }

    #[test]
    fn test_execution_failed_keeps_receipt() {
        let receipt = Receipt {
            transaction_hash: B256::repeat_byte(0xab),
            block_number: Some(7),
            gas_used: 21_000,
            status: ReceiptStatus::Failure,
        };
        let err = Error::ExecutionFailed(Box::new(receipt.clone()));
        assert_eq!(err.receipt(), Some(&receipt));
        assert!(err.to_string().contains("failed to execute"));
        assert!(Error::Cancelled.receipt().is_none());
    }
}
