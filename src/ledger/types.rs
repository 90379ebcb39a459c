//! Ledger-side types: receipts and confirmation states.

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

/// Execution outcome recorded by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Success,
    Failure,
}

/// The ledger's record of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to.
    pub transaction_hash: TxHash,
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
    /// Gas consumed by execution.
    pub gas_used: u64,
    /// Execution outcome.
    pub status: ReceiptStatus,
}

impl Receipt {
    /// Whether the transaction executed successfully.
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}

/// How a confirmation wait ended.
///
/// A wait is pending until it reaches one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Receipt observed with a success status.
    Confirmed,
    /// Receipt observed with a failure status.
    Reverted,
    /// Deadline passed without a receipt.
    TimedOut,
    /// The receipt lookup itself failed.
    LookupError,
    /// The caller cancelled the wait.
    Cancelled,
}

impl ConfirmationState {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationState::Confirmed => "confirmed",
            ConfirmationState::Reverted => "reverted",
            ConfirmationState::TimedOut => "timed_out",
            ConfirmationState::LookupError => "lookup_error",
            ConfirmationState::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;

    #[test]
    fn test_receipt_serde() {
        let receipt = Receipt {
            transaction_hash: B256::repeat_byte(1),
            block_number: Some(100),
            gas_used: 21_000,
            status: ReceiptStatus::Success,
        };
        let json = serde_json::to_string(&receipt).unwrap();
        assert!(json.contains("\"success\""));
        let decoded: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, receipt);
        assert!(decoded.is_success());
    }

    #[test]
    fn test_outcome_labels_are_distinct() {
        let labels: std::collections::HashSet<_> = [
            ConfirmationState::Confirmed,
            ConfirmationState::Reverted,
            ConfirmationState::TimedOut,
            ConfirmationState::LookupError,
            ConfirmationState::Cancelled,
        ]
        .iter()
        .map(ConfirmationState::as_str)
        .collect();
        assert_eq!(labels.len(), 5);
        assert_eq!(ConfirmationState::TimedOut.as_str(), "timed_out");
    }
}
