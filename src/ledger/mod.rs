//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! TransactionSubmitter (nonce, gas price, chain id, sign)
//!     → LedgerGateway (logging, metrics)
//!     → RpcTransport (AlloyTransport over HTTP, or MockTransport with `test-util`)
//! ConfirmationWaiter
//!     → LedgerGateway::transaction_receipt every poll interval
//! ```
//!
//! # Security Constraints
//! - Private keys are parsed per call and dropped after signing
//! - Never log private keys
//! - Every RPC call has a deadline; failures are surfaced, never retried

pub mod gateway;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod provider;
pub mod submitter;
pub mod transaction;
pub mod types;
pub mod waiter;

pub use gateway::{LedgerGateway, RpcTransport};
pub use submitter::TransactionSubmitter;
pub use transaction::{CeloTransaction, SignedTransaction, MIN_GAS_LIMIT};
pub use types::{ConfirmationState, Receipt, ReceiptStatus};
pub use waiter::{ConfirmationWaiter, DEFAULT_POLL_INTERVAL};
