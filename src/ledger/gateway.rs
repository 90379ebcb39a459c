//! Shared handle over one RPC connection.
//!
//! # Responsibilities
//! - Define the transport seam ([`RpcTransport`]) the rest of the crate uses
//! - Log and count every round-trip
//! - Stay cheap to clone and safe to share between tasks

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

use crate::error::Result;
use crate::ledger::types::Receipt;
use crate::observability::metrics;

/// JSON-RPC operations the client needs from a ledger node.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Number of the latest block header.
    async fn latest_block_number(&self) -> Result<u64>;

    /// Native balance of an account at the latest block.
    async fn balance(&self, address: Address) -> Result<U256>;

    /// Next nonce for `address`, counting pending transactions.
    async fn pending_nonce(&self, address: Address) -> Result<u64>;

    /// Gas price suggested by the node.
    async fn suggest_gas_price(&self) -> Result<u128>;

    /// Network identifier, used as the EIP-155 chain id.
    async fn network_id(&self) -> Result<u64>;

    /// Broadcast a signed transaction and return its hash.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash>;

    /// Receipt of a transaction, `None` while it is not yet mined.
    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<Receipt>>;

    /// Read-only contract call at the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;
}

/// Gateway to the ledger node.
#[derive(Clone)]
pub struct LedgerGateway {
    transport: Arc<dyn RpcTransport>,
}

impl LedgerGateway {
    /// Wrap an existing transport.
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Latest block number.
    pub async fn latest_block(&self) -> Result<u64> {
        observe("latest_block_number", self.transport.latest_block_number().await)
    }

    /// Native currency balance.
    pub async fn balance(&self, address: Address) -> Result<U256> {
        observe("balance", self.transport.balance(address).await)
    }

    /// Pending nonce of `address`.
    pub async fn pending_nonce(&self, address: Address) -> Result<u64> {
        observe("pending_nonce", self.transport.pending_nonce(address).await)
    }

    /// Suggested gas price in the smallest unit.
    pub async fn suggest_gas_price(&self) -> Result<u128> {
        observe("suggest_gas_price", self.transport.suggest_gas_price().await)
    }

    /// Chain id used for signing.
    pub async fn chain_id(&self) -> Result<u64> {
        observe("network_id", self.transport.network_id().await)
    }

    /// Submit raw signed bytes.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash> {
        let hash = observe("send_raw_transaction", self.transport.send_raw_transaction(raw).await)?;
        tracing::info!(tx_hash = %hash, bytes = raw.len(), "Transaction broadcast");
        Ok(hash)
    }

    /// Receipt lookup; `Ok(None)` means not mined yet.
    pub async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<Receipt>> {
        observe("transaction_receipt", self.transport.transaction_receipt(hash).await)
    }

    /// Read-only contract call.
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        observe("call", self.transport.call(to, data).await)
    }
}

impl std::fmt::Debug for LedgerGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerGateway").finish_non_exhaustive()
    }
}

fn observe<T>(method: &'static str, result: Result<T>) -> Result<T> {
    metrics::record_rpc(method, result.is_ok());
    if let Err(e) = &result {
        tracing::warn!(method, error = %e, "RPC call failed");
    }
    result
}
