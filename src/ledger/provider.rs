//! [`RpcTransport`] over an alloy HTTP provider.
//!
//! Every call is bounded by the configured RPC timeout. Errors are reported
//! as [`Error::Transport`] and never retried here.

use std::future::IntoFuture;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256, U64};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportResult;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::ledger::gateway::RpcTransport;
use crate::ledger::types::{Receipt, ReceiptStatus};

/// Transport backed by an alloy provider.
pub struct AlloyTransport<P> {
    provider: P,
    timeout_duration: Duration,
}

/// Dial `rpc_url` over HTTP.
pub fn connect_http(
    rpc_url: &str,
    timeout_duration: Duration,
) -> Result<AlloyTransport<impl Provider + Send + Sync + 'static>> {
    let url: url::Url = rpc_url
        .parse()
        .map_err(|e| Error::Transport(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;
    let provider = ProviderBuilder::new().connect_http(url);
    tracing::debug!(rpc_url, "RPC transport created");
    Ok(AlloyTransport::new(provider, timeout_duration))
}

impl<P> AlloyTransport<P>
where
    P: Provider + Send + Sync + 'static,
{
    /// Wrap an existing provider.
    pub fn new(provider: P, timeout_duration: Duration) -> Self {
        Self { provider, timeout_duration }
    }

    async fn request<F, T>(&self, method: &'static str, call: F) -> Result<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeout_duration, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Error::Transport(format!("{method}: {e}"))),
            Err(_) => Err(Error::Transport(format!(
                "{method}: timed out after {:?}",
                self.timeout_duration
            ))),
        }
    }
}

/// Receipt fields as returned by `eth_getTransactionReceipt`.
///
/// Parsed loosely so Celo-specific receipt fields never break decoding.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: TxHash,
    block_number: Option<U64>,
    gas_used: U64,
    status: Option<U64>,
}

impl From<RpcReceipt> for Receipt {
    fn from(raw: RpcReceipt) -> Self {
        let status = match raw.status {
            Some(status) if status == U64::from(1) => ReceiptStatus::Success,
            _ => ReceiptStatus::Failure,
        };
        Receipt {
            transaction_hash: raw.transaction_hash,
            block_number: raw.block_number.map(|n| n.to::<u64>()),
            gas_used: raw.gas_used.to::<u64>(),
            status,
        }
    }
}

#[async_trait]
impl<P> RpcTransport for AlloyTransport<P>
where
    P: Provider + Send + Sync + 'static,
{
    async fn latest_block_number(&self) -> Result<u64> {
        self.request("eth_blockNumber", self.provider.get_block_number()).await
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.request("eth_getBalance", self.provider.get_balance(address)).await
    }

    async fn pending_nonce(&self, address: Address) -> Result<u64> {
        self.request(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    async fn suggest_gas_price(&self) -> Result<u128> {
        self.request("eth_gasPrice", self.provider.get_gas_price()).await
    }

    async fn network_id(&self) -> Result<u64> {
        self.request("net_version", self.provider.get_net_version()).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash> {
        let pending = self
            .request("eth_sendRawTransaction", self.provider.send_raw_transaction(raw))
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<Receipt>> {
        let raw: Option<RpcReceipt> = self
            .request(
                "eth_getTransactionReceipt",
                self.provider.raw_request::<_, Option<RpcReceipt>>("eth_getTransactionReceipt".into(), (hash,)),
            )
            .await?;
        Ok(raw.map(Receipt::from))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        self.request("eth_call", self.provider.call(tx)).await
    }
}

impl<P> std::fmt::Debug for AlloyTransport<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyTransport")
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
