//! High-level client bundling submission, confirmation and balance reads.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};

use crate::account::key::parse_address;
use crate::config::ClientConfig;
use crate::contractkit::{Balance, BalanceReader, BalanceSource, RegistryResolver};
use crate::error::Result;
use crate::ledger::provider::connect_http;
use crate::ledger::{ConfirmationWaiter, LedgerGateway, Receipt, TransactionSubmitter};
use crate::lifecycle::CancelToken;

/// Client for one Celo node.
#[derive(Clone)]
pub struct CeloClient {
    gateway: LedgerGateway,
    submitter: TransactionSubmitter,
    waiter: ConfirmationWaiter,
    balances: Arc<dyn BalanceSource>,
    default_timeout: Duration,
}

impl CeloClient {
    /// Dial the configured node and resolve the core token contracts.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let transport = connect_http(&config.rpc.url, Duration::from_secs(config.rpc.timeout_secs))?;
        let gateway = LedgerGateway::new(Arc::new(transport));

        let registry = parse_address(&config.contracts.registry_address)?;
        let resolver = RegistryResolver::new(gateway.clone(), registry);
        let balances = BalanceReader::resolve(gateway.clone(), &resolver).await?;

        tracing::info!(rpc_url = %config.rpc.url, registry = %registry, "Client connected");
        Ok(Self::from_parts(gateway, Arc::new(balances), config))
    }

    /// Assemble a client from an existing gateway and balance source.
    pub fn from_parts(gateway: LedgerGateway, balances: Arc<dyn BalanceSource>, config: &ClientConfig) -> Self {
        let submitter = TransactionSubmitter::new(gateway.clone())
            .with_gas_limit(config.transactions.min_gas_limit);
        let waiter = ConfirmationWaiter::new(gateway.clone())
            .with_poll_interval(Duration::from_millis(config.transactions.poll_interval_ms));
        Self {
            gateway,
            submitter,
            waiter,
            balances,
            default_timeout: Duration::from_secs(config.transactions.wait_timeout_secs),
        }
    }

    /// Latest block number.
    pub async fn latest_block(&self) -> Result<u64> {
        self.gateway.latest_block().await
    }

    /// Native balance straight from the node.
    pub async fn native_balance(&self, address: Address) -> Result<U256> {
        self.gateway.balance(address).await
    }

    /// Balances of every core token, native currency included.
    pub async fn balance(&self, address: Address) -> Result<Balance> {
        self.balances.balance(address).await
    }

    /// Sign and broadcast a native transfer. See [`TransactionSubmitter::send_native`].
    pub async fn send_native(
        &self,
        private_key_hex: &str,
        from: Address,
        to: Address,
        amount: U256,
        gateway_fee_recipient: Option<Address>,
        gateway_fee: Option<U256>,
    ) -> Result<TxHash> {
        self.submitter
            .send_native(private_key_hex, from, to, amount, gateway_fee_recipient, gateway_fee)
            .await
    }

    /// Broadcast a hex-encoded signed transaction.
    pub async fn send_raw_transaction(&self, raw_hex: &str) -> Result<TxHash> {
        self.submitter.send_raw_transaction(raw_hex).await
    }

    /// Wait for a receipt, polling at the configured interval.
    pub async fn wait_for_transaction(&self, tx_hash: TxHash, timeout: Duration) -> Result<Receipt> {
        self.waiter.wait_for_transaction(tx_hash, timeout).await
    }

    /// Wait for a receipt until `timeout` or until `cancel` fires.
    pub async fn wait_for_transaction_with_cancel(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
        cancel: CancelToken,
    ) -> Result<Receipt> {
        self.waiter
            .wait_for_transaction_with_cancel(tx_hash, timeout, cancel)
            .await
    }

    /// Confirmation deadline from the configuration.
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn gateway(&self) -> &LedgerGateway {
        &self.gateway
    }
}

impl std::fmt::Debug for CeloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CeloClient")
            .field("poll_interval", &self.waiter.poll_interval())
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}
