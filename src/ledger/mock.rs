//! Scriptable in-memory transport.
//!
//! Stands in for a ledger node in tests: responses are configured up front,
//! and every call is logged so tests can assert on ordering and counts.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use alloy::primitives::{keccak256, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::ledger::gateway::RpcTransport;
use crate::ledger::types::Receipt;

/// Default network id, the Alfajores testnet.
pub const DEFAULT_NETWORK_ID: u64 = 44787;

struct Script {
    block_number: u64,
    balance: U256,
    nonce: Result<u64>,
    gas_price: Result<u128>,
    network_id: Result<u64>,
    send_error: Option<Error>,
    receipts: VecDeque<Result<Option<Receipt>>>,
    call_responses: HashMap<(Address, Bytes), Bytes>,
}

#[derive(Default)]
struct Log {
    calls: Vec<&'static str>,
    sent: Vec<Vec<u8>>,
    receipt_polls: Vec<Instant>,
}

/// In-memory [`RpcTransport`] with scripted responses.
pub struct MockTransport {
    script: Mutex<Script>,
    log: Mutex<Log>,
}

impl MockTransport {
    /// A transport answering every query successfully with neutral values.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                block_number: 1,
                balance: U256::ZERO,
                nonce: Ok(0),
                gas_price: Ok(1_000_000_000),
                network_id: Ok(DEFAULT_NETWORK_ID),
                send_error: None,
                receipts: VecDeque::new(),
                call_responses: HashMap::new(),
            }),
            log: Mutex::new(Log::default()),
        }
    }

    pub fn with_block_number(self, number: u64) -> Self {
        self.script().block_number = number;
        self
    }

    pub fn with_balance(self, balance: U256) -> Self {
        self.script().balance = balance;
        self
    }

    pub fn with_nonce(self, nonce: Result<u64>) -> Self {
        self.script().nonce = nonce;
        self
    }

    pub fn with_gas_price(self, gas_price: Result<u128>) -> Self {
        self.script().gas_price = gas_price;
        self
    }

    pub fn with_network_id(self, network_id: u64) -> Self {
        self.script().network_id = Ok(network_id);
        self
    }

    pub fn with_network_id_error(self, error: Error) -> Self {
        self.script().network_id = Err(error);
        self
    }

    pub fn with_send_error(self, error: Error) -> Self {
        self.script().send_error = Some(error);
        self
    }

    /// Queue the next receipt lookup result.
    ///
    /// Results are served in order; the last one keeps being served once the
    /// queue is down to it. With nothing queued, lookups report "not mined".
    pub fn push_receipt(&self, receipt: Result<Option<Receipt>>) {
        self.script().receipts.push_back(receipt);
    }

    /// Answer `eth_call` to `to` with exactly `data` by returning `output`.
    pub fn respond_to_call(&self, to: Address, data: Bytes, output: Bytes) {
        self.script().call_responses.insert((to, data), output);
    }

    /// Names of the transport methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.log().calls.clone()
    }

    /// Number of times `method` was called.
    pub fn call_count(&self, method: &str) -> usize {
        self.log().calls.iter().filter(|m| **m == method).count()
    }

    /// Raw payloads passed to `send_raw_transaction`.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.log().sent.clone()
    }

    /// Instants at which receipts were polled.
    pub fn receipt_polls(&self) -> Vec<Instant> {
        self.log().receipt_polls.clone()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, method: &'static str) {
        self.log().calls.push(method);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn latest_block_number(&self) -> Result<u64> {
        self.record("latest_block_number");
        Ok(self.script().block_number)
    }

    async fn balance(&self, _address: Address) -> Result<U256> {
        self.record("balance");
        Ok(self.script().balance)
    }

    async fn pending_nonce(&self, _address: Address) -> Result<u64> {
        self.record("pending_nonce");
        self.script().nonce.clone()
    }

    async fn suggest_gas_price(&self) -> Result<u128> {
        self.record("suggest_gas_price");
        self.script().gas_price.clone()
    }

    async fn network_id(&self) -> Result<u64> {
        self.record("network_id");
        self.script().network_id.clone()
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash> {
        self.record("send_raw_transaction");
        if let Some(error) = self.script().send_error.clone() {
            return Err(error);
        }
        self.log().sent.push(raw.to_vec());
        Ok(keccak256(raw))
    }

    async fn transaction_receipt(&self, _hash: TxHash) -> Result<Option<Receipt>> {
        self.record("transaction_receipt");
        self.log().receipt_polls.push(Instant::now());
        let mut script = self.script();
        match script.receipts.len() {
            0 => Ok(None),
            1 => script.receipts[0].clone(),
            _ => script.receipts.pop_front().unwrap_or(Ok(None)),
        }
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.record("call");
        self.script()
            .call_responses
            .get(&(to, data))
            .cloned()
            .ok_or_else(|| Error::Transport("execution reverted".into()))
    }
}
