//! Building, signing and broadcasting transfers.
//!
//! # Ordering
//! ```text
//! pending nonce → gas price → assemble → chain id → sign → broadcast
//! ```
//! Each step runs only if the previous one succeeded, so nothing is signed
//! or sent unless every parameter was gathered.

use alloy::primitives::{Address, TxHash, U256};
use alloy::signers::local::PrivateKeySigner;

use crate::account::key;
use crate::error::{Error, Result};
use crate::ledger::gateway::LedgerGateway;
use crate::ledger::transaction::{CeloTransaction, MIN_GAS_LIMIT};
use crate::observability::metrics;

/// Submits native-currency transfers and pre-signed payloads.
#[derive(Debug, Clone)]
pub struct TransactionSubmitter {
    gateway: LedgerGateway,
    gas_limit: u64,
}

impl TransactionSubmitter {
    /// Create a submitter using the default transfer gas limit.
    pub fn new(gateway: LedgerGateway) -> Self {
        Self { gateway, gas_limit: MIN_GAS_LIMIT }
    }

    /// Override the gas limit attached to transfers.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Transfer `amount` of the native token from `from` to `to`.
    ///
    /// Fresh nonce, gas price and chain id are fetched on every call; callers
    /// sending concurrently from one address must serialise themselves.
    /// Returns the content hash of the broadcast transaction.
    pub async fn send_native(
        &self,
        private_key_hex: &str,
        from: Address,
        to: Address,
        amount: U256,
        gateway_fee_recipient: Option<Address>,
        gateway_fee: Option<U256>,
    ) -> Result<TxHash> {
        let nonce = self.gateway.pending_nonce(from).await?;
        let gas_price = self.gateway.suggest_gas_price().await?;

        let mut tx = CeloTransaction::transfer(nonce, to, amount, self.gas_limit, gas_price, 0)
            .with_gateway_fee(gateway_fee_recipient, gateway_fee);

        let chain_id = self.gateway.chain_id().await?;
        tx.chain_id = chain_id;

        let signing_key = key::parse_private_key(private_key_hex)?;
        let signer_address = key::address_of_signing_key(&signing_key);
        if signer_address != from {
            tracing::warn!(
                from = %from,
                signer = %signer_address,
                "Sender address does not match the signing key"
            );
        }
        let signer = PrivateKeySigner::from_signing_key(signing_key);

        let signed = tx.sign(&signer)?;
        tracing::debug!(
            tx_hash = %signed.hash(),
            nonce,
            gas_price,
            chain_id,
            to = %to,
            "Transfer signed"
        );

        self.gateway.send_raw_transaction(&signed.encoded()).await?;
        metrics::record_submission("native");
        Ok(signed.hash())
    }

    /// Broadcast a hex-encoded signed transaction and return the node's hash.
    ///
    /// A leading `0x` is accepted.
    pub async fn send_raw_transaction(&self, raw_hex: &str) -> Result<TxHash> {
        let digits = raw_hex.strip_prefix("0x").unwrap_or(raw_hex);
        if digits.is_empty() {
            return Err(Error::InvalidEncoding("raw transaction is empty".into()));
        }
        let raw = hex::decode(digits)
            .map_err(|e| Error::InvalidEncoding(format!("raw transaction: {e}")))?;

        let hash = self.gateway.send_raw_transaction(&raw).await?;
        metrics::record_submission("raw");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::mock::MockTransport;
    use alloy::primitives::keccak256;
    use std::sync::Arc;

    const PRIVATE_KEY: &str = "c3af5ee3619783355c1504814e12230bdfc7b5e336f18fef336615e54881f4db";

    fn sender() -> Address {
        key::parse_address("5dB994389C7495996A313F830f21015B9F8127B0").unwrap()
    }

    fn submitter(transport: &Arc<MockTransport>) -> TransactionSubmitter {
        TransactionSubmitter::new(LedgerGateway::new(transport.clone()))
    }

    #[tokio::test]
    async fn test_send_native_call_order() {
        let transport = Arc::new(MockTransport::new().with_nonce(Ok(9)));
        let hash = submitter(&transport)
            .send_native(PRIVATE_KEY, sender(), Address::repeat_byte(0x42), U256::from(1000), None, None)
            .await
            .unwrap();

        assert_eq!(
            transport.calls(),
            vec!["pending_nonce", "suggest_gas_price", "network_id", "send_raw_transaction"]
        );
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(hash, keccak256(&sent[0]));
    }

    #[tokio::test]
    async fn test_gas_price_failure_stops_flow() {
        let transport = Arc::new(
            MockTransport::new().with_gas_price(Err(Error::Transport("gas oracle down".into()))),
        );
        let err = submitter(&transport)
            .send_native(PRIVATE_KEY, sender(), Address::ZERO, U256::from(1), None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(msg) if msg == "gas oracle down"));
        assert_eq!(transport.call_count("pending_nonce"), 1);
        assert_eq!(transport.call_count("network_id"), 0);
        assert_eq!(transport.call_count("send_raw_transaction"), 0);
    }

    #[tokio::test]
    async fn test_nonce_failure_stops_flow() {
        let transport = Arc::new(MockTransport::new().with_nonce(Err(Error::Transport("timeout".into()))));
        let result = submitter(&transport)
            .send_native(PRIVATE_KEY, sender(), Address::ZERO, U256::from(1), None, None)
            .await;

        assert!(matches!(result, Err(Error::Transport(msg)) if msg == "timeout"));
        assert_eq!(transport.calls(), vec!["pending_nonce"]);
    }

    #[tokio::test]
    async fn test_chain_id_failure_stops_flow() {
        let transport = Arc::new(
            MockTransport::new().with_network_id_error(Error::Transport("net_version".into())),
        );
        let result = submitter(&transport)
            .send_native(PRIVATE_KEY, sender(), Address::ZERO, U256::from(1), None, None)
            .await;

        assert!(matches!(result, Err(Error::Transport(msg)) if msg == "net_version"));
        assert_eq!(transport.call_count("send_raw_transaction"), 0);
    }

    #[tokio::test]
    async fn test_invalid_private_key_is_not_submitted() {
        let transport = Arc::new(MockTransport::new());
        let err = submitter(&transport)
            .send_native("deadbeef", sender(), Address::ZERO, U256::from(1), None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidKeyFormat(_)));
        assert_eq!(transport.call_count("send_raw_transaction"), 0);
    }

    #[tokio::test]
    async fn test_submission_error_is_surfaced() {
        let transport = Arc::new(
            MockTransport::new().with_send_error(Error::Transport("nonce too low".into())),
        );
        let err = submitter(&transport)
            .send_native(PRIVATE_KEY, sender(), Address::ZERO, U256::from(1), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(msg) if msg == "nonce too low"));
    }

    #[tokio::test]
    async fn test_gas_limit_and_gateway_fee_reach_the_wire() {
        let transport = Arc::new(MockTransport::new());
        let plain = submitter(&transport)
            .send_native(PRIVATE_KEY, sender(), Address::ZERO, U256::from(1), None, None)
            .await
            .unwrap();
        let with_fee = submitter(&transport)
            .with_gas_limit(50_000)
            .send_native(
                PRIVATE_KEY,
                sender(),
                Address::ZERO,
                U256::from(1),
                Some(Address::repeat_byte(0x33)),
                Some(U256::from(10)),
            )
            .await
            .unwrap();

        assert_ne!(plain, with_fee);
        let sent = transport.sent();
        assert!(sent[1].len() > sent[0].len());
    }

    #[tokio::test]
    async fn test_mismatched_sender_still_signs_with_key() {
        let transport = Arc::new(MockTransport::new());
        let other = Address::repeat_byte(0x77);
        let hash = submitter(&transport)
            .send_native(PRIVATE_KEY, other, Address::repeat_byte(0x42), U256::from(5), None, None)
            .await
            .unwrap();

        assert_eq!(hash, keccak256(&transport.sent()[0]));
        let signer = key::address_of_signing_key(&key::parse_private_key(PRIVATE_KEY).unwrap());
        assert_eq!(signer, sender());
        assert_ne!(signer, other);
    }

    #[tokio::test]
    async fn test_send_raw_transaction() {
        let transport = Arc::new(MockTransport::new());
        let hash = submitter(&transport).send_raw_transaction("0xf86b01").await.unwrap();
        assert_eq!(transport.sent(), vec![vec![0xf8, 0x6b, 0x01]]);
        assert_eq!(hash, keccak256([0xf8, 0x6b, 0x01]));
    }

    #[tokio::test]
    async fn test_send_raw_transaction_rejects_bad_hex() {
        let transport = Arc::new(MockTransport::new());
        let submitter = submitter(&transport);
        for input in ["", "0x", "abc", "zz00"] {
            let err = submitter.send_raw_transaction(input).await.unwrap_err();
            assert!(matches!(err, Error::InvalidEncoding(_)), "{input}");
        }
        assert!(transport.calls().is_empty());
    }
}
