//! Celo legacy transactions: signing hash, EIP-155 signatures and RLP encoding.
//!
//! # Wire layout
//! ```text
//! unsigned (signing preimage):
//!   [nonce, gasPrice, gas, feeCurrency, gatewayFeeRecipient, gatewayFee,
//!    to, value, data, chainId, 0, 0]
//! signed:
//!   [nonce, gasPrice, gas, feeCurrency, gatewayFeeRecipient, gatewayFee,
//!    to, value, data, v, r, s]
//! ```
//! Absent addresses encode as the empty string. `v = parity + 35 + 2 * chainId`.

use alloy::primitives::{keccak256, Address, Bytes, Signature, TxHash, B256, U256};
use alloy::rlp::{BufMut, Encodable, Header, EMPTY_STRING_CODE};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::error::{Error, Result};

/// Minimum gas for a plain value transfer.
pub const MIN_GAS_LIMIT: u64 = 21_000;

/// An unsigned Celo legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CeloTransaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// Currency gas is paid in; `None` pays in the native token.
    pub fee_currency: Option<Address>,
    pub gateway_fee_recipient: Option<Address>,
    pub gateway_fee: U256,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub chain_id: u64,
}

impl CeloTransaction {
    /// A native-currency transfer with no calldata.
    pub fn transfer(nonce: u64, to: Address, value: U256, gas_limit: u64, gas_price: u128, chain_id: u64) -> Self {
        Self {
            nonce,
            gas_price,
            gas_limit,
            fee_currency: None,
            gateway_fee_recipient: None,
            gateway_fee: U256::ZERO,
            to,
            value,
            data: Bytes::new(),
            chain_id,
        }
    }

    /// Attach a gateway fee. A missing amount is encoded as zero.
    pub fn with_gateway_fee(mut self, recipient: Option<Address>, fee: Option<U256>) -> Self {
        self.gateway_fee_recipient = recipient;
        self.gateway_fee = fee.unwrap_or_default();
        self
    }

    /// RLP preimage of the EIP-155 signing hash.
    pub fn signing_payload(&self) -> Vec<u8> {
        let payload_length = self.fields_length() + self.chain_id.length() + 2 * 0u8.length();
        let mut out = Vec::with_capacity(payload_length + 3);
        Header { list: true, payload_length }.encode(&mut out);
        self.encode_fields(&mut out);
        self.chain_id.encode(&mut out);
        0u8.encode(&mut out);
        0u8.encode(&mut out);
        out
    }

    /// Hash that gets signed.
    pub fn signature_hash(&self) -> B256 {
        keccak256(self.signing_payload())
    }

    /// Sign with the EIP-155 scheme bound to `self.chain_id`.
    pub fn sign(self, signer: &PrivateKeySigner) -> Result<SignedTransaction> {
        let signature = signer
            .sign_hash_sync(&self.signature_hash())
            .map_err(|e| Error::Signing(e.to_string()))?;
        let v = self
            .chain_id
            .checked_mul(2)
            .and_then(|id| id.checked_add(35 + u64::from(signature.v())))
            .ok_or_else(|| Error::Signing(format!("chain id {} too large for EIP-155", self.chain_id)))?;

        let mut signed = SignedTransaction { tx: self, signature, v, hash: B256::ZERO };
        signed.hash = keccak256(signed.encoded());
        Ok(signed)
    }

    fn fields_length(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + optional_address_length(&self.fee_currency)
            + optional_address_length(&self.gateway_fee_recipient)
            + self.gateway_fee.length()
            + self.to.length()
            + self.value.length()
            + self.data.length()
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        encode_optional_address(&self.fee_currency, out);
        encode_optional_address(&self.gateway_fee_recipient, out);
        self.gateway_fee.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.data.encode(out);
    }
}

/// A signed transaction, immutable and identified by its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    tx: CeloTransaction,
    signature: Signature,
    v: u64,
    hash: TxHash,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &CeloTransaction {
        &self.tx
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// EIP-155 `v` value.
    pub fn v(&self) -> u64 {
        self.v
    }

    /// `keccak256` of the signed encoding.
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// RLP bytes ready for `eth_sendRawTransaction`.
    pub fn encoded(&self) -> Vec<u8> {
        let r = self.signature.r();
        let s = self.signature.s();
        let payload_length = self.tx.fields_length() + self.v.length() + r.length() + s.length();
        let mut out = Vec::with_capacity(payload_length + 3);
        Header { list: true, payload_length }.encode(&mut out);
        self.tx.encode_fields(&mut out);
        self.v.encode(&mut out);
        r.encode(&mut out);
        s.encode(&mut out);
        out
    }
}

fn optional_address_length(address: &Option<Address>) -> usize {
    address.as_ref().map_or(1, Encodable::length)
}

fn encode_optional_address(address: &Option<Address>, out: &mut dyn BufMut) {
    match address {
        Some(address) => address.encode(out),
        None => out.put_u8(EMPTY_STRING_CODE),
    }
}
