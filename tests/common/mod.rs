//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use alloy::sol_types::SolValue;
use celo_client_lite::contractkit::{BalanceReader, CeloToken, RegistryResolver, REGISTRY_ADDRESS};
use celo_client_lite::ledger::mock::MockTransport;
use celo_client_lite::ledger::{LedgerGateway, Receipt, ReceiptStatus};
use celo_client_lite::{CeloClient, ClientConfig};

/// Private key with a published public key and address.
pub const PRIVATE_KEY: &str = "c3af5ee3619783355c1504814e12230bdfc7b5e336f18fef336615e54881f4db";

/// Address of [`PRIVATE_KEY`].
pub const ADDRESS: &str = "5dB994389C7495996A313F830f21015B9F8127B0";

/// Contract address the mock registry returns for `token`.
pub fn token_contract(token: CeloToken) -> Address {
    match token {
        CeloToken::Celo => Address::repeat_byte(0xc1),
        CeloToken::CUsd => Address::repeat_byte(0xc2),
        CeloToken::CEur => Address::repeat_byte(0xc3),
    }
}

/// A mock node with the registry populated.
pub fn node() -> Arc<MockTransport> {
    let transport = Arc::new(MockTransport::new());
    for token in CeloToken::ALL {
        transport.respond_to_call(
            REGISTRY_ADDRESS,
            RegistryResolver::lookup_calldata(token.registry_identifier()),
            token_contract(token).abi_encode().into(),
        );
    }
    transport
}

/// Make the mock node report `amount` of `token` for `owner`.
pub fn set_token_balance(transport: &MockTransport, token: CeloToken, owner: Address, amount: U256) {
    transport.respond_to_call(
        token_contract(token),
        BalanceReader::balance_calldata(owner),
        amount.abi_encode().into(),
    );
}

/// Build a client over `transport`, resolving contracts like `connect` does.
pub async fn client(transport: Arc<MockTransport>, config: &ClientConfig) -> CeloClient {
    let gateway = LedgerGateway::new(transport);
    let resolver = RegistryResolver::new(gateway.clone(), REGISTRY_ADDRESS);
    let balances = BalanceReader::resolve(gateway.clone(), &resolver)
        .await
        .expect("registry resolution");
    CeloClient::from_parts(gateway, Arc::new(balances), config)
}

/// A receipt for `hash` with the given outcome.
pub fn receipt(hash: TxHash, status: ReceiptStatus) -> Receipt {
    Receipt {
        transaction_hash: hash,
        block_number: Some(1_000),
        gas_used: 21_000,
        status,
    }
}
