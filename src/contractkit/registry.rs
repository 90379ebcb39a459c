//! Resolution of core contract addresses through the on-chain registry.

use alloy::primitives::{address, Address, Bytes};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::contractkit::token::CeloToken;
use crate::error::{Error, Result};
use crate::ledger::LedgerGateway;

/// Address the registry is deployed at on every Celo network.
pub const REGISTRY_ADDRESS: Address = address!("000000000000000000000000000000000000ce10");

sol! {
    /// Celo contract registry.
    interface IRegistry {
        function getAddressForString(string identifier) external view returns (address);
    }
}

/// Looks up contract addresses by registry identifier.
#[derive(Debug, Clone)]
pub struct RegistryResolver {
    gateway: LedgerGateway,
    registry: Address,
}

impl RegistryResolver {
    pub fn new(gateway: LedgerGateway, registry: Address) -> Self {
        Self { gateway, registry }
    }

    /// Calldata for a lookup of `identifier`.
    pub fn lookup_calldata(identifier: &str) -> Bytes {
        IRegistry::getAddressForStringCall { identifier: identifier.to_string() }
            .abi_encode()
            .into()
    }

    /// Address registered under `identifier`; `NotFound` if unregistered.
    pub async fn resolve(&self, identifier: &str) -> Result<Address> {
        let output = self.gateway.call(self.registry, Self::lookup_calldata(identifier)).await?;
        let resolved = IRegistry::getAddressForStringCall::abi_decode_returns(&output)
            .map_err(|e| Error::InvalidEncoding(format!("registry response for {identifier}: {e}")))?;

        if resolved == Address::ZERO {
            return Err(Error::NotFound(format!("{identifier} is not registered")));
        }
        tracing::debug!(identifier, address = %resolved, "Registry entry resolved");
        Ok(resolved)
    }

    /// Contract address of a core token.
    pub async fn resolve_token(&self, token: CeloToken) -> Result<Address> {
        self.resolve(token.registry_identifier()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::mock::MockTransport;
    use alloy::sol_types::SolValue;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_resolve_registered_contract() {
        let gold = Address::repeat_byte(0x47);
        let transport = Arc::new(MockTransport::new());
        transport.respond_to_call(
            REGISTRY_ADDRESS,
            RegistryResolver::lookup_calldata("GoldToken"),
            gold.abi_encode().into(),
        );

        let resolver = RegistryResolver::new(LedgerGateway::new(transport), REGISTRY_ADDRESS);
        assert_eq!(resolver.resolve_token(CeloToken::Celo).await.unwrap(), gold);
    }

    #[tokio::test]
    async fn test_unregistered_contract_is_not_found() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_to_call(
            REGISTRY_ADDRESS,
            RegistryResolver::lookup_calldata("StableTokenEUR"),
            Address::ZERO.abi_encode().into(),
        );

        let resolver = RegistryResolver::new(LedgerGateway::new(transport), REGISTRY_ADDRESS);
        let err = resolver.resolve("StableTokenEUR").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg.contains("StableTokenEUR")));
    }

    #[tokio::test]
    async fn test_garbage_response_is_invalid_encoding() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_to_call(
            REGISTRY_ADDRESS,
            RegistryResolver::lookup_calldata("GoldToken"),
            Bytes::from_static(&[1, 2, 3]),
        );

        let resolver = RegistryResolver::new(LedgerGateway::new(transport), REGISTRY_ADDRESS);
        assert!(matches!(resolver.resolve("GoldToken").await, Err(Error::InvalidEncoding(_))));
    }

    #[tokio::test]
    async fn test_call_failure_is_surfaced() {
        let transport = Arc::new(MockTransport::new());
        let resolver = RegistryResolver::new(LedgerGateway::new(transport), REGISTRY_ADDRESS);
        assert!(matches!(resolver.resolve("GoldToken").await, Err(Error::Transport(_))));
    }
}
