//! Token balance lookups.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::contractkit::registry::RegistryResolver;
use crate::contractkit::token::{Balance, CeloToken};
use crate::error::{Error, Result};
use crate::ledger::LedgerGateway;

sol! {
    /// ERC-20 balance read.
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Source of token balances.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Balance of one token.
    async fn balance_of(&self, token: CeloToken, owner: Address) -> Result<U256>;

    /// Balances of every core token. Stops at the first failing lookup.
    async fn balance(&self, owner: Address) -> Result<Balance> {
        let mut balance = Balance::default();
        for token in CeloToken::ALL {
            balance.set(token, self.balance_of(token, owner).await?);
        }
        Ok(balance)
    }
}

/// Reads balances from the token contracts resolved at construction.
#[derive(Debug, Clone)]
pub struct BalanceReader {
    gateway: LedgerGateway,
    celo: Address,
    cusd: Address,
    ceur: Address,
}

impl BalanceReader {
    /// Resolve every token contract through `resolver`.
    pub async fn resolve(gateway: LedgerGateway, resolver: &RegistryResolver) -> Result<Self> {
        let celo = resolver.resolve_token(CeloToken::Celo).await?;
        let cusd = resolver.resolve_token(CeloToken::CUsd).await?;
        let ceur = resolver.resolve_token(CeloToken::CEur).await?;
        Ok(Self { gateway, celo, cusd, ceur })
    }

    /// Use already known contract addresses.
    pub fn with_addresses(gateway: LedgerGateway, celo: Address, cusd: Address, ceur: Address) -> Self {
        Self { gateway, celo, cusd, ceur }
    }

    pub fn contract(&self, token: CeloToken) -> Address {
        match token {
            CeloToken::Celo => self.celo,
            CeloToken::CUsd => self.cusd,
            CeloToken::CEur => self.ceur,
        }
    }

    /// Calldata for `balanceOf(owner)`.
    pub fn balance_calldata(owner: Address) -> Bytes {
        IERC20::balanceOfCall { owner }.abi_encode().into()
    }
}

#[async_trait]
impl BalanceSource for BalanceReader {
    async fn balance_of(&self, token: CeloToken, owner: Address) -> Result<U256> {
        let output = self
            .gateway
            .call(self.contract(token), Self::balance_calldata(owner))
            .await?;
        IERC20::balanceOfCall::abi_decode_returns(&output)
            .map_err(|e| Error::InvalidEncoding(format!("{token} balanceOf response: {e}")))
    }
}
