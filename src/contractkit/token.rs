//! Core Celo tokens and multi-token balances.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// Tokens whose contracts are resolved from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CeloToken {
    /// Native token, previously known as cGLD.
    Celo,
    /// Celo Dollar.
    CUsd,
    /// Celo Euro.
    CEur,
}

impl CeloToken {
    pub const ALL: [CeloToken; 3] = [CeloToken::Celo, CeloToken::CUsd, CeloToken::CEur];

    /// Ticker symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            CeloToken::Celo => "CELO",
            CeloToken::CUsd => "cUSD",
            CeloToken::CEur => "cEUR",
        }
    }

    /// Name the contract is registered under.
    pub fn registry_identifier(&self) -> &'static str {
        match self {
            CeloToken::Celo => "GoldToken",
            CeloToken::CUsd => "StableToken",
            CeloToken::CEur => "StableTokenEUR",
        }
    }
}

impl std::fmt::Display for CeloToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Balances of every core token for one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "CELO")]
    pub celo: U256,
    #[serde(rename = "cUSD")]
    pub cusd: U256,
    #[serde(rename = "cEUR")]
    pub ceur: U256,
}

impl Balance {
    pub fn get(&self, token: CeloToken) -> U256 {
        match token {
            CeloToken::Celo => self.celo,
            CeloToken::CUsd => self.cusd,
            CeloToken::CEur => self.ceur,
        }
    }

    pub fn set(&mut self, token: CeloToken, amount: U256) {
        match token {
            CeloToken::Celo => self.celo = amount,
            CeloToken::CUsd => self.cusd = amount,
            CeloToken::CEur => self.ceur = amount,
        }
    }
}
