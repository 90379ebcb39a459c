//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::contractkit::REGISTRY_ADDRESS;
use crate::ledger::MIN_GAS_LIMIT;

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Node connection settings.
    pub rpc: RpcConfig,

    /// Submission and confirmation settings.
    pub transactions: TransactionConfig,

    /// Core contract locations.
    pub contracts: ContractsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8545".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Transaction submission and confirmation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Gas limit attached to native transfers.
    pub min_gas_limit: u64,

    /// Pause between receipt lookups in milliseconds.
    pub poll_interval_ms: u64,

    /// Default confirmation deadline in seconds.
    pub wait_timeout_secs: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            min_gas_limit: MIN_GAS_LIMIT,
            poll_interval_ms: 500,
            wait_timeout_secs: 60,
        }
    }
}

/// Core contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Address of the contract registry.
    pub registry_address: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            registry_address: REGISTRY_ADDRESS.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (trace, debug, info, warn, error, or a full directive).
    pub log_level: String,

    /// Prometheus exporter bind address; disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
