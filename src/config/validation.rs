//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! reported at once rather than stopping at the first.

use std::net::SocketAddr;

use crate::account::key::parse_address;
use crate::config::schema::ClientConfig;
use crate::ledger::MIN_GAS_LIMIT;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.rpc.url.parse::<url::Url>() {
        errors.push(ValidationError::new("rpc.url", format!("invalid URL '{}': {}", config.rpc.url, e)));
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.timeout_secs", "must be greater than 0"));
    }
    if config.transactions.min_gas_limit < MIN_GAS_LIMIT {
        errors.push(ValidationError::new(
            "transactions.min_gas_limit",
            format!("must be at least {MIN_GAS_LIMIT}"),
        ));
    }
    if config.transactions.poll_interval_ms == 0 {
        errors.push(ValidationError::new("transactions.poll_interval_ms", "must be greater than 0"));
    }
    if parse_address(&config.contracts.registry_address).is_err() {
        errors.push(ValidationError::new(
            "contracts.registry_address",
            format!("'{}' is not an address", config.contracts.registry_address),
        ));
    }
    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("'{addr}' is not a socket address"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_reported() {
        let mut config = ClientConfig::default();
        config.rpc.url = "::nonsense".into();
        config.rpc.timeout_secs = 0;
        config.transactions.min_gas_limit = 20_000;
        config.contracts.registry_address = "0xce10".into();
        config.observability.metrics_address = Some("localhost".into());

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "rpc.url",
                "rpc.timeout_secs",
                "transactions.min_gas_limit",
                "contracts.registry_address",
                "observability.metrics_address",
            ]
        );
    }
}
