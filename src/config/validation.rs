//! Configuration validation.
//!
//! Serde handles syntax; this checks values: addresses and URLs parse,
//! intervals and timeouts are non-zero, the price is a valid amount.
//! Every violation is reported, not just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::MinterConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &MinterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.wallet.private_key_env.trim().is_empty() {
        errors.push(ValidationError::new("wallet.private_key_env", "must not be empty"));
    }

    if let Err(e) = config.network.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "network.rpc_url",
            format!("invalid URL '{}': {}", config.network.rpc_url, e),
        ));
    }
    if config.network.required_chain_id == 0 {
        errors.push(ValidationError::new("network.required_chain_id", "must be non-zero"));
    }
    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be non-zero"));
    }

    match config.contract.parsed_address() {
        Ok(address) if address.is_zero() => {
            errors.push(ValidationError::new("contract.address", "must not be the zero address"));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new("contract.address", e)),
    }
    if config.contract.max_supply == 0 {
        errors.push(ValidationError::new("contract.max_supply", "must be non-zero"));
    }

    if config.poller.interval_ms == 0 {
        errors.push(ValidationError::new("poller.interval_ms", "must be non-zero"));
    }

    if let Err(e) = config.mint.price_wei() {
        errors.push(ValidationError::new("mint.price", e));
    }
    if config.mint.confirmation_blocks == 0 {
        errors.push(ValidationError::new("mint.confirmation_blocks", "must be at least 1"));
    }
    if config.mint.receipt_poll_ms == 0 {
        errors.push(ValidationError::new("mint.receipt_poll_ms", "must be non-zero"));
    }
    if config.mint.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "mint.confirmation_timeout_secs",
            "must be non-zero",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
