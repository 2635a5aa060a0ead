//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Refuse to start without a node endpoint
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single violated configuration rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("blockchain.rpc_url is not set (use GATEWAY_RPC_URL or INFURA_ENDPOINT)")]
    MissingRpcUrl,

    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("keystore.directory must not be empty")]
    EmptyKeystoreDirectory,

    #[error("keystore.default_passphrase is shorter than {0} characters")]
    WeakDefaultPassphrase(usize),
}

/// Check every semantic rule and collect all violations.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.blockchain.rpc_url.trim().is_empty() {
        errors.push(ValidationError::MissingRpcUrl);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero("blockchain.rpc_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }
    if config.keystore.min_passphrase_len == 0 {
        errors.push(ValidationError::Zero("keystore.min_passphrase_len"));
    }

    if config.keystore.directory.trim().is_empty() {
        errors.push(ValidationError::EmptyKeystoreDirectory);
    }

    if let Some(passphrase) = &config.keystore.default_passphrase {
        if passphrase.chars().count() < config.keystore.min_passphrase_len {
            errors.push(ValidationError::WeakDefaultPassphrase(
                config.keystore.min_passphrase_len,
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
