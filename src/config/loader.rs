//! Configuration loading from disk and the environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Node endpoint variable.
pub const RPC_URL_ENV_VAR: &str = "GATEWAY_RPC_URL";
/// Endpoint variable read by earlier deployments of the service.
pub const LEGACY_RPC_URL_ENV_VAR: &str = "INFURA_ENDPOINT";
pub const BIND_ADDRESS_ENV_VAR: &str = "GATEWAY_BIND_ADDRESS";
pub const PORT_ENV_VAR: &str = "PORT";
pub const KEYSTORE_PASSPHRASE_ENV_VAR: &str = "GATEWAY_KEYSTORE_PASSPHRASE";
pub const EXPOSE_PRIVATE_KEY_ENV_VAR: &str = "GATEWAY_EXPOSE_PRIVATE_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for environment variable {key}")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: TOML file (when given), then environment overrides,
/// then the command-line bind address, then validation.
pub fn load_config(
    path: Option<&Path>,
    bind_override: Option<&str>,
) -> Result<GatewayConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_file(path)?,
        None => GatewayConfig::default(),
    };

    finalize(config, |key| std::env::var(key).ok(), bind_override)
}

/// Apply environment and command-line overrides, then validate the result.
pub fn finalize<F>(
    config: GatewayConfig,
    lookup: F,
    bind_override: Option<&str>,
) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = apply_env_overrides(config, lookup)?;
    if let Some(bind) = bind_override {
        config.listener.bind_address = bind.to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse a TOML file without validating it.
pub fn parse_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(RPC_URL_ENV_VAR).or_else(|| non_empty(LEGACY_RPC_URL_ENV_VAR)) {
        config.blockchain.rpc_url = url;
    }

    if let Some(addr) = non_empty(BIND_ADDRESS_ENV_VAR) {
        config.listener.bind_address = addr;
    }

    if let Some(port) = non_empty(PORT_ENV_VAR) {
        let port: u16 = port.trim().parse().map_err(|_| ConfigError::Env {
            key: PORT_ENV_VAR,
            value: port.clone(),
        })?;
        config.listener.bind_address = match config.listener.bind_address.parse::<SocketAddr>() {
            Ok(mut addr) => {
                addr.set_port(port);
                addr.to_string()
            }
            Err(_) => format!("0.0.0.0:{}", port),
        };
    }

    if let Some(passphrase) = non_empty(KEYSTORE_PASSPHRASE_ENV_VAR) {
        config.keystore.default_passphrase = Some(passphrase);
    }

    if let Some(flag) = non_empty(EXPOSE_PRIVATE_KEY_ENV_VAR) {
        config.wallet.expose_private_key = match flag.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(ConfigError::Env {
                    key: EXPOSE_PRIVATE_KEY_ENV_VAR,
                    value: flag,
                })
            }
        };
    }

    Ok(config)
}
