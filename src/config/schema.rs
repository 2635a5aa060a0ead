//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Upstream node settings.
    pub blockchain: BlockchainConfig,

    /// Wallet generation policy.
    pub wallet: WalletConfig,

    /// Encrypted keystore settings.
    pub keystore: KeystoreConfig,

    /// Request hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Upstream node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// Node endpoint: http(s) or ws(s) URL, or an IPC socket path.
    pub rpc_url: String,

    /// Failover endpoints tried in order when the primary fails.
    pub failover_urls: Vec<String>,

    /// Expected chain ID, checked once at startup when set.
    pub chain_id: Option<u64>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            failover_urls: Vec::new(),
            chain_id: None,
            rpc_timeout_secs: 10,
        }
    }
}

/// Wallet generation policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Include the raw private key in `/wallet` responses.
    pub expose_private_key: bool,
}

/// Encrypted keystore configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeystoreConfig {
    /// Directory key files are written to.
    pub directory: String,

    /// Passphrase used by `GET /keystore-account`. Unset disables that route.
    pub default_passphrase: Option<String>,

    /// Minimum accepted passphrase length in characters.
    pub min_passphrase_len: usize,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            directory: "./newkey".to_string(),
            default_passphrase: None,
            min_passphrase_len: 8,
        }
    }
}

impl std::fmt::Debug for KeystoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoreConfig")
            .field("directory", &self.directory)
            .field(
                "default_passphrase",
                &self.default_passphrase.as_ref().map(|_| "<redacted>"),
            )
            .field("min_passphrase_len", &self.min_passphrase_len)
            .finish()
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Allow cross-origin requests from any origin.
    pub cors_enabled: bool,
    /// Enable security headers.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
            cors_enabled: true,
            enable_headers: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
