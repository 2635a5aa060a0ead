//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (dotenv)
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides, then --bind)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BlockchainConfig, GatewayConfig, KeystoreConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, SecurityConfig, TimeoutConfig, WalletConfig,
};
pub use validation::ValidationError;
