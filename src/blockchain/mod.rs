//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration (RPC URL, failovers, timeout)
//!     → client.rs (RPC connection with timeouts, ChainReader seam)
//!     → units.rs (address validation, wei → ether)
//!     → wallet.rs (ephemeral key generation)
//!     → keystore.rs (encrypted key files on disk)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or passphrases
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when blockchain unreachable

pub mod client;
pub mod keystore;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::{BlockchainClient, ChainReader};
pub use keystore::{KeyStore, KeyStoreAccount};
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
pub use units::{format_ether, is_valid_address, parse_address};
pub use wallet::Wallet;
