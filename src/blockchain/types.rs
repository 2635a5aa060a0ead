//! Chain-specific types and error definitions.

use thiserror::Error;

// Re-export BlockchainConfig from config module to avoid duplication
pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Candidate string is not a 40-hex-digit address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Key generation or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Keystore encryption or persistence error.
    #[error("Keystore error: {0}")]
    Keystore(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl BlockchainError {
    /// True for failures caused by the remote node rather than local input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Rpc(_) | Self::Timeout(_) | Self::ChainMismatch { .. }
        )
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
