//! Ephemeral wallet generation.
//!
//! # Security
//! - Keys are drawn from the thread-local CSPRNG
//! - Keys are never logged; `Debug` redacts them
//! - Nothing is persisted; the wallet lives for one request

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use rand::RngCore;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// A freshly generated secp256k1 key pair.
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Generate a new random wallet.
    pub fn generate() -> BlockchainResult<Self> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_bytes(B256::from(bytes))
    }

    /// Build a wallet from a raw private scalar.
    ///
    /// Fails for zero or for scalars outside the curve order.
    pub fn from_bytes(private_key: B256) -> BlockchainResult<Self> {
        let signer = PrivateKeySigner::from_bytes(&private_key)
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key: {}", e)))?;
        Ok(Self { signer })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Hex-encoded private key with `0x` prefix.
    pub fn private_key_hex(&self) -> String {
        alloy::hex::encode_prefixed(self.signer.to_bytes())
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("private_key", &"<redacted>")
            .finish()
    }
}
