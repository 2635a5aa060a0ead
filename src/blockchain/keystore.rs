//! Encrypted keystore accounts.
//!
//! New accounts are written as Web3 Secret Storage (scrypt + AES-128-CTR)
//! JSON files named by UUID inside the configured directory. Encryption is
//! CPU-bound; async callers should run it on the blocking pool.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::fs;
use std::path::{Path, PathBuf};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// A newly persisted keystore account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStoreAccount {
    pub address: Address,
    pub path: PathBuf,
}

/// Keystore writer rooted at a directory.
#[derive(Debug, Clone)]
pub struct KeyStore {
    directory: PathBuf,
}

impl KeyStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Generate a key, encrypt it with `passphrase` and persist it.
    pub fn create_account(&self, passphrase: &str) -> BlockchainResult<KeyStoreAccount> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            BlockchainError::Keystore(format!(
                "Cannot create keystore directory {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let mut rng = rand::thread_rng();
        let (signer, file_name) =
            PrivateKeySigner::new_keystore(&self.directory, &mut rng, passphrase, None)
                .map_err(|e| BlockchainError::Keystore(format!("Failed to write key file: {}", e)))?;

        let account = KeyStoreAccount {
            address: signer.address(),
            path: self.directory.join(file_name),
        };

        tracing::info!(
            address = %account.address,
            path = %account.path.display(),
            "Keystore account created"
        );

        Ok(account)
    }

    /// Decrypt a key file and return the address it controls.
    pub fn unlock(&self, path: &Path, passphrase: &str) -> BlockchainResult<Address> {
        PrivateKeySigner::decrypt_keystore(path, passphrase)
            .map(|signer| signer.address())
            .map_err(|e| BlockchainError::Keystore(format!("Failed to decrypt key file: {}", e)))
    }
}
