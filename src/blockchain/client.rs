//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint (plus failovers)
//! - Query chain state (block number, balances, deployed code)
//! - Handle timeouts and network errors gracefully
//! - Provide health check for blockchain connectivity

use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::TransportResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
use crate::observability::metrics;

type DynProvider = Arc<dyn Provider + Send + Sync>;

/// Read-only view of the upstream node used by the HTTP handlers.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Latest block height.
    async fn block_number(&self) -> BlockchainResult<u64>;

    /// Balance of `address` in wei at the latest block.
    async fn balance_at(&self, address: Address) -> BlockchainResult<U256>;

    /// Bytecode deployed at `address`; empty for externally owned accounts.
    async fn code_at(&self, address: Address) -> BlockchainResult<Bytes>;

    /// Check if the node is reachable.
    async fn is_healthy(&self) -> bool {
        self.block_number().await.is_ok()
    }
}

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Connect to the configured endpoints.
    ///
    /// HTTP endpoints are not dialed until the first call; WebSocket and IPC
    /// endpoints are, so an unreachable primary of those kinds fails here.
    pub async fn connect(config: BlockchainConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        // 1. Add primary provider
        providers.push(dial(&config.rpc_url).await?);

        // 2. Add failover providers
        for endpoint in &config.failover_urls {
            match dial(endpoint).await {
                Ok(provider) => providers.push(provider),
                Err(e) => {
                    tracing::warn!(url = %endpoint, error = %e, "Ignoring unusable failover RPC endpoint")
                }
            }
        }

        let client = Self {
            providers,
            config,
            timeout_duration,
        };

        // Verify chain ID matches configuration
        if let Some(expected) = client.config.chain_id {
            match client.verify_chain_id(expected).await {
                Ok(()) => {
                    tracing::info!(chain_id = expected, "Chain ID verified");
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Blockchain client initialized but chain verification failed"
                    );
                    // Don't fail initialization - allow graceful degradation
                }
            }
        }

        tracing::info!(
            providers = client.providers.len(),
            timeout_secs = client.config.rpc_timeout_secs,
            "Blockchain client initialized"
        );

        Ok(client)
    }

    /// Verify the connected chain ID matches `expected`.
    pub async fn verify_chain_id(&self, expected: u64) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != expected {
            return Err(BlockchainError::ChainMismatch {
                expected,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("get_chain_id", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Run `call` against each provider in order until one answers in time.
    async fn with_failover<T, F, Fut>(&self, operation: &'static str, call: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        let mut timed_out = 0;
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, call(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, operation, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    timed_out += 1;
                    tracing::warn!(provider_idx = i, operation, "RPC timeout, trying next provider");
                }
            }
        }

        metrics::record_upstream_error(operation);
        if timed_out == self.providers.len() {
            Err(BlockchainError::Timeout(self.config.rpc_timeout_secs))
        } else {
            Err(BlockchainError::Rpc(format!("All providers failed to {}", operation.replace('_', " "))))
        }
    }
}

#[async_trait]
impl ChainReader for BlockchainClient {
    async fn block_number(&self) -> BlockchainResult<u64> {
        self.with_failover("get_block_number", |p| async move { p.get_block_number().await })
            .await
    }

    async fn balance_at(&self, address: Address) -> BlockchainResult<U256> {
        self.with_failover("get_balance", |p| async move { p.get_balance(address).await })
            .await
    }

    async fn code_at(&self, address: Address) -> BlockchainResult<Bytes> {
        self.with_failover("get_code", |p| async move { p.get_code_at(address).await })
            .await
    }

    async fn is_healthy(&self) -> bool {
        let healthy = self.block_number().await.is_ok();
        // Record health metric
        metrics::record_node_health(healthy);
        healthy
    }
}

/// Build a provider for an http(s)/ws(s) URL or an IPC path.
async fn dial(endpoint: &str) -> BlockchainResult<DynProvider> {
    let endpoint = endpoint.trim();
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        let url: url::Url = endpoint.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", endpoint, e))
        })?;
        return Ok(Arc::new(ProviderBuilder::new().connect_http(url)) as DynProvider);
    }

    let provider = ProviderBuilder::new()
        .connect(endpoint)
        .await
        .map_err(|e| BlockchainError::Rpc(format!("Unable to connect to '{}': {}", endpoint, e)))?;
    Ok(Arc::new(provider) as DynProvider)
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("providers", &self.providers.len())
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
