//! Route handlers.
//!
//! Each handler validates its input, delegates to exactly one collaborator
//! and shapes the result as JSON. Failures become [`GatewayError`] responses.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::blockchain::{format_ether, parse_address, Wallet};
use crate::http::response::GatewayError;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub address: String,
}

#[derive(Deserialize)]
pub struct PassphraseRequest {
    pub passphrase: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNumberResponse {
    pub block_number: u64,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct KeystoreAccountResponse {
    pub address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsContractResponse {
    pub is_contract: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub node_reachable: bool,
}

/// `GET /`
pub async fn latest_block(
    State(state): State<AppState>,
) -> Result<Json<BlockNumberResponse>, GatewayError> {
    let block_number = state.node.block_number().await?;
    Ok(Json(BlockNumberResponse { block_number }))
}

/// `POST /balance`
pub async fn balance(
    State(state): State<AppState>,
    payload: Result<Json<AddressRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, GatewayError> {
    let Json(request) = payload?;
    let address = parse_address(&request.address)?;

    let wei = state.node.balance_at(address).await?;
    tracing::debug!(address = %address, wei = %wei, "Balance fetched");

    Ok(Json(BalanceResponse {
        balance: format_ether(wei),
    }))
}

/// `POST /is-contract`
pub async fn is_contract(
    State(state): State<AppState>,
    payload: Result<Json<AddressRequest>, JsonRejection>,
) -> Result<Json<IsContractResponse>, GatewayError> {
    let Json(request) = payload?;
    let address = parse_address(&request.address)?;

    let code = state.node.code_at(address).await?;
    Ok(Json(IsContractResponse {
        is_contract: !code.is_empty(),
    }))
}

/// `GET /wallet`
pub async fn create_wallet(
    State(state): State<AppState>,
) -> Result<Json<WalletResponse>, GatewayError> {
    let wallet = Wallet::generate()?;
    tracing::info!(address = %wallet.address(), "Wallet generated");

    let private_key = state
        .config
        .wallet
        .expose_private_key
        .then(|| wallet.private_key_hex());

    Ok(Json(WalletResponse {
        address: wallet.address().to_string(),
        private_key,
    }))
}

/// `GET /keystore-account`, using the operator-configured passphrase.
pub async fn create_keystore_account_default(
    State(state): State<AppState>,
) -> Result<Json<KeystoreAccountResponse>, GatewayError> {
    let passphrase = state
        .config
        .keystore
        .default_passphrase
        .clone()
        .ok_or(GatewayError::MissingPassphrase)?;
    create_keystore_account(&state, passphrase).await
}

/// `POST /keystore-account`
pub async fn create_keystore_account_with_passphrase(
    State(state): State<AppState>,
    payload: Result<Json<PassphraseRequest>, JsonRejection>,
) -> Result<Json<KeystoreAccountResponse>, GatewayError> {
    let Json(request) = payload?;
    create_keystore_account(&state, request.passphrase).await
}

async fn create_keystore_account(
    state: &AppState,
    passphrase: String,
) -> Result<Json<KeystoreAccountResponse>, GatewayError> {
    if passphrase.is_empty() {
        return Err(GatewayError::MissingPassphrase);
    }
    let min_len = state.config.keystore.min_passphrase_len;
    if passphrase.chars().count() < min_len {
        return Err(GatewayError::WeakPassphrase(min_len));
    }

    // scrypt is CPU-bound
    let keystore = state.keystore.clone();
    let account = tokio::task::spawn_blocking(move || keystore.create_account(&passphrase))
        .await
        .map_err(|e| GatewayError::Storage(format!("keystore task failed: {}", e)))??;

    Ok(Json(KeystoreAccountResponse {
        address: account.address.to_string(),
    }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let node_reachable = state.node.is_healthy().await;
    let (status_code, status) = if node_reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (
        status_code,
        Json(HealthResponse {
            status,
            node_reachable,
        }),
    )
}

/// Fallback for paths outside the route table.
pub async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

/// Fallback for known paths called with the wrong method.
pub async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{BlockchainError, BlockchainResult, ChainReader, KeyStore};
    use crate::config::GatewayConfig;
    use crate::http::server::build_router;
    use alloy::primitives::{Address, Bytes, U256};
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, Router};
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    const EOA: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

    struct FakeNode {
        down: AtomicBool,
    }

    #[async_trait]
    impl ChainReader for FakeNode {
        async fn block_number(&self) -> BlockchainResult<u64> {
            if self.down.load(Ordering::SeqCst) {
                return Err(BlockchainError::Rpc("connection refused".into()));
            }
            Ok(19_000_000)
        }

        async fn balance_at(&self, address: Address) -> BlockchainResult<U256> {
            if self.down.load(Ordering::SeqCst) {
                return Err(BlockchainError::Timeout(10));
            }
            if address == EOA.parse::<Address>().unwrap() {
                Ok(U256::from(2_500_000_000_000_000_000u128))
            } else {
                Ok(U256::ZERO)
            }
        }

        async fn code_at(&self, address: Address) -> BlockchainResult<Bytes> {
            if address == CONTRACT.parse::<Address>().unwrap() {
                Ok(Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]))
            } else {
                Ok(Bytes::new())
            }
        }
    }

    struct Harness {
        router: Router,
        node: Arc<FakeNode>,
        _keys: tempfile::TempDir,
    }

    fn harness(configure: impl FnOnce(&mut GatewayConfig)) -> Harness {
        let keys = tempfile::tempdir().unwrap();
        let mut config = GatewayConfig::default();
        config.blockchain.rpc_url = "http://fake-node".to_string();
        config.keystore.directory = keys.path().display().to_string();
        configure(&mut config);

        let node = Arc::new(FakeNode {
            down: AtomicBool::new(false),
        });
        let state = AppState {
            node: node.clone(),
            keystore: Arc::new(KeyStore::new(keys.path())),
            config: Arc::new(config),
        };
        Harness {
            router: build_router(state),
            node,
            _keys: keys,
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_latest_block() {
        let h = harness(|_| {});
        let (status, body) = send(&h.router, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blockNumber"], 19_000_000);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_recoverable() {
        let h = harness(|_| {});
        h.node.down.store(true, Ordering::SeqCst);

        let (status, body) = send(&h.router, get("/")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "upstream node unavailable");

        h.node.down.store(false, Ordering::SeqCst);
        let (status, _) = send(&h.router, get("/")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_balance() {
        let h = harness(|_| {});
        let body = format!(r#"{{"address":"{}"}}"#, EOA);
        let (status, body) = send(&h.router, post_json("/balance", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], "2.5");
    }

    #[tokio::test]
    async fn test_balance_without_prefix() {
        let h = harness(|_| {});
        let body = format!(r#"{{"address":"{}"}}"#, &EOA[2..]);
        let (status, body) = send(&h.router, post_json("/balance", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], "2.5");
    }

    #[tokio::test]
    async fn test_balance_invalid_address() {
        let h = harness(|_| {});
        let (status, body) =
            send(&h.router, post_json("/balance", r#"{"address":"0x1234"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid address");
    }

    #[tokio::test]
    async fn test_balance_malformed_json() {
        let h = harness(|_| {});
        let (status, body) = send(&h.router, post_json("/balance", r#"{"address":"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed request body");

        let (status, body) = send(&h.router, post_json("/balance", r#"{"addr":"0x00"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed request body");
    }

    #[tokio::test]
    async fn test_balance_missing_content_type() {
        let h = harness(|_| {});
        let request = Request::post("/balance")
            .body(Body::from(format!(r#"{{"address":"{}"}}"#, EOA)))
            .unwrap();
        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_balance_upstream_timeout() {
        let h = harness(|_| {});
        h.node.down.store(true, Ordering::SeqCst);
        let body = format!(r#"{{"address":"{}"}}"#, EOA);
        let (status, body) = send(&h.router, post_json("/balance", &body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "upstream node unavailable");
    }

    #[tokio::test]
    async fn test_is_contract() {
        let h = harness(|_| {});
        let body = format!(r#"{{"address":"{}"}}"#, CONTRACT);
        let (status, body) = send(&h.router, post_json("/is-contract", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isContract"], true);

        let body = format!(r#"{{"address":"{}"}}"#, EOA);
        let (_, body) = send(&h.router, post_json("/is-contract", &body)).await;
        assert_eq!(body["isContract"], false);
    }

    #[tokio::test]
    async fn test_is_contract_malformed_json() {
        let h = harness(|_| {});
        let (status, body) = send(&h.router, post_json("/is-contract", "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed request body");
    }

    #[tokio::test]
    async fn test_wallet_hides_private_key_by_default() {
        let h = harness(|_| {});
        let (status, body) = send(&h.router, get("/wallet")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(crate::blockchain::is_valid_address(body["address"].as_str().unwrap()));
        assert!(body.get("privateKey").is_none());
    }

    #[tokio::test]
    async fn test_wallet_exposes_private_key_when_enabled() {
        let h = harness(|c| c.wallet.expose_private_key = true);
        let (status, body) = send(&h.router, get("/wallet")).await;
        assert_eq!(status, StatusCode::OK);
        let key = body["privateKey"].as_str().unwrap();
        assert_eq!(key.len(), 66);

        let wallet = Wallet::from_bytes(key.parse().unwrap()).unwrap();
        assert_eq!(wallet.address().to_string(), body["address"]);
    }

    #[tokio::test]
    async fn test_wallets_are_distinct() {
        let h = harness(|_| {});
        let (_, first) = send(&h.router, get("/wallet")).await;
        let (_, second) = send(&h.router, get("/wallet")).await;
        assert_ne!(first["address"], second["address"]);
    }

    #[tokio::test]
    async fn test_keystore_account_with_passphrase() {
        let h = harness(|_| {});
        let (status, body) = send(
            &h.router,
            post_json("/keystore-account", r#"{"passphrase":"long enough passphrase"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(crate::blockchain::is_valid_address(body["address"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_keystore_account_rejects_short_passphrase() {
        let h = harness(|_| {});
        let (status, body) =
            send(&h.router, post_json("/keystore-account", r#"{"passphrase":"abc"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "passphrase too short");
    }

    #[tokio::test]
    async fn test_keystore_get_requires_configured_passphrase() {
        let h = harness(|_| {});
        let (status, body) = send(&h.router, get("/keystore-account")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "passphrase required");

        let h = harness(|c| c.keystore.default_passphrase = Some("operator-secret".into()));
        let (status, body) = send(&h.router, get("/keystore-account")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["address"].is_string());
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness(|_| {});
        let (status, body) = send(&h.router, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["nodeReachable"], true);

        h.node.down.store(true, Ordering::SeqCst);
        let (status, body) = send(&h.router, get("/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_request_id_assigned_and_propagated() {
        let h = harness(|_| {});
        let response = h.router.clone().oneshot(get("/")).await.unwrap();
        let id = response.headers().get("x-request-id").unwrap();
        assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());

        let request = Request::get("/")
            .header("x-request-id", "client-supplied")
            .body(Body::empty())
            .unwrap();
        let response = h.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "client-supplied");
    }

    #[tokio::test]
    async fn test_unrouted_requests_get_json_errors() {
        let h = harness(|_| {});

        let (status, body) = send(&h.router, get("/no-such-route")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found");

        let (status, body) = send(&h.router, get("/balance")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "method not allowed");

        let (status, body) = send(&h.router, post_json("/wallet", "{}")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "method not allowed");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let h = harness(|c| c.security.max_body_size = 32);
        let body = format!(r#"{{"address":"{}"}}"#, EOA);
        let (status, body) = send(&h.router, post_json("/balance", &body)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "request body too large");
    }
}
