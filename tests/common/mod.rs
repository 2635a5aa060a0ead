//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use alloy::primitives::{Address, Bytes, U256};
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use eth_gateway::blockchain::BlockchainClient;
use eth_gateway::config::GatewayConfig;
use eth_gateway::http::HttpServer;
use eth_gateway::lifecycle::Shutdown;

pub const ANVIL_CHAIN_ID: u64 = 31337;

/// Programmable in-process JSON-RPC node.
#[derive(Default)]
pub struct MockNode {
    pub block_number: AtomicU64,
    pub balances: Mutex<HashMap<Address, U256>>,
    pub code: Mutex<HashMap<Address, Bytes>>,
    /// Answer every call with a JSON-RPC error.
    pub failing: AtomicBool,
    /// Delay before answering, in milliseconds.
    pub delay_ms: AtomicU64,
    pub calls: AtomicUsize,
}

impl MockNode {
    pub fn new(block_number: u64) -> Arc<Self> {
        let node = Self::default();
        node.block_number.store(block_number, Ordering::SeqCst);
        Arc::new(node)
    }

    pub fn set_balance(&self, address: Address, wei: U256) {
        self.balances.lock().unwrap().insert(address, wei);
    }

    pub fn set_code(&self, address: Address, code: Bytes) {
        self.code.lock().unwrap().insert(address, code);
    }

    fn answer(&self, request: &Value) -> Value {
        let id = request.get("id").cloned().unwrap_or(Value::Null);
        if self.failing.load(Ordering::SeqCst) {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32000, "message": "header not found" }
            });
        }

        let method = request["method"].as_str().unwrap_or_default();
        let first_address = || {
            request["params"][0]
                .as_str()
                .and_then(|s| s.parse::<Address>().ok())
                .unwrap_or_default()
        };

        let result = match method {
            "eth_chainId" => json!(format!("{:#x}", ANVIL_CHAIN_ID)),
            "eth_blockNumber" => json!(format!("{:#x}", self.block_number.load(Ordering::SeqCst))),
            "eth_getBalance" => {
                let wei = self
                    .balances
                    .lock()
                    .unwrap()
                    .get(&first_address())
                    .copied()
                    .unwrap_or(U256::ZERO);
                json!(format!("{:#x}", wei))
            }
            "eth_getCode" => {
                let code = self
                    .code
                    .lock()
                    .unwrap()
                    .get(&first_address())
                    .cloned()
                    .unwrap_or_default();
                json!(alloy::hex::encode_prefixed(code))
            }
            _ => {
                return json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": { "code": -32601, "message": "method not found" }
                })
            }
        };

        json!({ "jsonrpc": "2.0", "id": id, "result": result })
    }
}

async fn rpc_handler(State(node): State<Arc<MockNode>>, Json(body): Json<Value>) -> Json<Value> {
    node.calls.fetch_add(1, Ordering::SeqCst);

    let delay = node.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    match body {
        Value::Array(batch) => Json(Value::Array(batch.iter().map(|r| node.answer(r)).collect())),
        single => Json(node.answer(&single)),
    }
}

/// Serve `node` on an ephemeral local port and return its URL.
pub async fn start_mock_node(node: Arc<MockNode>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/", post(rpc_handler)).with_state(node);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}", addr)
}

/// Gateway config pointing at `rpc_url`, writing keys under `keys_dir`.
pub fn gateway_config(rpc_url: &str, keys_dir: &Path) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.blockchain.rpc_url = rpc_url.to_string();
    config.blockchain.rpc_timeout_secs = 2;
    config.keystore.directory = keys_dir.display().to_string();
    config
}

/// Start the real gateway over TCP.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let client = BlockchainClient::connect(config.blockchain.clone())
        .await
        .expect("client");
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(client));
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
