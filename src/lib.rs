//! HTTP gateway over an Ethereum JSON-RPC node.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
