//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, limits, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::blockchain::{ChainReader, KeyStore};
use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::handle_middleware_error;
use crate::observability::{metrics, tracing::make_request_span};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<dyn ChainReader>,
    pub keystore: Arc<KeyStore>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(config: GatewayConfig, node: Arc<dyn ChainReader>) -> Self {
        let keystore = Arc::new(KeyStore::new(&config.keystore.directory));
        Self {
            node,
            keystore,
            config: Arc::new(config),
        }
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .route("/", get(handlers::latest_block))
        .route("/balance", post(handlers::balance))
        .route("/is-contract", post(handlers::is_contract))
        .route("/wallet", get(handlers::create_wallet))
        .route(
            "/keystore-account",
            get(handlers::create_keystore_account_default)
                .post(handlers::create_keystore_account_with_passphrase),
        )
        .route("/health", get(handlers::health))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.security.max_body_size));

    if config.security.enable_headers {
        router = router
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            ));
    }

    if config.security.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(
        ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(propagate_request_id_layer())
            // Deadline errors become JSON responses
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
    )
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server backed by `node`.
    pub fn new(config: GatewayConfig, node: Arc<dyn ChainReader>) -> Self {
        let state = AppState::new(config, node);
        let config = state.config.clone();
        let router = build_router(state);
        Self { router, config }
    }

    /// Run the server until a shutdown signal arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            keystore_dir = %self.config.keystore.directory,
            expose_private_key = self.config.wallet.expose_private_key,
            "HTTP server starting"
        );

        // Serve with graceful shutdown
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
