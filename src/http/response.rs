//! Error responses.
//!
//! # Responsibilities
//! - Map collaborator failures to HTTP status codes
//! - Render every failure as a JSON `{ "error": ... }` body
//!
//! # Design Decisions
//! - Response bodies carry a generic message; detail goes to the log
//! - Upstream failures never bring the process down

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tower::timeout::error::Elapsed;
use tower::BoxError;

use crate::blockchain::BlockchainError;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Failure of a single request.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("passphrase required")]
    MissingPassphrase,

    #[error("passphrase shorter than {0} characters")]
    WeakPassphrase(usize),

    #[error("upstream error: {0}")]
    Upstream(BlockchainError),

    #[error("crypto error: {0}")]
    Crypto(BlockchainError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("request exceeded the configured deadline")]
    RequestTimeout,

    #[error("no route for path")]
    NotFound,

    #[error("method not allowed on route")]
    MethodNotAllowed,

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAddress(_)
            | Self::MalformedBody(_)
            | Self::MissingPassphrase
            | Self::WeakPassphrase(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream(_) | Self::Crypto(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "invalid address",
            Self::MalformedBody(_) => "malformed request body",
            Self::PayloadTooLarge => "request body too large",
            Self::MissingPassphrase => "passphrase required",
            Self::WeakPassphrase(_) => "passphrase too short",
            Self::Upstream(_) => "upstream node unavailable",
            Self::Crypto(_) => "key generation failed",
            Self::Storage(_) => "keystore persistence failed",
            Self::RequestTimeout => "request timed out",
            Self::NotFound => "not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Internal(_) => "internal error",
        }
    }
}

impl From<BlockchainError> for GatewayError {
    fn from(err: BlockchainError) -> Self {
        match err {
            BlockchainError::InvalidAddress(candidate) => Self::InvalidAddress(candidate),
            BlockchainError::Wallet(_) => Self::Crypto(err),
            BlockchainError::Keystore(msg) => Self::Storage(msg),
            BlockchainError::Rpc(_)
            | BlockchainError::Timeout(_)
            | BlockchainError::ChainMismatch { .. } => Self::Upstream(err),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::MalformedBody(rejection.body_text())
        }
    }
}

/// Map an error raised by the tower middleware stack.
pub async fn handle_middleware_error(err: BoxError) -> GatewayError {
    if err.is::<Elapsed>() {
        GatewayError::RequestTimeout
    } else {
        GatewayError::Internal(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
