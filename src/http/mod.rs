//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned, trace span opened)
//!     → handlers.rs (validate, call node / key generator / keystore)
//!     → response.rs (errors → status code + JSON body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::GatewayError;
pub use server::{build_router, AppState, HttpServer};
