//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (subscriber setup, structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!     → tracing.rs (per-request spans with correlation IDs)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are cheap and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
pub mod tracing;
