//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http::server produces:
//!     → logging.rs (structured log events, one span per request via TraceLayer)
//!     → metrics.rs (counters and histograms per JSON-RPC method)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID from the x-request-id header is attached to every intake log line
//! - Metrics macros are no-ops until a recorder is installed, so tests need no setup

pub mod logging;
pub mod metrics;
