//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (reject oversized bodies before buffering completes)
//!     → [intake + dispatch]
//! Outgoing response:
//!     → headers.rs (hardening headers on every JSON-RPC response)
//! ```

pub mod headers;
pub mod limits;
