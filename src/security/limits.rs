//! Request size limits.
//!
//! Bodies over the configured size are refused with 413 Payload Too Large
//! by the extractor, before the JSON-RPC layer sees them.

use axum::extract::DefaultBodyLimit;

use crate::config::SecurityConfig;

pub fn body_limit(config: &SecurityConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(config.max_body_size)
}
