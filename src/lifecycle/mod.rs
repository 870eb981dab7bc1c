//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Ctrl+C (or Shutdown::trigger from tests)
//!     → broadcast to subscribers
//!     → HttpServer stops accepting, drains in-flight calls, returns
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
