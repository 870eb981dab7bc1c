//! JSON-RPC 2.0 envelope subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP body bytes
//!     → types.rs (RpcRequest envelope, raw params kept undecoded)
//!     → [http::intake validates method, body, version]
//!     → [dispatch picks handler by method name]
//!     → params.rs (decode params into the handler's argument type)
//!     → types.rs (RpcResponse with result or error)
//!     → error.rs (numeric error taxonomy for failures)
//! ```
//!
//! # Design Decisions
//! - `params` stays a raw JSON slice until a handler asks for a concrete type
//! - Response `id` is always serialized, `null` when unknown
//! - Error codes follow the JSON-RPC 2.0 reserved ranges

pub mod error;
pub mod params;
pub mod types;

pub use error::{ErrorCode, RpcError};
pub use params::read_params;
pub use types::{RpcRequest, RpcResponse, JSONRPC_VERSION};
