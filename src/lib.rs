//! JSON-RPC 2.0 over HTTP: request intake, parameter extraction, and
//! response framing, with a method registry and an Axum server around them.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod jsonrpc;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ServerConfig;
pub use dispatch::{Dispatcher, MethodRegistry};
pub use http::HttpServer;
pub use jsonrpc::{read_params, RpcError, RpcRequest, RpcResponse};
pub use lifecycle::Shutdown;
