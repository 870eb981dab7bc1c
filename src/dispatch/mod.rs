//! Method dispatch.
//!
//! Intake hands every validated envelope to a [`Dispatcher`], which owns the
//! success path: pick the business handler, decode its params, and build the
//! response envelope. [`MethodRegistry`] is the name-keyed implementation
//! the server ships with.

pub mod registry;

use futures_util::future::BoxFuture;

use crate::jsonrpc::{RpcRequest, RpcResponse};

pub use registry::MethodRegistry;

/// Turns a validated request into a response envelope.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, request: RpcRequest) -> BoxFuture<'_, RpcResponse>;
}
