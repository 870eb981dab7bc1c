//! Name-keyed method registry.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::jsonrpc::{RpcError, RpcRequest, RpcResponse};

type Handler = Arc<dyn Fn(RpcRequest) -> BoxFuture<'static, Result<Value, RpcError>> + Send + Sync>;

/// Maps JSON-RPC method names to typed async handlers.
///
/// Built once at startup and shared read-only across requests.
#[derive(Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Handler>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any earlier registration.
    ///
    /// Params are decoded into `P` (object or one-element array form);
    /// a decode failure answers `InvalidParams` without calling the handler.
    pub fn register<P, R, F, Fut>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        P: DeserializeOwned + Default + Send + 'static,
        R: Serialize + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, RpcError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let wrapped: Handler = Arc::new(
            move |request: RpcRequest| -> BoxFuture<'static, Result<Value, RpcError>> {
                Box::pin(call::<P, R, F, Fut>(handler.clone(), request))
            },
        );

        self.methods.insert(name.into(), wrapped);
        self
    }

    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Registered method names, sorted.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

async fn call<P, R, F, Fut>(handler: Arc<F>, request: RpcRequest) -> Result<Value, RpcError>
where
    P: DeserializeOwned + Default,
    R: Serialize,
    F: Fn(P) -> Fut,
    Fut: Future<Output = Result<R, RpcError>>,
{
    let params: P = request
        .params_as()
        .map_err(|e| RpcError::invalid_params(e.to_string()))?;
    let result = handler(params).await?;
    serde_json::to_value(result).map_err(|e| RpcError::internal(e.to_string()))
}

impl Dispatcher for MethodRegistry {
    fn dispatch(&self, request: RpcRequest) -> BoxFuture<'_, RpcResponse> {
        Box::pin(async move {
            let id = request.id.clone();

            let Some(handler) = self.methods.get(&request.method).cloned() else {
                tracing::warn!(method = %request.method, "Unknown JSON-RPC method");
                return RpcResponse::failure(id, RpcError::method_not_found(&request.method));
            };

            match handler(request).await {
                Ok(result) => RpcResponse::success(id, result),
                Err(error) => RpcResponse::failure(id, error),
            }
        })
    }
}
