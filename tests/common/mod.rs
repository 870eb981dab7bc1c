//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rpc_intake::{HttpServer, MethodRegistry, RpcError, ServerConfig, Shutdown};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct AddParams {
    pub a: i64,
    pub b: i64,
}

/// Registry with `add`, `echo` and a slow `sleep` method.
pub fn test_registry() -> MethodRegistry {
    let mut registry = MethodRegistry::new();
    registry
        .register("add", |p: AddParams| async move { Ok::<_, RpcError>(p.a + p.b) })
        .register("echo", |value: Value| async move { Ok::<_, RpcError>(value) })
        .register("sleep", |ms: u64| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok::<_, RpcError>(ms)
        });
    registry
}

/// Start a server on an ephemeral port. Returns its address and the
/// coordinator that stops it.
pub async fn start_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(test_registry()));
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Endpoint URL for the default RPC path.
#[allow(dead_code)]
pub fn rpc_url(addr: SocketAddr) -> String {
    format!("http://{}/rpc", addr)
}

/// Client that never reuses pooled connections across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
