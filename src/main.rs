//! JSON-RPC 2.0 server.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 RPC INTAKE                    │
//!     HTTP request        │  ┌────────┐    ┌────────┐    ┌────────────┐  │
//!     ────────────────────┼─▶│ server │───▶│ intake │───▶│  dispatch  │  │
//!                         │  │ (axum) │    │        │    │ (registry) │  │
//!                         │  └────────┘    └───┬────┘    └─────┬──────┘  │
//!                         │                    │ rejected      │ params   │
//!                         │                    ▼               ▼          │
//!     HTTP response       │              ┌──────────┐    ┌──────────┐    │
//!     ◀───────────────────┼──────────────│ response │◀───│ handlers │    │
//!                         │              └──────────┘    └──────────┘    │
//!                         └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use rpc_intake::config::{load_config, ServerConfig};
use rpc_intake::observability::{logging, metrics};
use rpc_intake::{HttpServer, MethodRegistry, RpcError, Shutdown};

#[derive(Parser)]
#[command(name = "rpc-intake")]
#[command(about = "JSON-RPC 2.0 over HTTP", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AddParams {
    a: i64,
    b: i64,
}

fn demo_registry() -> MethodRegistry {
    let mut registry = MethodRegistry::new();
    registry
        .register("add", |p: AddParams| async move {
            p.a.checked_add(p.b)
                .ok_or_else(|| RpcError::invalid_params("integer overflow"))
        })
        .register("echo", |value: Value| async move { Ok::<_, RpcError>(value) });
    registry
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("rpc-intake v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.rpc.path,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let registry = demo_registry();
    tracing::info!(methods = ?registry.method_names(), "Methods registered");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config, Arc::new(registry));
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
