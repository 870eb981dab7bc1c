//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the JSON-RPC handler
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Run intake, dispatch and response framing for each call
//! - Serve until the shutdown signal fires

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, Method, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::http::intake;
use crate::http::request::{self, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::write_response;
use crate::jsonrpc::ErrorCode;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::security::limits::body_limit;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn Dispatcher>,
}

/// HTTP server for the JSON-RPC endpoint.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, dispatcher: Arc<dyn Dispatcher>) -> Self {
        let state = AppState { dispatcher };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The route accepts every verb so a wrong one still gets a JSON-RPC
    /// error body instead of axum's plain 405.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let x_request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route(&config.rpc.path, any(rpc_handler))
            .with_state(state)
            .layer(body_limit(&config.security))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
    }

    /// The configured router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.rpc.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// JSON-RPC handler: intake, then dispatch, then framing.
async fn rpc_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request::request_id(&headers);

    let call = match intake::validate(&method, &body) {
        Ok(call) => call,
        Err(rejection) => {
            tracing::warn!(
                request_id = %request_id,
                http_method = %method,
                status = rejection.status.as_u16(),
                reason = rejection.error.reason(),
                error = %rejection.error,
                "Rejected JSON-RPC request"
            );
            metrics::record_rejection(rejection.error.reason());
            metrics::record_request("-", rejection.status.as_u16(), "rejected", start_time);
            return write_response(rejection.status, &rejection.response());
        }
    };

    let rpc_method = call.method.clone();
    tracing::debug!(
        request_id = %request_id,
        rpc_method = %rpc_method,
        "Dispatching JSON-RPC call"
    );

    let response = state.dispatcher.dispatch(call).await;

    let method_label = match &response.error {
        Some(error) if error.code == ErrorCode::MethodNotFound.code() => "unknown",
        _ => rpc_method.as_str(),
    };
    metrics::record_request(method_label, StatusCode::OK.as_u16(), "accepted", start_time);

    write_response(StatusCode::OK, &response)
}
