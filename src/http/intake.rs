//! Request intake: the gate between the HTTP listener and the dispatcher.
//!
//! Checks run in a fixed order and each one short-circuits:
//!
//! ```text
//! Received → MethodChecked → BodyDecoded → VersionChecked → Accepted
//!     └───────────┴──────────────┴──────────────┴──→ Rejected
//! ```
//!
//! A rejection carries everything the response stage needs (status, error,
//! best-known envelope), so nothing is stashed in request extensions.

use axum::http::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::jsonrpc::{ErrorCode, RpcError, RpcRequest, RpcResponse, JSONRPC_VERSION};

/// Why intake refused a call.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Any verb other than POST.
    #[error("api: POST method required, received {method}")]
    Transport { method: Method },

    /// Body is not a JSON object of the envelope's shape.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// `jsonrpc` absent or not "2.0".
    #[error("jsonrpc must be {}", JSONRPC_VERSION)]
    ProtocolVersion,
}

impl IntakeError {
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::Transport { .. } => StatusCode::METHOD_NOT_ALLOWED,
            IntakeError::Decode(_) | IntakeError::ProtocolVersion => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            IntakeError::Transport { .. } | IntakeError::Decode(_) => ErrorCode::ParseError,
            IntakeError::ProtocolVersion => ErrorCode::InvalidRequest,
        }
    }

    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            IntakeError::Transport { .. } => "transport",
            IntakeError::Decode(_) => "decode",
            IntakeError::ProtocolVersion => "version",
        }
    }
}

/// A refused call, ready to be written back to the client.
#[derive(Debug)]
pub struct Rejection {
    pub status: StatusCode,
    pub error: IntakeError,
    /// Envelope as far as it could be read; `None` when the body was never decoded.
    pub envelope: Option<RpcRequest>,
}

impl Rejection {
    fn new(error: IntakeError, envelope: Option<RpcRequest>) -> Self {
        Self {
            status: error.status(),
            error,
            envelope,
        }
    }

    /// Best-known request id, for correlation.
    pub fn id(&self) -> Option<Value> {
        self.envelope.as_ref().and_then(|envelope| envelope.id.clone())
    }

    /// JSON-RPC error object, with the envelope attached as `data` when known.
    pub fn rpc_error(&self) -> RpcError {
        let error = RpcError::new(self.error.code(), self.error.to_string());
        match &self.envelope {
            Some(envelope) => error.with_data(envelope.to_value()),
            None => error,
        }
    }

    pub fn response(&self) -> RpcResponse {
        RpcResponse::failure(self.id(), self.rpc_error())
    }
}

/// Validate one inbound call.
///
/// Returns the decoded envelope when the call may proceed to dispatch.
pub fn validate(method: &Method, body: &[u8]) -> Result<RpcRequest, Rejection> {
    if method != Method::POST {
        return Err(Rejection::new(
            IntakeError::Transport {
                method: method.clone(),
            },
            None,
        ));
    }

    let request: RpcRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            return Err(Rejection::new(
                IntakeError::Decode(e),
                Some(RpcRequest::salvage(body)),
            ));
        }
    };

    if !request.has_valid_version() {
        return Err(Rejection::new(IntakeError::ProtocolVersion, Some(request)));
    }

    Ok(request)
}
