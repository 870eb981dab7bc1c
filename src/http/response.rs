//! Response framing.
//!
//! Every JSON-RPC response, success or failure, leaves through
//! [`write_response`] so headers stay uniform.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;

use crate::security::headers::apply_security_headers;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Sent when the real response cannot be encoded.
const ENCODE_FAILURE_BODY: &[u8] =
    br#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#;

/// Encode `response` and frame it as an HTTP response with `status`.
///
/// An encode failure is logged and answered with a fixed internal-error
/// envelope and status 500 instead of an empty body.
pub fn write_response<R>(status: StatusCode, response: &R) -> Response
where
    R: Serialize + ?Sized,
{
    match serde_json::to_vec(response) {
        Ok(body) => frame(status, body),
        Err(e) => {
            tracing::error!(error = %e, status = status.as_u16(), "Failed to encode JSON-RPC response");
            frame(StatusCode::INTERNAL_SERVER_ERROR, ENCODE_FAILURE_BODY.to_vec())
        }
    }
}

fn frame(status: StatusCode, body: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    apply_security_headers(headers);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonrpc::{ErrorCode, RpcError, RpcResponse};
    use serde::Serializer;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_framing() {
        let resp = RpcResponse::failure(Some(json!(4)), RpcError::from(ErrorCode::InvalidRequest));
        let response = write_response(StatusCode::BAD_REQUEST, &resp);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], JSON_CONTENT_TYPE);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");

        let body = body_json(response).await;
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], 4);
        assert_eq!(body["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_success_body() {
        let resp = RpcResponse::success(Some(json!("req-1")), json!([1, 2, 3]));
        let response = write_response(StatusCode::OK, &resp);

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["result"], json!([1, 2, 3]));
        assert_eq!(body["id"], "req-1");
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot encode"))
        }
    }

    #[tokio::test]
    async fn test_encode_failure_falls_back() {
        let response = write_response(StatusCode::OK, &Unencodable);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["content-type"], JSON_CONTENT_TYPE);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");

        let body = body_json(response).await;
        assert_eq!(body["id"], Value::Null);
        assert_eq!(body["error"]["code"], -32603);
    }
}
