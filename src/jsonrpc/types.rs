//! Request and response envelopes.

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::fmt;

use crate::jsonrpc::error::RpcError;

/// Protocol version every envelope must carry.
pub const JSONRPC_VERSION: &str = "2.0";

/// One JSON-RPC call as received.
///
/// Missing `jsonrpc` and `method` decode as empty strings so the version
/// check, not the decoder, reports a request that omits them. Only a JSON
/// object decodes; a repeated key keeps its last value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RpcRequest {
    #[serde(rename = "jsonrpc")]
    pub version: String,

    /// Correlation id, echoed back untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    pub method: String,

    /// Undecoded parameter payload (object, array, or absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Box<RawValue>>,
}

impl<'de> Deserialize<'de> for RpcRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RequestVisitor)
    }
}

struct RequestVisitor;

impl<'de> Visitor<'de> for RequestVisitor {
    type Value = RpcRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-RPC request object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<RpcRequest, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = RpcRequest::default();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "jsonrpc" => request.version = map.next_value()?,
                "id" => request.id = map.next_value()?,
                "method" => request.method = map.next_value()?,
                "params" => request.params = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(request)
    }
}

impl RpcRequest {
    /// Recover whatever envelope fields can be read from a body that failed
    /// to decode as a whole.
    ///
    /// Only fields of the right JSON type survive; anything else (including a
    /// body that is not JSON at all) yields the empty envelope.
    pub fn salvage(body: &[u8]) -> Self {
        let mut partial = Self::default();

        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
            return partial;
        };

        if let Some(Value::String(version)) = map.get("jsonrpc") {
            partial.version = version.clone();
        }
        if let Some(Value::String(method)) = map.get("method") {
            partial.method = method.clone();
        }
        partial.id = match map.get("id") {
            None | Some(Value::Null) => None,
            Some(id) => Some(id.clone()),
        };
        partial.params = match map.get("params") {
            None | Some(Value::Null) => None,
            Some(params) => serde_json::value::to_raw_value(params).ok(),
        };

        partial
    }

    /// Whether the envelope declares the supported protocol version.
    pub fn has_valid_version(&self) -> bool {
        self.version == JSONRPC_VERSION
    }

    /// Envelope as a JSON value, used as diagnostic `data` on errors.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Outcome of one call, sent back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(rename = "jsonrpc")]
    pub version: String,

    /// Always present on the wire; `null` when the request id is unknown.
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            version: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: RpcError) -> Self {
        Self {
            version: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
