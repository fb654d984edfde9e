use serde::{Deserialize, Serialize};

use crate::decode::RpcValue;

/// JSON-RPC protocol version sent and expected on every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Error code for a method the node does not implement.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Error code for malformed method parameters.
pub const INVALID_PARAMS: i64 = -32602;

/// JSON-RPC 2.0 request structure
///
/// This structure represents a standard JSON-RPC request with generic parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest<T> {
    /// JSON-RPC protocol version (should be "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Method parameters
    pub params: T,

    /// Request identifier
    pub id: RpcValue,
}

impl<T> JsonRpcRequest<T> {
    pub fn new(id: u64, method: &str, params: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id: RpcValue::from(id),
        }
    }
}

/// JSON-RPC 2.0 response
///
/// Exactly one of `result` and `error` is present on a well-formed response.
/// A `null` result is a legitimate value (unknown block, pending receipt).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matching the request)
    pub id: RpcValue,

    /// Method result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RpcValue>,

    /// Error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorDetail>,
}

/// JSON-RPC 2.0 error detail
///
/// This structure contains the detailed error information in a JSON-RPC error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorDetail {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RpcValue>,
}

impl JsonRpcResponse {
    /// Create a new JSON-RPC success response
    pub fn success(id: RpcValue, result: RpcValue) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create a new JSON-RPC error response
    pub fn error(id: RpcValue, code: i64, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcErrorDetail {
                code,
                message,
                data: None,
            }),
        }
    }
}
