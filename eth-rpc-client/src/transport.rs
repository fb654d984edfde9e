use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use tracing::{debug, error};

use crate::decode::RpcValue;
use crate::error::{EthError, Result};
use crate::models::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends a JSON-RPC call and hands back the raw `result` value.
///
/// Implementations report a non-200 status or an `error` envelope as a
/// transport-level failure; the caller does not interpret it further.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: &str, params: Vec<RpcValue>) -> Result<RpcValue>;
}

/// JSON-RPC 2.0 over HTTP POST.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Create a transport for `url` with the given per-request timeout.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EthError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: &str, params: Vec<RpcValue>) -> Result<RpcValue> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = JsonRpcRequest::new(id, method, params);
        debug!(id, method, "sending JSON-RPC request");

        let response = self.http.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(id, method, %status, "node answered with HTTP error");
            return Err(EthError::HttpStatus(status));
        }

        let envelope: JsonRpcResponse = response.json().await?;
        if let Some(err) = envelope.error {
            debug!(id, method, code = err.code, "node returned JSON-RPC error");
            return Err(EthError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(envelope.result.unwrap_or(RpcValue::Null))
    }
}
