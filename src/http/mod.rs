//! HTTP transport seam
//!
//! One request in, one classified response out. Retry policy lives
//! entirely in the backoff controller, so the transport never loops: it
//! issues a single POST and reports what came back.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error-body characters carried into an `Error::HttpStatus` message
const ERROR_BODY_LIMIT: usize = 512;

/// Issues one page request and returns the status plus decoded body
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// POST `body` as UTF-8 JSON with the given headers
    ///
    /// Returns the status code alongside the decoded body for 2xx
    /// responses, or the status alongside a body-text snippet otherwise.
    /// Connection and timeout failures surface as retryable errors; a 2xx
    /// response that is not valid JSON is a fatal decode error.
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &JsonValue,
    ) -> Result<(u16, JsonValue)>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom per-request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &JsonValue,
    ) -> Result<(u16, JsonValue)> {
        // Serialize ourselves instead of using reqwest's json() so the
        // bytes on the wire are exactly serde_json's UTF-8 output; keyword
        // text must round-trip without ASCII escaping.
        let payload = serde_json::to_vec(body)?;

        let mut request = self.client.post(url).body(payload);
        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, bytes = text.len(), "page response");

        if (200..300).contains(&status) {
            let json = serde_json::from_str(&text)
                .map_err(|e| Error::decode(format!("response body is not valid JSON: {e}")))?;
            Ok((status, json))
        } else {
            let snippet: String = text.chars().take(ERROR_BODY_LIMIT).collect();
            Ok((status, JsonValue::String(snippet)))
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}
