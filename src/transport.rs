//! HTTP transport shared by the VariantValidator and VEP clients
//!
//! The clients only need "GET this URL and give me the JSON body". That
//! capability is the [`JsonTransport`] trait, so tests can substitute a
//! recording fake and the clients never see `reqwest` directly.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::HttpConfig;
use crate::error::{AnnotateError, TransportError};

/// Maximum number of bytes of an error response body kept in [`TransportError::Status`]
const MAX_ERROR_BODY: usize = 512;

/// Fetch a JSON document with a single HTTP GET
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// GET `url` and parse the body as JSON.
    ///
    /// Fails on connection errors, non-2xx status codes and non-JSON bodies.
    /// Implementations must not retry.
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// [`JsonTransport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport from HTTP settings.
    ///
    /// Without `timeout_seconds` requests block until the server answers or
    /// the connection fails, which is reqwest's default.
    pub fn new(config: &HttpConfig) -> Result<Self, AnnotateError> {
        let mut client_builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .deflate(true);

        if let Some(timeout) = config.timeout_seconds {
            client_builder = client_builder.timeout(Duration::from_secs(timeout));
        }

        let client = client_builder.build().map_err(|e| {
            AnnotateError::Config(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_request_error)?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&body, MAX_ERROR_BODY),
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidJson(e.to_string()))
    }
}

fn classify_request_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Client(error.to_string())
    }
}

/// Shorten an error body to at most `max` bytes on a character boundary
fn truncate_body(body: &str, max: usize) -> String {
    let body = body.trim();
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
