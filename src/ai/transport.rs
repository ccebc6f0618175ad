//! Single-attempt HTTPS POST.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::ClientError;

pub const USER_AGENT: &str = concat!("SpamJudge/", env!("CARGO_PKG_VERSION"));

/// Fully buffered response; any status is returned as-is.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Builds the shared HTTP client. Certificate verification stays on.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client() -> Result<Client, ClientError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {e}")))
}

/// Sends `body` once, bounded by `timeout`. A non-200 status is not an error here.
///
/// # Errors
///
/// Returns `ClientError::Transport` on DNS, connection, TLS, timeout or body
/// read failures, and when the API key cannot be carried in a header.
pub async fn post(
    client: &Client,
    url: &str,
    body: &Value,
    api_key: &str,
    timeout: Duration,
) -> Result<RawResponse, ClientError> {
    let mut headers = HeaderMap::new();
    let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| ClientError::Transport(format!("Invalid Authorization header: {e}")))?;
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    #[cfg(feature = "debug-logs")]
    debug!("POST {} body: {}", url, body);

    let response = client
        .post(url)
        .headers(headers)
        .timeout(timeout)
        .json(body)
        .send()
        .await
        .map_err(|e| {
            warn!("Scoring request to {} failed: {}", url, e);
            ClientError::from(e)
        })?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| {
        warn!("Failed to read response body (status {}): {}", status, e);
        ClientError::from(e)
    })?;
    debug!("Received status {} with {} byte body", status, body.len());

    Ok(RawResponse { status, body })
}
