//! Scoring client
//!
//! One `check_comment` call runs resolve → build → POST → extract → parse
//! exactly once and folds every failure into a [`ScoreResult`].

use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::endpoint::resolve;
use super::extract::{extract_text, parse_score};
use super::request::build_request_body;
use super::transport::{RawResponse, build_http_client, post};
use crate::core::config::ClientConfig;
use crate::core::models::ScoreResult;
use crate::errors::ClientError;

/// Error bodies from providers can be whole HTML pages.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Stateless scoring client. The only thing shared between calls is the
/// HTTP connection pool, so one instance can serve concurrent submissions.
#[derive(Debug, Clone)]
pub struct ScoringClient {
    http: Client,
}

impl ScoringClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client()?,
        })
    }

    #[must_use]
    pub const fn with_http_client(http: Client) -> Self {
        Self { http }
    }

    /// Scores a comment. Never retries and never returns early without a result.
    pub async fn check_comment(&self, author: &str, content: &str, config: &ClientConfig) -> ScoreResult {
        match self.try_check_comment(author, content, config).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Comment check failed: {}", e);
                ScoreResult::from_error(&e)
            }
        }
    }

    async fn try_check_comment(
        &self,
        author: &str,
        content: &str,
        config: &ClientConfig,
    ) -> Result<ScoreResult, ClientError> {
        if author.is_empty() || content.is_empty() {
            return Err(ClientError::EmptyInput);
        }

        let endpoint = resolve(config.endpoint())?;
        info!(
            "Scoring comment via {} ({}) with model {}",
            endpoint.url,
            endpoint.schema,
            config.model_id()
        );

        let body = build_request_body(endpoint.schema, config, author, content);
        let RawResponse { status, body } =
            post(&self.http, &endpoint.url, &body, config.api_key(), config.timeout()).await?;

        if status != 200 {
            return Err(ClientError::Http {
                status,
                body: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let decoded: Value =
            serde_json::from_str(&body).map_err(|_| ClientError::InvalidFormat { status })?;
        let text = extract_text(endpoint.schema, &decoded).ok_or(ClientError::InvalidFormat { status })?;

        let score = parse_score(&text).ok_or_else(|| ClientError::InvalidScore {
            status,
            text: text.clone(),
        })?;
        info!("Comment scored {} (status {})", score, status);

        Ok(ScoreResult::scored(score, status))
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
