//! Endpoint resolution
//!
//! Turns whatever the operator pasted (a bare host, a `/v1` base, or a fully
//! qualified completions/responses URL) into the URL we POST to, plus the
//! request schema that URL implies.

use url::Url;

use crate::core::models::{ResolvedEndpoint, Schema};
use crate::errors::ClientError;

const CHAT_COMPLETIONS_SUFFIX: &str = "/v1/chat/completions";
const RESPONSES_SUFFIX: &str = "/v1/responses";

/// Resolves a raw endpoint string. Pure; a canonical URL (one whose path
/// already ends in `/v1/chat/completions` or `/v1/responses`) comes back
/// unchanged.
///
/// A base ending in `/` resolves to `<base>chat/completions` without a `/v1`
/// segment, so that output is not itself canonical and resolving it again
/// appends `/v1/chat/completions`.
///
/// # Errors
///
/// Returns `ClientError::InvalidEndpoint` when the input is blank or the
/// resolved URL is not an absolute http(s) URL.
pub fn resolve(raw: &str) -> Result<ResolvedEndpoint, ClientError> {
    let mut endpoint = raw.trim();
    if endpoint.is_empty() {
        return Err(ClientError::InvalidEndpoint("endpoint is empty".to_string()));
    }

    // A trailing `#` means "take this URL as typed"; drop it and resolve what's left.
    if endpoint.ends_with('#') {
        endpoint = endpoint.trim_end_matches(['#', ' ']);
        if endpoint.is_empty() {
            return Err(ClientError::InvalidEndpoint("endpoint is empty".to_string()));
        }
    }

    let (path, tail) = split_path(endpoint);
    let resolved = if let Some(schema) = preserved_schema(path) {
        ResolvedEndpoint {
            url: endpoint.to_string(),
            schema,
        }
    } else if let Some(schema) = path.strip_suffix('/').and_then(preserved_schema) {
        ResolvedEndpoint {
            url: format!("{}{tail}", &path[..path.len() - 1]),
            schema,
        }
    } else {
        let suffix = if path.ends_with("/v1") {
            "/chat/completions"
        } else if path.ends_with('/') {
            "chat/completions"
        } else {
            CHAT_COMPLETIONS_SUFFIX
        };
        ResolvedEndpoint {
            url: format!("{path}{suffix}{tail}"),
            schema: Schema::ChatCompletions,
        }
    };

    validate(&resolved.url)?;
    Ok(resolved)
}

fn preserved_schema(path: &str) -> Option<Schema> {
    if path.ends_with(CHAT_COMPLETIONS_SUFFIX) {
        Some(Schema::ChatCompletions)
    } else if path.ends_with(RESPONSES_SUFFIX) {
        Some(Schema::Responses)
    } else {
        None
    }
}

/// Splits at the first `?` or `#`, so suffix checks never see the query or fragment.
fn split_path(endpoint: &str) -> (&str, &str) {
    match endpoint.find(['?', '#']) {
        Some(idx) => endpoint.split_at(idx),
        None => (endpoint, ""),
    }
}

fn validate(url: &str) -> Result<(), ClientError> {
    let parsed = Url::parse(url).map_err(|e| ClientError::InvalidEndpoint(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        "http" | "https" => Err(ClientError::InvalidEndpoint(format!("{url}: missing host"))),
        other => Err(ClientError::InvalidEndpoint(format!(
            "{url}: unsupported scheme {other}"
        ))),
    }
}
