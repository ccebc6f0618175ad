use thiserror::Error;

/// Failure kinds of a single scoring call. Every variant is terminal for that call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("author or content empty")]
    EmptyInput,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("API returned error status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid response format")]
    InvalidFormat { status: u16 },

    #[error("content not a valid score: {text}")]
    InvalidScore { status: u16, text: String },
}

impl ClientError {
    /// HTTP status received from the provider, if the request got that far.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. }
            | Self::InvalidFormat { status }
            | Self::InvalidScore { status, .. } => Some(*status),
            Self::EmptyInput | Self::InvalidEndpoint(_) | Self::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ClientError::Transport(format!("request timed out: {error}"))
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}
