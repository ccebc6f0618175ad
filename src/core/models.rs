use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// Request/response shape a provider implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    ChatCompletions,
    Responses,
}

impl Schema {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChatCompletions => "chat_completions",
            Self::Responses => "responses",
        }
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub url: String,
    pub schema: Schema,
}

/// Outcome of one scoring call. Exactly one of `score` / `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub success: bool,
    pub score: Option<u8>,
    pub status_code: Option<u16>,
    pub error: Option<String>,
}

impl ScoreResult {
    #[must_use]
    pub const fn scored(score: u8, status_code: u16) -> Self {
        Self {
            success: true,
            score: Some(score),
            status_code: Some(status_code),
            error: None,
        }
    }

    #[must_use]
    pub fn from_error(error: &ClientError) -> Self {
        Self {
            success: false,
            score: None,
            status_code: error.status_code(),
            error: Some(error.to_string()),
        }
    }
}

/// What happens to a comment after it has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Approved,
    Hold,
    Spam,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Approved => "approved",
            Self::Hold => "hold",
            Self::Spam => "spam",
        })
    }
}

/// Applied when a score falls below the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamAction {
    #[default]
    Spam,
    Hold,
}

/// Applied when the check itself fails (timeout, bad status, unparseable reply).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutAction {
    #[default]
    Hold,
    Approve,
}

/// Audit log retention in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRetention {
    /// Keep nothing.
    Disabled,
    /// Never purge.
    Forever,
    Days(u32),
}

impl LogRetention {
    /// 0 disables the log and -1 keeps records forever. Any other negative
    /// value puts the cutoff in the future, which purges everything, so it
    /// behaves like 0.
    #[must_use]
    pub fn from_days(days: i64) -> Self {
        match days {
            -1 => Self::Forever,
            d if d <= 0 => Self::Disabled,
            d => Self::Days(u32::try_from(d).unwrap_or(u32::MAX)),
        }
    }
}
