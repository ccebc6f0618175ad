use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::audit::{AuditRecord, AuditSink};
use super::decision::{decide, visitor_message};
use crate::ai::ScoringClient;
use crate::core::config::Settings;
use crate::core::models::{Action, ScoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Not configured, or nothing to check. The comment passes untouched.
    Skipped,
    Checked {
        result: ScoreResult,
        action: Action,
        visitor_message: Option<String>,
    },
}

impl Outcome {
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Skipped => Action::Approved,
            Self::Checked { action, .. } => *action,
        }
    }
}

/// Runs a check, decides, and records the result. All collaborators are passed in.
pub struct Moderator<S: AuditSink> {
    settings: Settings,
    client: ScoringClient,
    sink: S,
}

impl<S: AuditSink> Moderator<S> {
    pub fn new(settings: Settings, client: ScoringClient, sink: S) -> Self {
        Self {
            settings: settings.sanitized(),
            client,
            sink,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub async fn moderate(&self, author: &str, content: &str) -> Outcome {
        if !self.settings.is_configured() || content.is_empty() {
            info!("Skipping comment check: settings incomplete or content empty");
            return Outcome::Skipped;
        }

        let config = self.settings.client_config();
        let result = self.client.check_comment(author, content, &config).await;
        let action = decide(&result, &self.settings);

        let record = AuditRecord {
            author: author.to_string(),
            content: content.to_string(),
            status_code: result.status_code,
            score: result.score,
            action,
            created_at: Utc::now(),
        };
        if let Err(e) = self.sink.record(record).await {
            warn!("Audit write failed, keeping decision {}: {}", action, e);
        }

        let visitor_message = visitor_message(action, &result, &self.settings);
        Outcome::Checked {
            result,
            action,
            visitor_message,
        }
    }
}
