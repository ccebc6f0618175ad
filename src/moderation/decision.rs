use crate::core::config::Settings;
use crate::core::models::{Action, ScoreResult, SpamAction, TimeoutAction};

/// Maps a score result onto the action configured for it.
#[must_use]
pub fn decide(result: &ScoreResult, settings: &Settings) -> Action {
    match (result.success, result.score) {
        (true, Some(score)) if score < settings.score_threshold => match settings.spam_action {
            SpamAction::Spam => Action::Spam,
            SpamAction::Hold => Action::Hold,
        },
        (true, Some(_)) => Action::Approved,
        _ => match settings.timeout_action {
            TimeoutAction::Approve => Action::Approved,
            TimeoutAction::Hold => Action::Hold,
        },
    }
}

/// Notice shown to the commenter when their comment did not go straight through.
///
/// A failed check (non-200 or no score) uses `error_message`; a low score uses
/// `spam_message`. Blank messages mean "say nothing".
#[must_use]
pub fn visitor_message(action: Action, result: &ScoreResult, settings: &Settings) -> Option<String> {
    if action == Action::Approved {
        return None;
    }

    let failed = result.status_code != Some(200) || result.score.is_none();
    let message = if failed {
        settings.error_message.trim()
    } else {
        settings.spam_message.trim()
    };

    (!message.is_empty()).then(|| message.to_string())
}
