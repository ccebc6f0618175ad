use async_trait::async_trait;
use serde_json::json;
use spamjudge::core::models::{Action, SpamAction, TimeoutAction};
use spamjudge::moderation::{AuditError, AuditRecord, AuditSink, MemoryAuditLog, Moderator, Outcome};
use spamjudge::{ScoringClient, Settings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(endpoint: String) -> Settings {
    Settings {
        api_endpoint: endpoint,
        api_key: "sk-test".into(),
        model_id: "gpt-4o-mini".into(),
        timeout: 5,
        score_threshold: 40,
        spam_message: "Looks like spam to us.".into(),
        error_message: "We could not check your comment right now.".into(),
        ..Settings::default()
    }
}

async fn mount_score(server: &MockServer, score: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": score } }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn low_score_is_marked_spam_and_logged() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "25").await;

    let moderator = Moderator::new(
        settings_for(mock_server.uri()),
        ScoringClient::new().unwrap(),
        MemoryAuditLog::new(),
    );
    let outcome = moderator.moderate("Spammer", "buy now").await;

    match &outcome {
        Outcome::Checked {
            result,
            action,
            visitor_message,
        } => {
            assert!(result.success);
            assert_eq!(result.score, Some(25));
            assert_eq!(*action, Action::Spam);
            assert_eq!(visitor_message.as_deref(), Some("Looks like spam to us."));
        }
        Outcome::Skipped => panic!("comment should have been checked"),
    }

    let logged = moderator.sink().page(1, 20);
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].author, "Spammer");
    assert_eq!(logged[0].content, "buy now");
    assert_eq!(logged[0].status_code, Some(200));
    assert_eq!(logged[0].score, Some(25));
    assert_eq!(logged[0].action, Action::Spam);
}

#[tokio::test]
async fn low_score_can_be_held_instead() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "25").await;

    let settings = Settings {
        spam_action: SpamAction::Hold,
        ..settings_for(mock_server.uri())
    };
    let moderator = Moderator::new(settings, ScoringClient::new().unwrap(), MemoryAuditLog::new());

    assert_eq!(moderator.moderate("Spammer", "buy now").await.action(), Action::Hold);
}

#[tokio::test]
async fn high_score_is_approved_without_message() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "85").await;

    let moderator = Moderator::new(
        settings_for(mock_server.uri()),
        ScoringClient::new().unwrap(),
        MemoryAuditLog::new(),
    );
    let outcome = moderator.moderate("Alice", "Thoughtful reply").await;

    assert_eq!(outcome.action(), Action::Approved);
    if let Outcome::Checked { visitor_message, .. } = outcome {
        assert_eq!(visitor_message, None);
    }
    assert_eq!(moderator.sink().total(), 1);
}

#[tokio::test]
async fn failed_check_follows_timeout_action() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let moderator = Moderator::new(
        settings_for(mock_server.uri()),
        ScoringClient::new().unwrap(),
        MemoryAuditLog::new(),
    );
    let outcome = moderator.moderate("Alice", "Hello").await;
    assert_eq!(outcome.action(), Action::Hold);
    if let Outcome::Checked { visitor_message, .. } = &outcome {
        assert_eq!(
            visitor_message.as_deref(),
            Some("We could not check your comment right now.")
        );
    }

    let logged = moderator.sink().page(1, 1);
    assert_eq!(logged[0].status_code, Some(503));
    assert_eq!(logged[0].score, None);

    let settings = Settings {
        timeout_action: TimeoutAction::Approve,
        ..settings_for(mock_server.uri())
    };
    let moderator = Moderator::new(settings, ScoringClient::new().unwrap(), MemoryAuditLog::new());
    assert_eq!(moderator.moderate("Alice", "Hello").await.action(), Action::Approved);
}

#[tokio::test]
async fn unconfigured_settings_skip_the_check() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let settings = Settings {
        api_key: String::new(),
        ..settings_for(mock_server.uri())
    };
    let moderator = Moderator::new(settings, ScoringClient::new().unwrap(), MemoryAuditLog::new());

    assert_eq!(moderator.moderate("Alice", "Hello").await, Outcome::Skipped);
    assert_eq!(moderator.sink().total(), 0);

    let moderator = Moderator::new(
        settings_for(mock_server.uri()),
        ScoringClient::new().unwrap(),
        MemoryAuditLog::new(),
    );
    assert_eq!(moderator.moderate("Alice", "").await, Outcome::Skipped);
}

struct FailingSink;

#[async_trait]
impl AuditSink for FailingSink {
    async fn record(&self, _record: AuditRecord) -> Result<(), AuditError> {
        Err(AuditError::WriteError("disk full".to_string()))
    }
}

#[tokio::test]
async fn audit_failure_does_not_change_decision() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "10").await;

    let moderator = Moderator::new(
        settings_for(mock_server.uri()),
        ScoringClient::new().unwrap(),
        FailingSink,
    );
    assert_eq!(moderator.moderate("Spammer", "buy now").await.action(), Action::Spam);
}
