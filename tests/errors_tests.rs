use std::error::Error;
use spamjudge::ScoreResult;
use spamjudge::errors::ClientError;

#[test]
fn test_client_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = ClientError::InvalidEndpoint("endpoint is empty".to_string());
    assert_error(&error);
}

#[test]
fn test_client_error_display() {
    let error = ClientError::EmptyInput;
    assert_eq!(format!("{error}"), "author or content empty");

    let error = ClientError::Http {
        status: 429,
        body: "rate limited".to_string(),
    };
    assert_eq!(format!("{error}"), "API returned error status 429: rate limited");

    let error = ClientError::InvalidFormat { status: 200 };
    assert_eq!(format!("{error}"), "invalid response format");

    let error = ClientError::InvalidScore {
        status: 200,
        text: "spam".to_string(),
    };
    assert_eq!(format!("{error}"), "content not a valid score: spam");
}

#[test]
fn test_status_code_only_when_response_received() {
    assert_eq!(ClientError::EmptyInput.status_code(), None);
    assert_eq!(ClientError::Transport("dns".to_string()).status_code(), None);
    assert_eq!(ClientError::InvalidFormat { status: 200 }.status_code(), Some(200));
    assert_eq!(
        ClientError::Http {
            status: 500,
            body: String::new()
        }
        .status_code(),
        Some(500)
    );
}

#[test]
fn test_score_result_has_exactly_one_of_score_or_error() {
    let ok = ScoreResult::scored(85, 200);
    assert!(ok.success);
    assert_eq!(ok.score, Some(85));
    assert!(ok.error.is_none());

    let failed = ScoreResult::from_error(&ClientError::Transport("connection refused".to_string()));
    assert!(!failed.success);
    assert!(failed.score.is_none());
    assert_eq!(failed.status_code, None);
    assert_eq!(
        failed.error.as_deref(),
        Some("transport failure: connection refused")
    );

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> ClientError {
        ClientError::from(err)
    }
}
