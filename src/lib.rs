//! SpamJudge - scores blog comments for spam with an OpenAI-compatible model.
//!
//! The crate is built around one outbound client that:
//! 1. Resolves a user-supplied endpoint into a Chat Completions or Responses API URL
//! 2. Builds the matching request body for the comment
//! 3. Sends a single bounded POST
//! 4. Pulls the reply text out of whichever response shape came back and reads a 0-100 score
//!
//! The `moderation` module turns that score into an approve/hold/spam decision
//! and writes an audit record through an injected sink.
//!
//! # Example
//!
//! ```no_run
//! use spamjudge::ai::ScoringClient;
//! use spamjudge::core::config::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     spamjudge::setup_logging();
//!
//!     let client = ScoringClient::new()?;
//!     let config = ClientConfig::new("https://api.openai.com/v1", "sk-...", "gpt-4o-mini")
//!         .with_timeout_secs(10);
//!
//!     let result = client
//!         .check_comment("Alice", "Great write-up, thanks!", &config)
//!         .await;
//!     match result.score {
//!         Some(score) => println!("Score: {score}"),
//!         None => println!("Check failed: {}", result.error.unwrap_or_default()),
//!     }
//!
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod moderation;

pub use crate::ai::ScoringClient;
pub use crate::core::{ClientConfig, ScoreResult, Settings};
pub use crate::errors::ClientError;

/// Configure structured JSON logging.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`. Call once at
/// process start.
///
/// # Example
///
/// ```
/// spamjudge::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
