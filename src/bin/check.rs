//! Scores one comment with the configured provider and prints the outcome as JSON.

use anyhow::Context;
use clap::Parser;
use spamjudge::moderation::{Moderator, TracingAuditSink};
use spamjudge::{ScoringClient, Settings};
use tracing::error;

/// Check a single comment against the configured scoring endpoint.
///
/// Connection settings come from `SPAMJUDGE_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "spamjudge-check", version, about)]
struct Args {
    /// Commenter name.
    author: String,

    /// Comment body.
    content: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    spamjudge::setup_logging();

    let settings = Settings::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow::anyhow!(e)
    })?;
    let client = ScoringClient::new().context("Failed to initialize scoring client")?;
    let moderator = Moderator::new(settings, client, TracingAuditSink);

    let outcome = moderator.moderate(&args.author, &args.content).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
