//! Outbound scoring client for OpenAI-compatible endpoints

pub mod client;
pub mod endpoint;
pub mod extract;
pub mod request;
pub mod transport;

// Re-export main types for convenience
pub use client::ScoringClient;
pub use endpoint::resolve;
pub use extract::{OutputText, extract_text, parse_score};
pub use request::build_request_body;
