//! Configuration and shared data types

pub mod config;
pub mod models;

pub use config::{ClientConfig, Settings};
pub use models::{Action, LogRetention, ResolvedEndpoint, Schema, ScoreResult, SpamAction, TimeoutAction};
