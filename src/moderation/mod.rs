//! Comment moderation built on the scoring client

pub mod audit;
pub mod decision;
pub mod moderator;

pub use audit::{AuditError, AuditRecord, AuditSink, MemoryAuditLog, TracingAuditSink};
pub use decision::{decide, visitor_message};
pub use moderator::{Moderator, Outcome};
