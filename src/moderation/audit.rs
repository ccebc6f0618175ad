//! Audit trail for comment checks
//!
//! The moderator writes one [`AuditRecord`] per checked comment through an
//! [`AuditSink`]. Hosts plug in their own store; two sinks ship here.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::info;

use crate::core::models::{Action, LogRetention};

const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub author: String,
    pub content: String,
    pub status_code: Option<u16>,
    pub score: Option<u8>,
    pub action: Action,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to write audit record: {0}")]
    WriteError(String),
}

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, record: AuditRecord) -> Result<(), AuditError>;
}

/// Emits each record as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, record: AuditRecord) -> Result<(), AuditError> {
        info!(
            author = %record.author,
            status_code = ?record.status_code,
            score = ?record.score,
            action = %record.action,
            created_at = %record.created_at,
            "comment checked"
        );
        Ok(())
    }
}

/// In-process log, newest first.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut Vec<AuditRecord>) -> T) -> T {
        let mut guard = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// One page of records, newest first. `page` starts at 1; `per_page` is capped at 100.
    #[must_use]
    pub fn page(&self, page: usize, per_page: usize) -> Vec<AuditRecord> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let offset = (page - 1).saturating_mul(per_page);

        self.with_records(|records| {
            let mut sorted: Vec<&AuditRecord> = records.iter().collect();
            sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            sorted.into_iter().skip(offset).take(per_page).cloned().collect()
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.with_records(|records| records.len())
    }

    pub fn clear(&self) {
        self.with_records(Vec::clear);
    }

    /// Drops records older than the retention window. Returns how many were removed.
    pub fn purge(&self, retention: LogRetention, now: DateTime<Utc>) -> usize {
        self.with_records(|records| {
            let before = records.len();
            match retention {
                LogRetention::Forever => {}
                LogRetention::Disabled => records.clear(),
                // A cutoff before the earliest representable date keeps everything.
                LogRetention::Days(days) => {
                    if let Some(cutoff) = now.checked_sub_signed(Duration::days(i64::from(days))) {
                        records.retain(|r| r.created_at >= cutoff);
                    }
                }
            }
            before - records.len()
        })
    }
}

#[async_trait]
impl AuditSink for MemoryAuditLog {
    async fn record(&self, record: AuditRecord) -> Result<(), AuditError> {
        self.with_records(|records| records.push(record));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(author: &str, created_at: DateTime<Utc>) -> AuditRecord {
        AuditRecord {
            author: author.to_string(),
            content: "hello".to_string(),
            status_code: Some(200),
            score: Some(80),
            action: Action::Approved,
            created_at,
        }
    }

    #[tokio::test]
    async fn pages_newest_first() {
        let log = MemoryAuditLog::new();
        let now = Utc::now();
        for i in 0..5 {
            log.record(record_at(&format!("a{i}"), now - Duration::minutes(i)))
                .await
                .unwrap();
        }

        assert_eq!(log.total(), 5);
        let first: Vec<String> = log.page(1, 2).into_iter().map(|r| r.author).collect();
        assert_eq!(first, vec!["a0", "a1"]);
        let last: Vec<String> = log.page(3, 2).into_iter().map(|r| r.author).collect();
        assert_eq!(last, vec!["a4"]);
        assert!(log.page(4, 2).is_empty());
        // page 0 is treated as page 1, per_page 0 as 1
        assert_eq!(log.page(0, 0).len(), 1);
        assert_eq!(log.page(1, 1000).len(), 5);
    }

    #[tokio::test]
    async fn purge_honours_retention() {
        let log = MemoryAuditLog::new();
        let now = Utc::now();
        log.record(record_at("old", now - Duration::days(40))).await.unwrap();
        log.record(record_at("new", now - Duration::days(2))).await.unwrap();

        assert_eq!(log.purge(LogRetention::Forever, now), 0);
        assert_eq!(log.purge(LogRetention::Days(30), now), 1);
        assert_eq!(log.page(1, 10)[0].author, "new");

        assert_eq!(log.purge(LogRetention::Days(u32::MAX), now), 0);
        assert_eq!(log.purge(LogRetention::Disabled, now), 1);
        assert_eq!(log.total(), 0);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let log = MemoryAuditLog::new();
        log.record(record_at("x", Utc::now())).await.unwrap();
        log.clear();
        assert_eq!(log.total(), 0);
    }
}
