use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::pipeline::PipelineResult;

/// One persisted spam message, field names match the historical
/// spam log layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpamRecord {
    pub timestamp: u64,
    pub sender: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEntry {
    SpamRecord(SpamRecord),
    PipelineOutcome(PipelineResult),
    ClassificationFailed {
        chat_id: i64,
        message_id: i64,
        reason: String,
    },
}

/// Append-only destination for spam records and pipeline outcomes.
/// Entries are never rewritten.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, entry: AuditEntry) -> anyhow::Result<()>;
}
