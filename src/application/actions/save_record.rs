use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::{ActionOutcome, ModerationAction, SAVE_RECORD};
use crate::application::audit::{AuditEntry, AuditSink, SpamRecord};
use crate::application::MessageContext;

/// Persists the offending message before any evidence is touched.
pub struct SaveRecordAction {
    audit: Arc<dyn AuditSink>,
}

impl SaveRecordAction {
    pub fn new(audit: Arc<dyn AuditSink>) -> Self {
        Self { audit }
    }
}

#[async_trait]
impl ModerationAction for SaveRecordAction {
    fn name(&self) -> &'static str {
        SAVE_RECORD
    }

    async fn run(&self, context: &MessageContext) -> ActionOutcome {
        let record = SpamRecord {
            timestamp: context.received_unix_time,
            sender: context.sender_name.clone(),
            message: context.text.clone(),
        };
        match self.audit.append(AuditEntry::SpamRecord(record)).await {
            Ok(()) => {
                debug!("Spam from {} recorded", context.sender_name);
                ActionOutcome::Succeeded
            }
            Err(e) => ActionOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}
