use std::sync::Arc;

use log::{debug, error, info, warn};

use super::audit::{AuditEntry, AuditSink};
use super::classifier_agent::SpamClassifier;
use super::pipeline::{PipelineExecutor, PipelineResult};
use super::{MessageContext, VerdictLabel};

/// Single entry point per inbound message: classify once, run the
/// pipeline for spam, record the outcome. None of the failure modes
/// below escapes to the caller.
pub struct Orchestrator {
    classifier: Arc<dyn SpamClassifier>,
    executor: PipelineExecutor,
    audit: Arc<dyn AuditSink>,
}

impl Orchestrator {
    pub fn new(
        classifier: Arc<dyn SpamClassifier>,
        executor: PipelineExecutor,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            classifier,
            executor,
            audit,
        }
    }

    pub async fn handle_message(&self, context: MessageContext) -> Option<PipelineResult> {
        if context.text.is_empty() {
            debug!("Skipping message {} without text", context.message_id);
            return None;
        }

        let verdict = match self.classifier.classify(&context.text).await {
            Ok(verdict) => verdict,
            Err(e) => {
                // A broken classifier must not block the chat, so the
                // message passes as NOT_SPAM with a distinct audit note.
                warn!(
                    "Classification failed for message {}: {}",
                    context.message_id, e
                );
                let note = AuditEntry::ClassificationFailed {
                    chat_id: context.chat_id,
                    message_id: context.message_id,
                    reason: e.to_string(),
                };
                if let Err(audit_err) = self.audit.append(note).await {
                    error!("Could not record classification failure: {}", audit_err);
                }
                return None;
            }
        };

        if verdict.label == VerdictLabel::NotSpam {
            debug!("Message {} is clean", context.message_id);
            return None;
        }

        info!(
            "Spam detected in chat {} from {}",
            context.chat_id, context.sender_name
        );
        let result = self.executor.execute(context, verdict).await;
        // The actions already ran; a lost audit write is logged, never
        // re-triggered.
        if let Err(e) = self
            .audit
            .append(AuditEntry::PipelineOutcome(result.clone()))
            .await
        {
            error!("Could not record pipeline outcome: {}", e);
        }
        Some(result)
    }
}
