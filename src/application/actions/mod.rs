mod delete_message;
mod forward_evidence;
mod restrict_sender;
mod save_record;

pub use delete_message::DeleteMessageAction;
pub use forward_evidence::ForwardEvidenceAction;
pub use restrict_sender::RestrictSenderAction;
pub use save_record::SaveRecordAction;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::audit::AuditSink;
use super::MessageContext;

pub const SAVE_RECORD: &str = "save_record";
pub const FORWARD_EVIDENCE: &str = "forward_evidence";
pub const DELETE_MESSAGE: &str = "delete_message";
pub const RESTRICT_SENDER: &str = "restrict_sender";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionOutcome {
    Succeeded,
    Failed { reason: String },
    Skipped,
}

/// One named moderation step. Implementations are stateless and report
/// their outcome instead of raising it.
#[async_trait]
pub trait ModerationAction: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, context: &MessageContext) -> ActionOutcome;
}

/// Moderation capability set of the chat platform.
#[async_trait]
pub trait ChatModeration: Send + Sync {
    async fn forward_to_moderators(&self, chat_id: i64, message_id: i64) -> anyhow::Result<()>;
    /// Returns false when the message was already gone.
    async fn delete_message(&self, chat_id: i64, message_id: i64) -> anyhow::Result<bool>;
    async fn ban_sender(&self, chat_id: i64, user_id: i64) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct ActionEntry {
    /// A failing required action aborts the remaining pipeline, an
    /// optional one is only logged.
    pub required: bool,
    pub action: Arc<dyn ModerationAction>,
}

/// Ordered action sequence, built once at startup and read-only during
/// pipeline runs.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    entries: Vec<ActionEntry>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, action: Arc<dyn ModerationAction>, required: bool) {
        self.entries.push(ActionEntry { required, action });
    }

    pub fn ordered_actions(&self) -> &[ActionEntry] {
        &self.entries
    }
}

/// Canonical sequence: evidence is recorded and forwarded before the
/// offending message is deleted. Restricting the sender is a best-effort
/// hardening step and can be left out entirely.
pub fn default_registry(
    audit: Arc<dyn AuditSink>,
    chat: Arc<dyn ChatModeration>,
    restrict_sender: bool,
) -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(Arc::new(SaveRecordAction::new(audit)), true);
    registry.register(Arc::new(ForwardEvidenceAction::new(chat.clone())), true);
    registry.register(Arc::new(DeleteMessageAction::new(chat.clone())), true);
    if restrict_sender {
        registry.register(Arc::new(RestrictSenderAction::new(chat)), false);
    }
    registry
}

#[cfg(test)]
mod registry_test {
    use std::sync::Mutex;

    use super::*;
    use crate::application::audit::AuditEntry;

    struct NullAuditSink;

    #[async_trait]
    impl AuditSink for NullAuditSink {
        async fn append(&self, _entry: AuditEntry) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct NullChatModeration {
        deleted: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl ChatModeration for NullChatModeration {
        async fn forward_to_moderators(
            &self,
            _chat_id: i64,
            _message_id: i64,
        ) -> anyhow::Result<()> {
            Ok(())
        }

        async fn delete_message(&self, _chat_id: i64, message_id: i64) -> anyhow::Result<bool> {
            self.deleted.lock().unwrap().push(message_id);
            Ok(true)
        }

        async fn ban_sender(&self, _chat_id: i64, _user_id: i64) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn names(registry: &ActionRegistry) -> Vec<&'static str> {
        registry
            .ordered_actions()
            .iter()
            .map(|entry| entry.action.name())
            .collect()
    }

    #[test]
    fn should_keep_canonical_order_with_restriction_enabled() {
        let registry = default_registry(
            Arc::new(NullAuditSink),
            Arc::new(NullChatModeration {
                deleted: Mutex::new(Vec::new()),
            }),
            true,
        );
        assert_eq!(
            names(&registry),
            vec![SAVE_RECORD, FORWARD_EVIDENCE, DELETE_MESSAGE, RESTRICT_SENDER]
        );
        let required: Vec<bool> = registry
            .ordered_actions()
            .iter()
            .map(|entry| entry.required)
            .collect();
        assert_eq!(required, vec![true, true, true, false]);
    }

    #[test]
    fn should_omit_restriction_when_disabled() {
        let registry = default_registry(
            Arc::new(NullAuditSink),
            Arc::new(NullChatModeration {
                deleted: Mutex::new(Vec::new()),
            }),
            false,
        );
        assert_eq!(
            names(&registry),
            vec![SAVE_RECORD, FORWARD_EVIDENCE, DELETE_MESSAGE]
        );
    }
}
