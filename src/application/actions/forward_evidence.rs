use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::{ActionOutcome, ChatModeration, ModerationAction, FORWARD_EVIDENCE};
use crate::application::MessageContext;

/// Forwards the original message to the moderation group. Unreviewed
/// silent deletions are disallowed, so this step is required.
pub struct ForwardEvidenceAction {
    chat: Arc<dyn ChatModeration>,
}

impl ForwardEvidenceAction {
    pub fn new(chat: Arc<dyn ChatModeration>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl ModerationAction for ForwardEvidenceAction {
    fn name(&self) -> &'static str {
        FORWARD_EVIDENCE
    }

    async fn run(&self, context: &MessageContext) -> ActionOutcome {
        match self
            .chat
            .forward_to_moderators(context.chat_id, context.message_id)
            .await
        {
            Ok(()) => {
                debug!("Message {} forwarded to moderators", context.message_id);
                ActionOutcome::Succeeded
            }
            Err(e) => ActionOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}
