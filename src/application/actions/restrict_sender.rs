use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::{ActionOutcome, ChatModeration, ModerationAction, RESTRICT_SENDER};
use crate::application::MessageContext;

/// Bans the sender from the chat. Registered as optional: the audit
/// trail does not depend on it.
pub struct RestrictSenderAction {
    chat: Arc<dyn ChatModeration>,
}

impl RestrictSenderAction {
    pub fn new(chat: Arc<dyn ChatModeration>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl ModerationAction for RestrictSenderAction {
    fn name(&self) -> &'static str {
        RESTRICT_SENDER
    }

    async fn run(&self, context: &MessageContext) -> ActionOutcome {
        match self
            .chat
            .ban_sender(context.chat_id, context.sender_id)
            .await
        {
            Ok(()) => {
                debug!("Sender {} banned from chat {}", context.sender_id, context.chat_id);
                ActionOutcome::Succeeded
            }
            Err(e) => ActionOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}
