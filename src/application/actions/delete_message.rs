use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::{ActionOutcome, ChatModeration, ModerationAction, DELETE_MESSAGE};
use crate::application::MessageContext;

/// Removes the offending message from its chat. Deleting is idempotent:
/// a message another moderator already removed counts as success.
pub struct DeleteMessageAction {
    chat: Arc<dyn ChatModeration>,
}

impl DeleteMessageAction {
    pub fn new(chat: Arc<dyn ChatModeration>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl ModerationAction for DeleteMessageAction {
    fn name(&self) -> &'static str {
        DELETE_MESSAGE
    }

    async fn run(&self, context: &MessageContext) -> ActionOutcome {
        match self
            .chat
            .delete_message(context.chat_id, context.message_id)
            .await
        {
            Ok(true) => ActionOutcome::Succeeded,
            Ok(false) => {
                debug!("Message {} was already removed", context.message_id);
                ActionOutcome::Succeeded
            }
            Err(e) => ActionOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod delete_message_test {
    use std::sync::Mutex;

    use super::*;

    struct ForgetfulChat {
        deleted: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl ChatModeration for ForgetfulChat {
        async fn forward_to_moderators(
            &self,
            _chat_id: i64,
            _message_id: i64,
        ) -> anyhow::Result<()> {
            Ok(())
        }

        async fn delete_message(&self, _chat_id: i64, message_id: i64) -> anyhow::Result<bool> {
            let mut deleted = self.deleted.lock().unwrap();
            if deleted.contains(&message_id) {
                return Ok(false);
            }
            deleted.push(message_id);
            Ok(true)
        }

        async fn ban_sender(&self, _chat_id: i64, _user_id: i64) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn context() -> MessageContext {
        MessageContext {
            message_id: 42,
            chat_id: -100500,
            sender_id: 7,
            sender_name: String::from("Ivan Ivanov"),
            text: String::from("Earn $500/day! Message me now"),
            received_unix_time: 1,
        }
    }

    #[tokio::test]
    async fn should_succeed_twice_for_the_same_message() {
        let action = DeleteMessageAction::new(Arc::new(ForgetfulChat {
            deleted: Mutex::new(Vec::new()),
        }));
        let context = context();

        assert_eq!(action.run(&context).await, ActionOutcome::Succeeded);
        assert_eq!(action.run(&context).await, ActionOutcome::Succeeded);
    }
}
