use async_trait::async_trait;
use log::debug;
use mobot::{BotRequest, Client};
use serde::{Deserialize, Serialize};

use crate::application::actions::ChatModeration;

const ALREADY_DELETED_MARKER: &str = "message to delete not found";

#[derive(Debug, Clone, Serialize, Deserialize, BotRequest)]
pub struct ForwardMessageRequest {
    pub chat_id: String,
    pub from_chat_id: String,
    pub message_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, BotRequest)]
pub struct DeleteMessageRequest {
    pub chat_id: String,
    pub message_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, BotRequest)]
pub struct BanChatMemberRequest {
    pub chat_id: String,
    pub user_id: i64,
}

/// Telegram Bot API side of the moderation capability set.
pub struct TelegramModeration {
    client: Client,
    moderation_chat_id: i64,
}

impl TelegramModeration {
    pub fn new(token: &str, moderation_chat_id: i64) -> Self {
        Self {
            client: Client::new(token.to_string()),
            moderation_chat_id,
        }
    }
}

#[async_trait]
impl ChatModeration for TelegramModeration {
    async fn forward_to_moderators(&self, chat_id: i64, message_id: i64) -> anyhow::Result<()> {
        let request = ForwardMessageRequest {
            chat_id: self.moderation_chat_id.to_string(),
            from_chat_id: chat_id.to_string(),
            message_id,
        };
        let _forwarded: serde_json::Value = self.client.post("forwardMessage", &request).await?;
        debug!("Message {} forwarded to chat {}", message_id, self.moderation_chat_id);
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> anyhow::Result<bool> {
        let request = DeleteMessageRequest {
            chat_id: chat_id.to_string(),
            message_id,
        };
        let result: anyhow::Result<bool> = self.client.post("deleteMessage", &request).await;
        match result {
            Ok(_) => Ok(true),
            // Telegram reports an already-removed message as a Bad Request.
            Err(e) if e.to_string().contains(ALREADY_DELETED_MARKER) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn ban_sender(&self, chat_id: i64, user_id: i64) -> anyhow::Result<()> {
        let request = BanChatMemberRequest {
            chat_id: chat_id.to_string(),
            user_id,
        };
        let banned: bool = self.client.post("banChatMember", &request).await?;
        if !banned {
            anyhow::bail!("Telegram refused to ban user {}", user_id);
        }
        Ok(())
    }
}
