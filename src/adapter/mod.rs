mod endpoints;
mod spam_repository;
mod telegram_moderation;

pub use endpoints::handle_chat_message;
pub use endpoints::init_bot;
pub use endpoints::BotController;
pub use spam_repository::FileAuditSink;
pub use telegram_moderation::TelegramModeration;
