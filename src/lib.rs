mod adapter;
mod application;

pub use adapter::handle_chat_message;
pub use adapter::init_bot;
pub use adapter::BotController;
pub use adapter::FileAuditSink;
pub use adapter::TelegramModeration;
pub use application::actions;
pub use application::ActionRecord;
pub use application::AuditEntry;
pub use application::AuditSink;
pub use application::BotConfig;
pub use application::MessageContext;
pub use application::OllamaClassifier;
pub use application::Orchestrator;
pub use application::PipelineExecutor;
pub use application::PipelineResult;
pub use application::PipelineStatus;
pub use application::SpamClassifier;
pub use application::SpamRecord;
pub use application::Verdict;
pub use application::VerdictLabel;
pub use application::SPAM_PROMPT_FILE;
