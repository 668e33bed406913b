pub mod actions;
mod audit;
mod classifier_agent;
mod config;
mod orchestrator;
mod pipeline;

pub use audit::AuditEntry;
pub use audit::AuditSink;
pub use audit::SpamRecord;
pub use classifier_agent::OllamaClassifier;
pub use classifier_agent::SpamClassifier;
pub use classifier_agent::SPAM_PROMPT_FILE;
pub use config::BotConfig;
pub use orchestrator::Orchestrator;
pub use pipeline::ActionRecord;
pub use pipeline::PipelineExecutor;
pub use pipeline::PipelineResult;
pub use pipeline::PipelineStatus;

use serde::{Deserialize, Serialize};

/// Snapshot of one inbound chat message, taken once per event and
/// owned by a single pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageContext {
    pub message_id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub text: String,
    pub received_unix_time: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub rationale: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLabel {
    #[serde(rename = "SPAM")]
    Spam,
    #[serde(rename = "NOT_SPAM")]
    NotSpam,
}
