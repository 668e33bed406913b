use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use ollama_rs::{
    generation::{
        chat::{request::ChatMessageRequest, ChatMessage},
        parameters::FormatType,
    },
    Ollama,
};
use serde::Deserialize;

use super::{BotConfig, Verdict, VerdictLabel};

pub const SPAM_PROMPT_FILE: &str = "./spam_role_definition.md";

/// Verdict capability consumed by the orchestrator. Must be callable
/// concurrently for independent messages.
#[async_trait]
pub trait SpamClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<Verdict>;
}

#[derive(Deserialize)]
struct ClassifierReply {
    verdict: VerdictLabel,
    rationale: Option<String>,
}

#[derive(Clone, Default)]
pub struct OllamaClassifier {
    model_name: String,
    ollama: Ollama,
    system_prompt: String,
}

fn assemble_classifier_prompt(prompt_template: &str) -> String {
    let mut prompt = prompt_template.trim().to_string();
    prompt.push_str("\n\n## Format\n\n");
    prompt.push_str("Answer with valid JSON only:\n\n");
    prompt.push_str(
        r#"{"verdict": "SPAM" or "NOT_SPAM", "rationale": "<short reason for the verdict>"}"#,
    );
    prompt.push('\n');
    prompt
}

impl OllamaClassifier {
    pub fn new(config: &BotConfig, prompt_template: &str) -> Self {
        let ollama = Ollama::new(config.ollama_host.clone(), config.ollama_port);
        Self {
            model_name: config.model_name.clone(),
            ollama,
            system_prompt: assemble_classifier_prompt(prompt_template),
        }
    }
}

#[async_trait]
impl SpamClassifier for OllamaClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<Verdict> {
        let messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(text.to_string()),
        ];
        let response = self
            .ollama
            .send_chat_messages(
                ChatMessageRequest::new(self.model_name.to_owned(), messages)
                    .format(FormatType::Json),
            )
            .await?;
        debug!("Classifier response: {}", response.message.content);

        let reply: ClassifierReply = serde_json::from_str(&response.message.content)
            .context("classifier returned malformed JSON")?;
        Ok(Verdict {
            label: reply.verdict,
            rationale: reply.rationale,
        })
    }
}

#[cfg(test)]
mod classifier_agent_test {
    use super::*;

    #[test]
    fn should_append_format_section_to_prompt() {
        let prompt = assemble_classifier_prompt("You are a spam filter.\n");
        assert!(prompt.starts_with("You are a spam filter."));
        assert!(prompt.contains("## Format"));
        assert!(prompt.contains("\"verdict\""));
    }

    #[test]
    fn should_parse_classifier_reply() {
        let reply: ClassifierReply =
            serde_json::from_str(r#"{"verdict": "SPAM", "rationale": "payout promise"}"#)
                .unwrap();
        assert_eq!(reply.verdict, VerdictLabel::Spam);
        assert_eq!(reply.rationale.as_deref(), Some("payout promise"));

        let reply: ClassifierReply =
            serde_json::from_str(r#"{"verdict": "NOT_SPAM"}"#).unwrap();
        assert_eq!(reply.verdict, VerdictLabel::NotSpam);
        assert!(reply.rationale.is_none());
    }

    #[test]
    fn should_reject_unknown_verdict() {
        let reply: Result<ClassifierReply, _> =
            serde_json::from_str(r#"{"verdict": "MAYBE"}"#);
        assert!(reply.is_err());
    }
}
