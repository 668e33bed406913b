use std::{env, time::Duration};

use anyhow::Context;

pub const DEFAULT_ACTION_TIMEOUT_SECS: u64 = 5;

/// Runtime settings, loaded once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub telegram_token: String,
    /// Chat that receives forwarded spam evidence.
    pub moderation_chat_id: i64,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub model_name: String,
    pub spam_log_path: String,
    pub action_timeout: Duration,
    pub restrict_sender: bool,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let telegram_token =
            env::var("TELEGRAM_TOKEN").context("TELEGRAM_TOKEN is not set")?;
        let moderation_chat_id = env::var("TARGET_GROUP_ID")
            .context("TARGET_GROUP_ID is not set")?
            .parse()
            .context("TARGET_GROUP_ID must be a numeric chat id")?;
        let ollama_host =
            env::var("OLLAMA_HOST_ADDR").unwrap_or(String::from("http://localhost"));
        let ollama_port = env::var("OLLAMA_PORT")
            .unwrap_or(String::from("11434"))
            .parse()
            .context("OLLAMA_PORT must be a port number")?;
        let model_name = env::var("LLM_MODEL").unwrap_or(String::from("mistral-nemo:12b"));
        let spam_log_path =
            env::var("SPAM_LOG_PATH").unwrap_or(String::from("./spam_log.json"));
        let action_timeout_secs = env::var("ACTION_TIMEOUT_SECS")
            .unwrap_or(DEFAULT_ACTION_TIMEOUT_SECS.to_string())
            .parse()
            .context("ACTION_TIMEOUT_SECS must be a number of seconds")?;
        let restrict_sender = env::var("RESTRICT_SENDER")
            .map(|value| value == "true")
            .unwrap_or(false);

        Ok(Self {
            telegram_token,
            moderation_chat_id,
            ollama_host,
            ollama_port,
            model_name,
            spam_log_path,
            action_timeout: Duration::from_secs(action_timeout_secs),
            restrict_sender,
        })
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    // Single test so the process-wide environment is only touched once.
    #[test]
    fn should_apply_defaults_and_enforce_required_variables() {
        env::remove_var("TELEGRAM_TOKEN");
        env::remove_var("TARGET_GROUP_ID");
        assert!(BotConfig::from_env().is_err());

        env::set_var("TELEGRAM_TOKEN", "token");
        env::set_var("TARGET_GROUP_ID", "-100123");
        let config = BotConfig::from_env().unwrap();
        assert_eq!(config.moderation_chat_id, -100123);
        assert_eq!(config.ollama_host, "http://localhost");
        assert_eq!(config.ollama_port, 11434);
        assert_eq!(config.model_name, "mistral-nemo:12b");
        assert_eq!(
            config.action_timeout,
            Duration::from_secs(DEFAULT_ACTION_TIMEOUT_SECS)
        );
        assert!(!config.restrict_sender);
    }
}
