use std::fs;
use std::sync::Arc;
use std::time::SystemTime;

use mobot::{Action, BotState, Client, Event, Matcher, Route, Router, State};

use super::{FileAuditSink, TelegramModeration};
use crate::application::actions::{self, ChatModeration};
use crate::application::{
    AuditSink, BotConfig, MessageContext, OllamaClassifier, Orchestrator, PipelineExecutor,
    SPAM_PROMPT_FILE,
};

#[derive(Clone, BotState)]
pub struct BotController {
    orchestrator: Arc<Orchestrator>,
}

impl BotController {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

pub fn init_bot(config: BotConfig) -> Router<BotController> {
    let prompt_template = fs::read_to_string(SPAM_PROMPT_FILE)
        .expect("Failed to read the spam prompt template file");

    let audit: Arc<dyn AuditSink> = Arc::new(FileAuditSink::new(config.spam_log_path.clone()));
    let moderation: Arc<dyn ChatModeration> = Arc::new(TelegramModeration::new(
        &config.telegram_token,
        config.moderation_chat_id,
    ));
    let classifier = Arc::new(OllamaClassifier::new(&config, &prompt_template));
    let registry = Arc::new(actions::default_registry(
        audit.clone(),
        moderation,
        config.restrict_sender,
    ));
    let executor = PipelineExecutor::new(registry, config.action_timeout);
    let orchestrator = Arc::new(Orchestrator::new(classifier, executor, audit));

    let client = Client::new(config.telegram_token.clone());
    let mut router = Router::new(client).with_state(BotController::new(orchestrator));
    router.add_route(Route::Message(Matcher::Any), handle_chat_message);
    router
}

pub async fn handle_chat_message(
    event: Event,
    state: State<BotController>,
) -> Result<Action, anyhow::Error> {
    let message = event.update.get_message()?.clone();
    let Some(text) = message.text else {
        // Media-only updates carry no text to classify.
        return Ok(Action::Done);
    };
    let Some(from) = message.from else {
        return Ok(Action::Done);
    };
    let sender_name = match from.username {
        Some(username) => username,
        None => from.first_name,
    };
    let received_unix_time = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)?
        .as_secs();

    let context = MessageContext {
        message_id: message.message_id,
        chat_id: message.chat.id,
        sender_id: from.id,
        sender_name,
        text,
        received_unix_time,
    };

    let controller = state.get().read().await;
    controller.orchestrator.handle_message(context).await;
    Ok(Action::Done)
}
