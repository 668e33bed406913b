use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use super::actions::{ActionEntry, ActionOutcome, ActionRegistry};
use super::{MessageContext, Verdict};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStatus {
    Completed,
    Aborted,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: String,
    pub outcome: ActionOutcome,
}

/// Final record of one pipeline run. The action log lists exactly the
/// actions that were attempted, in registry order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineResult {
    pub context: MessageContext,
    pub verdict: Verdict,
    pub action_log: Vec<ActionRecord>,
    pub status: PipelineStatus,
}

enum RunState {
    NotStarted,
    Running(usize),
    Completed,
    Aborted,
}

/// Drives the ordered action sequence for one message. Actions run
/// strictly one after another, a single invocation attempt each; the
/// per-action timeout counts as a failure.
#[derive(Clone)]
pub struct PipelineExecutor {
    registry: Arc<ActionRegistry>,
    action_timeout: Duration,
}

impl PipelineExecutor {
    pub fn new(registry: Arc<ActionRegistry>, action_timeout: Duration) -> Self {
        Self {
            registry,
            action_timeout,
        }
    }

    pub async fn execute(&self, context: MessageContext, verdict: Verdict) -> PipelineResult {
        let entries = self.registry.ordered_actions();
        let mut action_log: Vec<ActionRecord> = Vec::with_capacity(entries.len());
        let mut state = RunState::NotStarted;

        loop {
            state = match state {
                RunState::NotStarted => RunState::Running(0),
                RunState::Running(index) if index >= entries.len() => RunState::Completed,
                RunState::Running(index) => {
                    let entry = &entries[index];
                    let outcome = self.run_action(entry, &context).await;
                    // The log entry is appended before the next transition
                    // is evaluated.
                    action_log.push(ActionRecord {
                        action: entry.action.name().to_string(),
                        outcome: outcome.clone(),
                    });
                    match outcome {
                        ActionOutcome::Failed { ref reason } if entry.required => {
                            warn!(
                                "Required action {} failed, aborting pipeline: {}",
                                entry.action.name(),
                                reason
                            );
                            RunState::Aborted
                        }
                        ActionOutcome::Failed { ref reason } => {
                            warn!(
                                "Optional action {} failed, continuing: {}",
                                entry.action.name(),
                                reason
                            );
                            RunState::Running(index + 1)
                        }
                        _ => RunState::Running(index + 1),
                    }
                }
                RunState::Completed => {
                    break PipelineResult {
                        context,
                        verdict,
                        action_log,
                        status: PipelineStatus::Completed,
                    };
                }
                RunState::Aborted => {
                    break PipelineResult {
                        context,
                        verdict,
                        action_log,
                        status: PipelineStatus::Aborted,
                    };
                }
            };
        }
    }

    async fn run_action(&self, entry: &ActionEntry, context: &MessageContext) -> ActionOutcome {
        debug!("Running action {}", entry.action.name());
        match timeout(self.action_timeout, entry.action.run(context)).await {
            Ok(outcome) => outcome,
            Err(_) => ActionOutcome::Failed {
                reason: format!("timed out after {:?}", self.action_timeout),
            },
        }
    }
}
