#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use super::Message;
use super::Role;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReasoningMode {
    #[default]
    Standard,
    /// Trades latency for quality by asking the service for a larger thinking
    /// budget on a stronger model.
    Deep,
}

impl ReasoningMode {
    pub fn from_deep(deep_reasoning: bool) -> ReasoningMode {
        if deep_reasoning {
            return ReasoningMode::Deep;
        }
        return ReasoningMode::Standard;
    }

    pub fn is_deep(&self) -> bool {
        return *self == ReasoningMode::Deep;
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReasoningMode::Standard => return "Standard",
            ReasoningMode::Deep => return "Deep Reasoning",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendPrompt {
    pub system_instruction: String,
    pub history: Vec<HistoryEntry>,
    pub text: String,
    pub mode: ReasoningMode,
}

impl BackendPrompt {
    /// Builds a prompt from the conversation so far. The welcome message is
    /// local chrome and never reaches the service.
    pub fn new(
        system_instruction: &str,
        messages: &[Message],
        text: &str,
        mode: ReasoningMode,
    ) -> BackendPrompt {
        let history = messages
            .iter()
            .filter(|message| return !message.is_welcome())
            .map(|message| {
                return HistoryEntry {
                    role: message.role,
                    text: message.text.to_string(),
                };
            })
            .collect();

        return BackendPrompt {
            system_instruction: system_instruction.to_string(),
            history,
            text: text.to_string(),
            mode,
        };
    }
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single reply for the prompt. Calls are made at most once and
    /// are never retried, so errors should carry whatever the service said so
    /// they can be classified by the caller.
    async fn generate(&self, prompt: BackendPrompt) -> Result<String>;
}
