#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::BackendPrompt;
use crate::domain::models::GenerationFailure;
use crate::domain::models::Message;
use crate::domain::models::MessageIds;
use crate::domain::models::ReasoningMode;
use crate::domain::models::CHAT_STORAGE_KEY;
use crate::infrastructure::storage::StorageBox;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatStatus {
    #[default]
    Idle,
    AwaitingResponse(ReasoningMode),
}

/// What happened when a generation outcome was handed to the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    Replied(Message),
    Failed(GenerationFailure),
    /// Nothing was waiting for an outcome.
    Ignored,
}

/// Ordered chat history with a single outstanding request at most. Every
/// change is written through to storage.
pub struct Conversation {
    messages: Vec<Message>,
    status: ChatStatus,
    advisory: Option<String>,
    ids: MessageIds,
    storage: StorageBox,
    welcome_text: String,
    system_instruction: String,
}

fn parse_history(raw: &str) -> Result<Vec<Message>> {
    let messages = serde_json::from_str::<Vec<Message>>(raw)?;
    if messages.is_empty() {
        bail!("stored chat history is empty");
    }

    return Ok(messages);
}

impl Conversation {
    /// Restores the stored history. Missing or unreadable history starts a
    /// fresh conversation holding only the welcome message.
    pub async fn load(
        storage: StorageBox,
        welcome_text: &str,
        system_instruction: &str,
    ) -> Conversation {
        let mut messages = vec![Message::welcome(welcome_text)];

        match storage.get_item(CHAT_STORAGE_KEY).await {
            Ok(Some(raw)) => match parse_history(&raw) {
                Ok(stored) => {
                    tracing::debug!(count = stored.len(), "chat history restored");
                    messages = stored;
                }
                Err(err) => {
                    tracing::warn!(error = ?err, "discarding malformed chat history");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = ?err, "failed to read chat history");
            }
        }

        let conversation = Conversation {
            ids: MessageIds::seeded(&messages),
            messages,
            status: ChatStatus::Idle,
            advisory: None,
            storage,
            welcome_text: welcome_text.to_string(),
            system_instruction: system_instruction.to_string(),
        };
        conversation.persist().await;

        return conversation;
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn status(&self) -> ChatStatus {
        return self.status;
    }

    pub fn is_waiting(&self) -> bool {
        return self.status != ChatStatus::Idle;
    }

    /// Explanation of the last failed request, cleared by the next send.
    pub fn advisory(&self) -> Option<&str> {
        return self.advisory.as_deref();
    }

    pub async fn persist(&self) {
        let payload = match serde_json::to_string(&self.messages) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = ?err, "failed to serialize chat history");
                return;
            }
        };

        if let Err(err) = self.storage.set_item(CHAT_STORAGE_KEY, &payload).await {
            tracing::warn!(error = ?err, "failed to persist chat history");
        }
    }

    /// Resets to a fresh welcome message. An outstanding request is left
    /// running and its reply lands after the new welcome.
    pub async fn clear(&mut self) {
        self.messages = vec![Message::welcome(&self.welcome_text)];
        self.advisory = None;
        self.persist().await;
    }

    /// Appends the user's turn and returns the prompt to send. Returns `None`
    /// without touching anything when the text is blank or a reply is still
    /// pending.
    pub async fn send(&mut self, text: &str, mode: ReasoningMode) -> Option<BackendPrompt> {
        if text.trim().is_empty() {
            return None;
        }
        if self.is_waiting() {
            tracing::debug!("send rejected, a reply is still pending");
            return None;
        }

        let prompt = BackendPrompt::new(&self.system_instruction, &self.messages, text, mode);

        self.messages.push(Message::user(self.ids.next_id(), text));
        self.status = ChatStatus::AwaitingResponse(mode);
        self.advisory = None;
        self.persist().await;

        tracing::debug!(mode = mode.label(), turns = prompt.history.len(), "message sent");

        return Some(prompt);
    }

    pub async fn settle(&mut self, outcome: Result<String, GenerationFailure>) -> Settlement {
        let mode = match self.status {
            ChatStatus::AwaitingResponse(mode) => mode,
            ChatStatus::Idle => {
                tracing::warn!("ignoring generation outcome, nothing is pending");
                return Settlement::Ignored;
            }
        };
        self.status = ChatStatus::Idle;

        match outcome {
            Ok(text) => {
                let message = Message::assistant(self.ids.next_id(), &text, mode.is_deep());
                self.messages.push(message.clone());
                self.persist().await;

                return Settlement::Replied(message);
            }
            Err(failure) => {
                tracing::warn!(failure = ?failure, "generation failed");
                self.advisory = Some(failure.advisory());

                return Settlement::Failed(failure);
            }
        }
    }
}
