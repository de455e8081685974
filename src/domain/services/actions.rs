#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Event;
use crate::domain::models::GenerationFailure;
use crate::infrastructure::backends::BackendBox;

pub struct ActionsService {}

impl ActionsService {
    /// Returns a user facing warning when the backend is not usable.
    pub async fn health_check(backend: &BackendBox) -> Option<String> {
        if let Err(err) = backend.health_check().await {
            tracing::warn!(error = ?err, "backend health check failed");
            return Some(format!(
                "The assistant is unavailable, questions will fail until this is fixed: {err}"
            ));
        }

        return None;
    }

    /// One round trip against the backend. Failures are classified against the
    /// prompt's reasoning mode.
    pub async fn generate(
        backend: &BackendBox,
        prompt: BackendPrompt,
    ) -> Result<String, GenerationFailure> {
        let mode = prompt.mode;
        return backend.generate(prompt).await.map_err(|err| {
            tracing::error!(error = ?err, mode = mode.label(), "generation request failed");
            return GenerationFailure::classify(&err, mode);
        });
    }

    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                Action::BackendRequest(prompt) => {
                    let worker_backend = backend.clone();
                    let worker_tx = tx.clone();

                    tokio::spawn(async move {
                        let event = match ActionsService::generate(&worker_backend, prompt).await {
                            Ok(text) => Event::BackendResponse(text),
                            Err(failure) => Event::BackendFailure(failure),
                        };

                        if worker_tx.send(event).is_err() {
                            tracing::warn!("event channel closed before the reply arrived");
                        }
                    });
                }
            }
        }

        tracing::debug!("action channel closed");
        return Ok(());
    }
}
