use crate::context_builder::ContextBuilder;
use crate::session_store::SessionStore;
use domain::backend::ModelBackend;
use domain::error::{ChatError, ChatResult};
use domain::session::Turn;
use shared::telemetry::Telemetry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns every conversation and drives build -> complete -> append for each
/// submitted message.
pub struct SessionManager {
    store: SessionStore,
    builder: ContextBuilder,
    backend: Arc<dyn ModelBackend>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self::with_builder(backend, ContextBuilder::default())
    }

    pub fn with_builder(backend: Arc<dyn ModelBackend>, builder: ContextBuilder) -> Self {
        Self {
            store: SessionStore::new(),
            builder,
            backend,
        }
    }

    pub fn backend_name(&self) -> String {
        self.backend.name()
    }

    /// A non-empty `requested_id` is used verbatim, adopting any history
    /// already stored under it. Otherwise a fresh UUID is generated.
    pub async fn create_session(&self, requested_id: Option<&str>) -> String {
        let id = match requested_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        if self.store.ensure(&id).await {
            info!(session = %id, "created session");
        } else {
            debug!(session = %id, "adopted existing session");
        }
        id
    }

    pub async fn reset_session(&self, session_id: &str) -> ChatResult<()> {
        let entry = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| ChatError::NotFound(session_id.to_string()))?;
        let _gate = entry.gate().lock().await;
        entry.transcript().write().await.clear();
        info!(session = %session_id, "reset session");
        Ok(())
    }

    /// Record `user_text`, ask the backend for a reply and record that too.
    ///
    /// The user turn is kept when the backend fails; the error is returned as
    /// `ChatError::Backend`. Submits on the same session run one at a time.
    pub async fn submit(&self, session_id: &str, user_text: &str) -> ChatResult<Turn> {
        validate_text(user_text)?;
        let entry = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| ChatError::NotFound(session_id.to_string()))?;
        let _gate = entry.gate().lock().await;

        let prompt = {
            let mut transcript = entry.transcript().write().await;
            transcript.push_user(user_text);
            self.builder.build(transcript.turns())
        };
        debug!(session = %session_id, prompt_chars = prompt.chars().count(), "prompt built");

        let timer = Telemetry::new("submit");
        let reply = self.backend.complete(&prompt).await;
        timer.finish();

        match reply {
            Ok(content) => {
                let turn = entry.transcript().write().await.push_assistant(content);
                Ok(turn)
            }
            Err(err) => {
                warn!(session = %session_id, error = %err, "backend call failed");
                Err(err.into())
            }
        }
    }

    pub async fn get_history(&self, session_id: &str) -> ChatResult<Vec<Turn>> {
        let entry = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| ChatError::NotFound(session_id.to_string()))?;
        let transcript = entry.transcript().read().await;
        Ok(transcript.turns().to_vec())
    }

    pub async fn list_sessions(&self) -> Vec<String> {
        self.store.ids().await
    }

    /// Single question with no history and no session.
    pub async fn ask_once(&self, user_text: &str) -> ChatResult<String> {
        validate_text(user_text)?;
        let timer = Telemetry::new("ask_once");
        let reply = self.backend.complete(user_text).await;
        timer.finish();
        reply.map_err(|err| {
            warn!(error = %err, "backend call failed");
            err.into()
        })
    }
}

fn validate_text(user_text: &str) -> ChatResult<()> {
    if user_text.trim().is_empty() {
        return Err(ChatError::Validation("message must not be empty".to_string()));
    }
    Ok(())
}
