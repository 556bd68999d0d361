use crate::error::BackendError;
use async_trait::async_trait;

/// Opaque text-completion capability. The session layer only ever talks to
/// this trait, never to a concrete client.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;

    /// Display label, e.g. `ollama:qwen3:8b`.
    fn name(&self) -> String;
}
