use crate::config::{BackendKind, Config};
use crate::ollama_client::OllamaClient;
use crate::openai_client::OpenAiClient;
use dialoguer::Password;
use domain::backend::ModelBackend;
use domain::error::{ChatError, ChatResult};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;

/// Build the configured backend and make sure it is usable. Any error here
/// is an `Initialization` error and should stop the process.
///
/// With `interactive` set and a terminal on stdin, a missing API key is
/// asked for instead of failing.
pub async fn connect_backend(config: &Config, interactive: bool) -> ChatResult<Arc<dyn ModelBackend>> {
    match config.backend {
        BackendKind::Ollama => {
            let client = OllamaClient::new(&config.ollama_base_url, &config.ollama_model, config.timeout)?;
            client.verify().await?;
            info!(url = %config.ollama_base_url, model = %config.ollama_model, "connected to ollama");
            Ok(Arc::new(client))
        }
        BackendKind::OpenAi => {
            let api_key = resolve_api_key(config, interactive)?;
            let client = OpenAiClient::new(
                &config.openai_base_url,
                &config.openai_model,
                &api_key,
                config.timeout,
            )?;
            info!(url = %config.openai_base_url, model = %config.openai_model, "using remote backend");
            Ok(Arc::new(client))
        }
    }
}

fn resolve_api_key(config: &Config, interactive: bool) -> ChatResult<String> {
    if let Some(key) = &config.openai_api_key {
        return Ok(key.clone());
    }
    if interactive && std::io::stdin().is_terminal() {
        let key = Password::new()
            .with_prompt("OpenAI API key")
            .interact()
            .map_err(|e| ChatError::Initialization(format!("could not read API key: {}", e)))?;
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }
    Err(ChatError::Initialization(
        "OPENAI_API_KEY is not set; export it or add it to .env".to_string(),
    ))
}
