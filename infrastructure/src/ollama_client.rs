use crate::http_error::{classify, invocation};
use async_trait::async_trait;
use domain::backend::ModelBackend;
use domain::error::{BackendError, ChatError, ChatResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Locally hosted model served by Ollama.
#[derive(Clone)]
pub struct OllamaClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> ChatResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Initialization(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check that the server answers and that the configured model is
    /// installed. Both failures are fatal at startup.
    pub async fn verify(&self) -> ChatResult<()> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            ChatError::Initialization(format!(
                "cannot reach Ollama at {}; make sure the service is running ({})",
                self.base_url, e
            ))
        })?;
        if !response.status().is_success() {
            return Err(ChatError::Initialization(format!(
                "Ollama at {} answered {}",
                self.base_url,
                response.status()
            )));
        }
        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Initialization(format!("unexpected /api/tags body: {}", e)))?;

        let wanted_latest = format!("{}:latest", self.model);
        let installed = tags
            .models
            .iter()
            .any(|m| m.name == self.model || m.name == wanted_latest);
        if !installed {
            return Err(ChatError::Initialization(format!(
                "model '{}' is not installed; run `ollama pull {}`",
                self.model, self.model
            )));
        }
        Ok(())
    }

    pub async fn generate_response(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let response = self.client.post(&url).json(&request).send().await.map_err(classify)?;
        let status = response.status();
        let text = response.text().await.map_err(classify)?;
        if !status.is_success() {
            return Err(invocation(status, &text));
        }
        debug!(model = %self.model, bytes = text.len(), "ollama replied");
        parse_generate_body(&text)
    }
}

/// Accepts a single JSON object or NDJSON chunks, which some servers send
/// even when streaming is off.
fn parse_generate_body(text: &str) -> Result<String, BackendError> {
    if let Ok(single) = serde_json::from_str::<GenerateResponse>(text.trim()) {
        return Ok(single.response);
    }

    let mut full_content = String::new();
    let mut parsed_any = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(chunk) = serde_json::from_str::<GenerateResponse>(line) {
            parsed_any = true;
            full_content.push_str(&chunk.response);
            if chunk.done {
                break;
            }
        }
    }
    if parsed_any {
        Ok(full_content)
    } else {
        Err(BackendError::Invocation(format!(
            "unexpected Ollama response body: {}",
            text.chars().take(200).collect::<String>()
        )))
    }
}

#[async_trait]
impl ModelBackend for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        self.generate_response(prompt).await
    }

    fn name(&self) -> String {
        format!("ollama:{}", self.model)
    }
}
