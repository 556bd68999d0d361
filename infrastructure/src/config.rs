use anyhow::{anyhow, Context};
use dotenvy::dotenv;
use shared::types::Result;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen3:8b";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Ollama,
    OpenAi,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" | "local" => Ok(BackendKind::Ollama),
            "openai" | "remote" => Ok(BackendKind::OpenAi),
            other => Err(anyhow!("unknown backend '{}' (expected 'ollama' or 'openai')", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Ollama => f.write_str("ollama"),
            BackendKind::OpenAi => f.write_str("openai"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_api_key: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Read `.env` (if any) and the process environment.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match non_empty("CHAT_BACKEND") {
            Some(raw) => raw.parse::<BackendKind>().context("invalid CHAT_BACKEND")?,
            None => BackendKind::Ollama,
        };
        let timeout_secs = match non_empty("CHAT_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid CHAT_TIMEOUT_SECS '{}'", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            backend,
            ollama_base_url: non_empty("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            ollama_model: non_empty("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Apply command-line overrides. `model` and `base_url` target whichever
    /// backend is active after `backend` is applied.
    pub fn with_overrides(
        mut self,
        backend: Option<BackendKind>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        if let Some(backend) = backend {
            self.backend = backend;
        }
        match self.backend {
            BackendKind::Ollama => {
                if let Some(model) = model {
                    self.ollama_model = model;
                }
                if let Some(url) = base_url {
                    self.ollama_base_url = url;
                }
            }
            BackendKind::OpenAi => {
                if let Some(model) = model {
                    self.openai_model = model;
                }
                if let Some(url) = base_url {
                    self.openai_base_url = url;
                }
            }
        }
        self
    }

    pub fn active_model(&self) -> &str {
        match self.backend {
            BackendKind::Ollama => &self.ollama_model,
            BackendKind::OpenAi => &self.openai_model,
        }
    }
}
