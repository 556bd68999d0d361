pub mod config;
mod http_error;
pub mod ollama_client;
pub mod openai_client;
pub mod provider;
