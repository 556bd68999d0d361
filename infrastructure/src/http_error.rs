use domain::error::BackendError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Transport failures that never reached the service count as unavailable,
/// everything else as a failed invocation.
pub(crate) fn classify(err: reqwest::Error) -> BackendError {
    if err.is_connect() || err.is_timeout() {
        BackendError::Unavailable(err.to_string())
    } else {
        BackendError::Invocation(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Message { message: String },
    Text(String),
}

/// Build an invocation error from a non-success reply, preferring the
/// `error` field both Ollama and OpenAI-style APIs return.
pub(crate) fn invocation(status: StatusCode, body: &str) -> BackendError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody::Message { message },
        }) => message,
        Ok(ErrorEnvelope {
            error: ErrorBody::Text(text),
        }) => text,
        Err(_) => body.trim().chars().take(200).collect(),
    };
    BackendError::Invocation(format!("API error ({}): {}", status, detail))
}
