use thiserror::Error;

/// Failure of a single model backend call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The endpoint could not be reached (connect error, timeout, DNS).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The endpoint answered but the call failed.
    #[error("backend invocation failed: {0}")]
    Invocation(String),
}

#[derive(Error, Debug)]
pub enum ChatError {
    /// The backend could not be constructed or reached at startup. Fatal.
    #[error("failed to initialize model backend: {0}")]
    Initialization(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("unknown session: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),
}

pub type ChatResult<T> = std::result::Result<T, ChatError>;
