use serde::Deserialize;
use thiserror::Error;

/// One rejected field from a 4xx validation response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Login was rejected by the server. Never retried.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The refresh token was missing or rejected; the session has been
    /// cleared by the time this surfaces.
    #[error("Session expired")]
    SessionExpired,

    /// Resource missing (404). Carries the request path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API rejected the payload with per-field errors.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Transport-level failure. Never retried automatically.
    #[error("Network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// Session store read/write failed.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Anything the client cannot interpret (5xx, malformed bodies).
    #[error("Unexpected API response: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Unexpected(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}
