//! Inference error types

use thiserror::Error;

/// Inference failure with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InferenceError {
    pub kind: InferenceErrorKind,
    pub message: String,
    /// HTTP status when the upstream answered with a non-success code
    pub status: Option<u16>,
}

impl InferenceError {
    pub fn new(kind: InferenceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(InferenceErrorKind::Transport, message)
    }

    /// Non-success status; `body` is the raw upstream response text
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: InferenceErrorKind::Upstream,
            message: format!("API returned error: {}", body.into()),
            status: Some(status),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(InferenceErrorKind::Decode, message)
    }

    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::transport(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            Self::transport(format!("Connection failed: {e}"))
        } else {
            Self::transport(format!("Request failed: {e}"))
        }
    }
}

/// Where a failure originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceErrorKind {
    /// DNS, refused connection, reset, timeout
    Transport,
    /// Upstream answered outside the 2xx range
    Upstream,
    /// Response body was not the expected JSON
    Decode,
}

impl InferenceErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Upstream => "upstream",
            Self::Decode => "decode",
        }
    }
}
