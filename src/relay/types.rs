//! Relay response types

use axum::body::Bytes;
use serde::{Deserialize, Serialize};

/// The only body the relay synthesizes itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyErrorBody {
    pub error: String,
    pub detail: String,
}

impl ProxyErrorBody {
    pub const ERROR: &'static str = "Proxy failed";

    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            error: Self::ERROR.to_string(),
            detail: detail.into(),
        }
    }
}

/// Outcome of forwarding one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Forwarded {
    /// Upstream answered; status and body bytes are passed through untouched
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: Bytes,
    },
    /// Upstream could not be reached
    Failed(ProxyErrorBody),
}

impl Forwarded {
    pub fn status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            Self::Failed(_) => 500,
        }
    }
}
