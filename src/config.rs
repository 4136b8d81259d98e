//! Process-wide configuration
//!
//! Built once at startup from the environment and handed to the relay and
//! the inference client. Nothing reads the environment after that.

use std::path::PathBuf;
use std::time::Duration;

/// Upstream used when `HF_SPACE_URL` is not set
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://huggingface.co/spaces/sanaX3065/SmolLM2-360M-Instruct_QA_demo_dataset/api/predict/";

/// Model endpoint the chat front-end talks to when `CHAT_ENDPOINT` is not set
pub const DEFAULT_CHAT_ENDPOINT: &str =
    "https://sanax3065-smollm2-360m-instruct-qa-demo-dataset.hf.space/api/generate";

pub const DEFAULT_LISTEN_PORT: u16 = 3001;

/// Load `.env` from the working directory or one of its parents.
///
/// Variables already set in the process environment win over the file.
/// Returns the file that was read, if one was found.
pub fn load_env_file() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

/// Relay service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub upstream_url: String,
    /// Bearer credential attached to upstream calls; `None` sends no `Authorization` header
    pub bearer_token: Option<String>,
    pub listen_port: u16,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let upstream_url = lookup("HF_SPACE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        let bearer_token = lookup("HF_TOKEN").filter(|token| !token.is_empty());

        let listen_port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_LISTEN_PORT);

        Self {
            upstream_url,
            bearer_token,
            listen_port,
        }
    }
}

/// Inference client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Model endpoint, or the relay's `/predict` route
    pub endpoint: String,
    /// Per-request timeout; `None` lets a stuck upstream keep the turn pending
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            request_timeout: None,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup("CHAT_ENDPOINT")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_ENDPOINT.to_string());

        let request_timeout = lookup("CHAT_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            endpoint,
            request_timeout,
        }
    }
}
