//! Relay service
//!
//! Stateless forwarder that keeps the upstream URL and credential on the
//! server. Upstream status and body come back unchanged; only transport
//! failures produce a locally built response.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::{Forwarded, ProxyErrorBody};

use crate::config::RelayConfig;
use axum::body::Bytes;
use reqwest::Client;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// Forwards prediction payloads to the configured upstream
pub struct Relay {
    client: Client,
    config: RelayConfig,
}

impl Relay {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// POST `body` to the upstream and hand back its answer as-is.
    ///
    /// Bytes go out and come back untouched in both directions.
    pub async fn forward(&self, body: Bytes) -> Forwarded {
        let mut request = self
            .client
            .post(&self.config.upstream_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(token) = self.config.bearer_token.as_deref().filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => return self.failed(&e),
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match response.bytes().await {
            Ok(body) => {
                tracing::debug!(status, bytes = body.len(), "Upstream responded");
                Forwarded::Upstream {
                    status,
                    content_type,
                    body,
                }
            }
            Err(e) => self.failed(&e),
        }
    }

    fn failed(&self, e: &reqwest::Error) -> Forwarded {
        tracing::error!(
            upstream = %self.config.upstream_url,
            error = %e,
            timeout = e.is_timeout(),
            connect = e.is_connect(),
            "Proxy error"
        );
        Forwarded::Failed(ProxyErrorBody::new(e.to_string()))
    }
}
