//! Inference client
//!
//! Turns a user message into a prediction request and normalizes whatever
//! comes back into a `PredictionResult`. Failures never escape as errors.

mod client;
mod error;
mod types;

pub use client::HttpInferenceClient;
pub use error::{InferenceError, InferenceErrorKind};
pub use types::{result_text, PredictionRequest, PredictionResult};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Common interface for reaching the model endpoint
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send one request and extract the reply text
    async fn predict(&self, request: &PredictionRequest) -> Result<String, InferenceError>;

    /// Where requests are sent
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: InferenceClient + ?Sized> InferenceClient for Arc<T> {
    async fn predict(&self, request: &PredictionRequest) -> Result<String, InferenceError> {
        (**self).predict(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Build the request for `user_text` and settle it
pub async fn query<C: InferenceClient + ?Sized>(client: &C, user_text: &str) -> PredictionResult {
    settle(client, &PredictionRequest::for_message(user_text)).await
}

/// Run `request` to completion, logging and folding any error into a failure result
pub async fn settle<C: InferenceClient + ?Sized>(
    client: &C,
    request: &PredictionRequest,
) -> PredictionResult {
    let start = Instant::now();
    let result = client.predict(request).await;
    let duration = start.elapsed();

    match result {
        Ok(text) => {
            tracing::info!(
                endpoint = %client.endpoint(),
                duration_ms = %duration.as_millis(),
                chars = text.chars().count(),
                "Inference request completed"
            );
            PredictionResult::Success { text }
        }
        Err(e) => {
            tracing::error!(
                endpoint = %client.endpoint(),
                duration_ms = %duration.as_millis(),
                kind = e.kind.as_str(),
                status = ?e.status,
                error = %e.message,
                "Inference request failed"
            );
            PredictionResult::Failure { detail: e.message }
        }
    }
}
