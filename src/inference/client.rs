//! HTTP implementation of the inference client

use super::types::{response_result, result_text, PredictionRequest};
use super::{InferenceClient, InferenceError};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::Client;

/// Talks to the model endpoint directly or through the relay
pub struct HttpInferenceClient {
    client: Client,
    endpoint: String,
}

impl HttpInferenceClient {
    pub fn new(config: &ClientConfig) -> Result<Self, InferenceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(InferenceError::upstream(status.as_u16(), body));
        }

        let parsed: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            InferenceError::decode(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        let result = response_result(parsed)
            .ok_or_else(|| InferenceError::decode("Response body was null"))?;

        Ok(result_text(&result))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
