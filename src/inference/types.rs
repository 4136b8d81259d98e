//! Wire and result types for the inference endpoint

use serde::Serialize;
use serde_json::Value;

/// Request body sent to the model endpoint
///
/// The backend contract keeps `query` empty and carries the user's message in
/// `context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub query: String,
    pub context: String,
}

impl PredictionRequest {
    pub fn for_message(user_text: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            context: user_text.into(),
        }
    }
}

/// Settled outcome of one inference call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionResult {
    Success { text: String },
    Failure { detail: String },
}

impl PredictionResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self::Failure {
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Pull `result` out of a successful response body.
///
/// Only an object can carry the field; any other JSON value yields null, so
/// the reply renders empty. A bare `null` body has nothing to read and is
/// rejected.
pub(super) fn response_result(body: Value) -> Option<Value> {
    match body {
        Value::Object(mut fields) => Some(fields.remove("result").unwrap_or(Value::Null)),
        Value::Null => None,
        _ => Some(Value::Null),
    }
}

/// Normalize the `result` field into display text.
///
/// A sequence is joined with single spaces; null or missing yields an empty
/// string; other scalars use their plain text form.
pub fn result_text(result: &Value) -> String {
    match result {
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(" "),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
