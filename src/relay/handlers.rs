//! HTTP request handlers

use super::types::Forwarded;
use super::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::de::IgnoredAny;

/// Create the relay router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .with_state(state)
}

async fn predict(State(state): State<AppState>, body: Bytes) -> Response {
    // Checked for well-formedness only; the original bytes are what gets sent
    if let Err(e) = serde_json::from_slice::<IgnoredAny>(&body) {
        tracing::debug!(error = %e, "Rejecting malformed request body");
        return (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {e}")).into_response();
    }

    match state.relay.forward(body).await {
        Forwarded::Upstream {
            status,
            content_type,
            body,
        } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            match content_type {
                Some(ct) => (status, [(header::CONTENT_TYPE, ct)], body).into_response(),
                None => (status, body).into_response(),
            }
        }
        Forwarded::Failed(envelope) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
        }
    }
}
