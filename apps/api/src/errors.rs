use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::models::RequestMeta;
use crate::llm_client::GatewayError;

/// Application-level error taxonomy.
///
/// Client mistakes (bad uploads, unreadable PDFs) map to 4xx; upstream AI
/// failures map to 5xx so callers can tell whose fault a failure was.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    #[error("Request to the AI API timed out after 30 seconds")]
    UpstreamTimeout,

    #[error("AI API unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("AI API request failed: {0}")]
    Upstream(String),

    #[error("AI reply did not contain the expected JSON object: {0}")]
    MalformedAiResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::Extraction(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedAiResponse(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Timeout => AppError::UpstreamTimeout,
            GatewayError::Unavailable(msg) => AppError::UpstreamUnavailable(msg),
            GatewayError::Transport(msg) => AppError::Upstream(msg),
            GatewayError::EmptyCompletion => {
                AppError::Upstream("upstream returned an empty completion".to_string())
            }
        }
    }
}

/// A pipeline failure bound to its request's correlation metadata.
/// Implements `IntoResponse` so the analyze handler can return
/// `Result<T, RequestError>` and still emit the full error envelope.
#[derive(Debug)]
pub struct RequestError {
    meta: RequestMeta,
    error: AppError,
}

impl RequestError {
    pub fn new(meta: RequestMeta, error: AppError) -> Self {
        Self { meta, error }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        if status.is_server_error() {
            tracing::error!(request_id = %self.meta.request_id, "{}", self.error);
        } else {
            tracing::warn!(request_id = %self.meta.request_id, "{}", self.error);
        }

        let body = Json(json!({
            "success": false,
            "error": self.error.to_string(),
            "request_id": self.meta.request_id,
            "timestamp": self.meta.timestamp,
        }));

        (status, body).into_response()
    }
}
