use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::validation::OutputError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Malformed metadata: {0}")]
    MalformedMetadata(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Provider call failed: {0}")]
    ProviderCallFailed(LlmError),

    #[error("LLM produced invalid output: {0}")]
    InvalidOutput(#[from] OutputError),

    #[error("Persistence failed: {0}")]
    PersistenceFailed(#[from] sqlx::Error),

    #[error("{service} is not configured: {missing} is not set")]
    Unconfigured {
        service: &'static str,
        missing: &'static str,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unconfigured { service, missing } => {
                AppError::Unconfigured { service, missing }
            }
            other => AppError::ProviderCallFailed(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut kind = None;
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::MalformedMetadata(msg) => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_METADATA",
                format!("invalid meta json: {msg}"),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::ProviderCallFailed(e) => {
                tracing::error!("Provider call failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_CALL_FAILED",
                    "The AI provider call failed".to_string(),
                )
            }
            AppError::InvalidOutput(e) => {
                tracing::error!("LLM output rejected: {e}");
                kind = Some(e.kind());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INVALID_LLM_OUTPUT",
                    "LLM produced invalid output".to_string(),
                )
            }
            AppError::PersistenceFailed(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_FAILED",
                    "Failed to store the feedback".to_string(),
                )
            }
            AppError::Unconfigured { service, missing } => {
                tracing::error!("{service} called while unconfigured ({missing} unset)");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UNCONFIGURED",
                    format!("{service} is not configured"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(kind) = kind {
            error["kind"] = json!(kind);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
