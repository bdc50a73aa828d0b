//! Axum route handlers for the Voice STT API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::AudioUpload;
use crate::state::AppState;
use crate::voice::audio::AudioFormat;
use crate::voice::meta::{parse_metadata, VoiceMeta};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SttResult {
    pub answer_text: String,
}

/// Provider-side upload limit for transcription.
const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

struct AudioPart {
    file_name: String,
    format: AudioFormat,
    bytes: Bytes,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        .route("/favicon.ico", get(handle_favicon))
        .route("/analyze", post(handle_transcribe))
        .layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES))
}

/// GET /health
pub async fn handle_health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// GET /favicon.ico
pub async fn handle_favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /analyze
///
/// Multipart form with a `meta` JSON string and a `file` audio upload.
/// Returns only the transcript.
pub async fn handle_transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SttResult>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut meta: Option<VoiceMeta> = None;
    let mut audio: Option<AudioPart> = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("meta") => {
                let raw = field.text().await.map_err(invalid_form)?;
                meta = Some(parse_metadata(&raw)?);
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_owned)
                    .filter(|n| !n.trim().is_empty())
                    .ok_or_else(|| AppError::Validation("file missing".to_string()))?;
                // Reject before reading the body
                let format = AudioFormat::from_file_name(&file_name)?;
                let bytes = field.bytes().await.map_err(invalid_form)?;
                audio = Some(AudioPart {
                    file_name,
                    format,
                    bytes,
                });
            }
            _ => {}
        }
    }

    let meta = meta.ok_or_else(|| AppError::Validation("meta missing".to_string()))?;
    let audio = audio.ok_or_else(|| AppError::Validation("file missing".to_string()))?;
    if audio.bytes.is_empty() {
        return Err(AppError::Validation("file is empty".to_string()));
    }

    info!(
        interview_id = ?meta.interview_id(),
        question_id = ?meta.question_id(),
        user_id = ?meta.user_id(),
        file = %audio.file_name,
        bytes = audio.bytes.len(),
        "Transcription request received"
    );

    let answer_text = state
        .transcriber
        .transcribe(AudioUpload {
            file_name: audio.file_name,
            mime_type: audio.format.mime_type(),
            bytes: audio.bytes,
            language: state.voice_language.clone(),
        })
        .await?;

    Ok(Json(SttResult { answer_text }))
}

fn invalid_form(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!(
            "audio upload exceeds {} MiB",
            MAX_AUDIO_BYTES / (1024 * 1024)
        ));
    }
    AppError::Validation(format!("invalid multipart body: {err}"))
}
