use std::sync::Arc;

use crate::config::PersonaConfig;
use crate::llm_client::{ChatCompletion, Transcription};
use crate::resume::store::FeedbackStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each handler gets its own provider so credentials stay isolated per handler.
/// Unconfigured handlers hold an `UnconfiguredProvider` rather than an `Option`.
#[derive(Clone)]
pub struct AppState {
    pub interview_llm: Arc<dyn ChatCompletion>,
    pub question_llm: Arc<dyn ChatCompletion>,
    pub resume_llm: Arc<dyn ChatCompletion>,
    pub transcriber: Arc<dyn Transcription>,
    pub feedback_store: Arc<dyn FeedbackStore>,
    pub persona: PersonaConfig,
    pub voice_language: String,
}
