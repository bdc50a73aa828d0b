//! Axum route handlers for the Résumé Feedback API.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::resume::models::{FeedbackResponse, Persona, ResumeInput};
use crate::resume::pipeline::run_feedback_pipeline;
use crate::resume::store::FeedbackRecord;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/resume/feedback", post(handle_resume_feedback))
}

/// POST /resume/feedback
///
/// Runs the three-stage pipeline, stores the feedback, and returns every text.
pub async fn handle_resume_feedback(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ResumeInput>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if input.resume_content.trim().is_empty() {
        return Err(AppError::Validation(
            "resumeContent cannot be empty".to_string(),
        ));
    }
    info!(user_id = input.user_id, "Résumé feedback requested");

    let persona = resolve_persona(&state, input.company.as_deref());
    let result =
        run_feedback_pipeline(state.resume_llm.as_ref(), &input.resume_content, &persona).await?;

    let feedback_id = state
        .feedback_store
        .save(&FeedbackRecord {
            user_id: input.user_id,
            resume_text: input.resume_content.clone(),
            feedback_text: result.feedback.clone(),
            created_at: Utc::now(),
        })
        .await?;

    Ok(Json(FeedbackResponse {
        user_id: input.user_id,
        original_resume: input.resume_content,
        feedback: result.feedback,
        rewritten_resume: result.rewritten_resume,
        persona_resume: result.persona_resume,
        company: persona.company,
        feedback_id,
    }))
}

/// Configured values only apply to the configured company.
fn resolve_persona(state: &AppState, requested: Option<&str>) -> Persona {
    let configured = &state.persona;
    match requested.map(str::trim).filter(|c| !c.is_empty()) {
        Some(company) if company != configured.company => Persona {
            company: company.to_string(),
            values: None,
        },
        _ => Persona {
            company: configured.company.clone(),
            values: Some(configured.values.clone()),
        },
    }
}
