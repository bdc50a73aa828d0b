//! Axum route handlers for the Interview Analysis API.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::interview::analyzer::{analyze_answer, training_example};
use crate::interview::models::{AnswerAnalysisResult, AnswerDispatch, TrainingExample};
use crate::interview::validation::parse_analysis_value;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrainingExampleRequest {
    pub dispatch: AnswerDispatch,
    /// Checked with the same rules as provider output.
    pub analysis: Value,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analysis/interview/run", post(handle_analyze))
        .route(
            "/analysis/interview/training-example",
            post(handle_training_example),
        )
}

/// POST /analysis/interview/run
///
/// Scores one dispatched answer and returns the validated analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiJson(dispatch): ApiJson<AnswerDispatch>,
) -> Result<Json<AnswerAnalysisResult>, AppError> {
    validate_dispatch(&dispatch)?;
    info!(
        answer_id = dispatch.answer_id,
        session_id = dispatch.meta.id,
        user_id = dispatch.meta.user_id,
        "Analysis request received"
    );

    let analysis = analyze_answer(state.interview_llm.as_ref(), &dispatch).await?;
    Ok(Json(analysis))
}

/// POST /analysis/interview/training-example
///
/// Builds a fine-tuning record from a dispatch and a reviewed analysis.
/// No provider call.
pub async fn handle_training_example(
    ApiJson(request): ApiJson<TrainingExampleRequest>,
) -> Result<Json<TrainingExample>, AppError> {
    validate_dispatch(&request.dispatch)?;
    let analysis = parse_analysis_value(request.analysis)
        .map_err(|e| AppError::Validation(format!("analysis: {e}")))?;
    Ok(Json(training_example(&request.dispatch, &analysis)?))
}

fn validate_dispatch(dispatch: &AnswerDispatch) -> Result<(), AppError> {
    for (field, value) in [
        ("questionText", &dispatch.question_text),
        ("transcript", &dispatch.transcript),
        ("meta.jobApplied", &dispatch.meta.job_applied),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    Ok(())
}
