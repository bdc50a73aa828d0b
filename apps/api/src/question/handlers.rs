//! Axum route handlers for the Question Generation API.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::question::generator::generate_questions;
use crate::state::AppState;

/// Fields are optional at the serde level so a missing `major` or `jobTitle`
/// gets the same 400 as a blank one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub major: Option<String>,
    #[serde(alias = "job_title")]
    pub job_title: Option<String>,
    #[serde(alias = "cover_letter")]
    pub cover_letter: Option<String>,
}

/// Serialized as `{"question": [...]}`, the key the application server reads.
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    #[serde(rename = "question")]
    pub questions: Vec<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/questions", post(handle_generate_questions))
}

/// POST /api/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QuestionRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    let (Some(major), Some(job_title)) = (
        non_blank(request.major.as_deref()),
        non_blank(request.job_title.as_deref()),
    ) else {
        return Err(AppError::Validation(
            "major and jobTitle are both required".to_string(),
        ));
    };

    let questions = generate_questions(
        state.question_llm.as_ref(),
        major,
        job_title,
        request.cover_letter.as_deref(),
    )
    .await?;

    info!(count = questions.len(), "Interview questions generated");
    Ok(Json(QuestionResponse { questions }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
