//! Interview analysis pipeline.
//!
//! Flow: build prompt → one completion call (JSON mode, temperature 0) →
//!       validation boundary → `AnswerAnalysisResult`.

use tracing::info;

use crate::errors::AppError;
use crate::interview::models::{AnswerAnalysisResult, AnswerDispatch, TrainingExample};
use crate::interview::prompts::{analysis_system_prompt, analysis_user_prompt};
use crate::interview::validation::parse_analysis;
use crate::llm_client::{ChatCompletion, ChatMessage, ChatRequest, ResponseFormat};

const ANALYSIS_TEMPERATURE: f32 = 0.0;

pub fn analysis_messages(dispatch: &AnswerDispatch) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(analysis_system_prompt(dispatch)),
        ChatMessage::user(analysis_user_prompt(dispatch)),
    ]
}

pub fn build_analysis_request(dispatch: &AnswerDispatch) -> ChatRequest {
    ChatRequest {
        messages: analysis_messages(dispatch),
        temperature: ANALYSIS_TEMPERATURE,
        response_format: Some(ResponseFormat::JsonObject),
    }
}

/// Scores one answer. Any provider failure or invalid output is returned as
/// an error; there is no fallback result.
pub async fn analyze_answer(
    llm: &dyn ChatCompletion,
    dispatch: &AnswerDispatch,
) -> Result<AnswerAnalysisResult, AppError> {
    let request = build_analysis_request(dispatch);
    let raw = llm.complete(&request).await?;
    let analysis = parse_analysis(&raw)?;

    info!(
        answer_id = dispatch.answer_id,
        session_id = dispatch.meta.id,
        score = analysis.score,
        "Answer analysed"
    );
    Ok(analysis)
}

/// Pairs the analysis prompt with a known-good result, in the chat format
/// used for fine-tuning the analysis model.
pub fn training_example(
    dispatch: &AnswerDispatch,
    analysis: &AnswerAnalysisResult,
) -> Result<TrainingExample, AppError> {
    let expected = serde_json::to_string(analysis).map_err(anyhow::Error::from)?;
    let mut messages = analysis_messages(dispatch);
    messages.push(ChatMessage::assistant(expected));
    Ok(TrainingExample { messages })
}
