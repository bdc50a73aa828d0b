use crate::errors::AppError;
use crate::llm_client::{ChatCompletion, ChatMessage, ChatRequest, LlmError};
use crate::question::prompts::{question_prompt, QUESTION_SYSTEM};

const QUESTION_TEMPERATURE: f32 = 0.7;

pub fn build_question_request(
    major: &str,
    job_title: &str,
    cover_letter: Option<&str>,
) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system(QUESTION_SYSTEM),
            ChatMessage::user(question_prompt(major, job_title, cover_letter)),
        ],
        temperature: QUESTION_TEMPERATURE,
        response_format: None,
    }
}

/// Splits a completion into questions: one per non-blank line, trimmed, in order.
pub fn split_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub async fn generate_questions(
    llm: &dyn ChatCompletion,
    major: &str,
    job_title: &str,
    cover_letter: Option<&str>,
) -> Result<Vec<String>, AppError> {
    let request = build_question_request(major, job_title, cover_letter);
    let text = llm.complete(&request).await?;

    let questions = split_questions(&text);
    if questions.is_empty() {
        return Err(LlmError::EmptyContent.into());
    }
    Ok(questions)
}
