use serde::{Deserialize, Serialize};

/// Session-level context of the interview an answer belongs to.
/// Carried through for logging and the prompt only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewMeta {
    pub id: i64,
    pub user_id: i64,
    pub job_applied: String,
    pub question_id: i64,
}

/// One interview answer awaiting analysis, as dispatched by the upstream server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDispatch {
    pub answer_id: i64,
    pub question_text: String,
    /// Speech-to-text result of the recorded answer.
    pub transcript: String,
    pub resume_content: String,
    /// Recorded answer length; older upstream builds omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub meta: InterviewMeta,
}

/// Validated evaluation of one answer.
///
/// Only ever constructed by `validation::parse_analysis*`, so every instance
/// has its bounded fields inside their declared ranges:
/// `score` in 0..=100, the three ratings in 1..=5.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerAnalysisResult {
    pub score: u32,
    pub time_ms: u64,
    pub fluency: u8,
    pub content_depth: u8,
    pub structure: u8,
    pub filler_count: u32,
    pub improvements: Vec<String>,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
}

/// Chat-format fine-tuning record: system + user prompt, assistant = expected JSON.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingExample {
    pub messages: Vec<crate::llm_client::ChatMessage>,
}
