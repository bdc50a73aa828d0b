use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    pub user_id: i64,
    pub resume_content: String,
    /// Overrides the configured persona company for this request.
    #[serde(default)]
    pub company: Option<String>,
}

/// Organization whose stated values shape the third rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub company: String,
    /// `None` when the company came from the request and no values are known.
    pub values: Option<String>,
}

/// Output of the three-stage pipeline, in generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFeedback {
    pub feedback: String,
    pub rewritten_resume: String,
    pub persona_resume: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub user_id: i64,
    pub original_resume: String,
    pub feedback: String,
    pub rewritten_resume: String,
    pub persona_resume: String,
    pub company: String,
    /// Row id in `resume_feedback`; absent when persistence is disabled.
    pub feedback_id: Option<i64>,
}
