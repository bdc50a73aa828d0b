use serde_json::{Map, Value};

use crate::errors::AppError;

/// Caller-supplied metadata sent alongside an audio upload.
///
/// Any JSON object is accepted. `interviewId`, `questionId` and `userId` are
/// read for log correlation only and may be absent, numeric, or strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceMeta(Map<String, Value>);

impl VoiceMeta {
    pub fn interview_id(&self) -> Option<&Value> {
        self.get("interviewId")
    }

    pub fn question_id(&self) -> Option<&Value> {
        self.get("questionId")
    }

    pub fn user_id(&self) -> Option<&Value> {
        self.get("userId")
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }
}

pub fn parse_metadata(raw: &str) -> Result<VoiceMeta, AppError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| AppError::MalformedMetadata(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(VoiceMeta(map)),
        other => Err(AppError::MalformedMetadata(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
