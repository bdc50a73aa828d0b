//! Recording stubs and request helpers shared by the handler tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::PersonaConfig;
use crate::llm_client::{
    AudioUpload, ChatCompletion, ChatRequest, LlmError, Transcription, UnconfiguredProvider,
};
use crate::resume::store::{DisabledFeedbackStore, FeedbackRecord, FeedbackStore};
use crate::routes::build_router;
use crate::state::AppState;

/// Chat provider that replays scripted replies in order and records every
/// request. Once the script runs out each call fails with an API error.
#[derive(Clone, Default)]
pub struct StubChat {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl StubChat {
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Into::into).collect())),
            requests: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatCompletion for StubChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::Api {
                status: 500,
                message: "stub script exhausted".to_string(),
            })
    }
}

#[derive(Clone)]
pub struct StubTranscriber {
    reply: String,
    uploads: Arc<Mutex<Vec<AudioUpload>>>,
}

impl StubTranscriber {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            uploads: Arc::default(),
        }
    }

    pub fn uploads(&self) -> Vec<AudioUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcription for StubTranscriber {
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, LlmError> {
        self.uploads.lock().unwrap().push(audio);
        Ok(self.reply.clone())
    }
}

/// In-memory feedback store handing out sequential ids from 1.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<FeedbackRecord>>>,
    fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<FeedbackRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn save(&self, record: &FeedbackRecord) -> Result<Option<i64>, sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolClosed);
        }
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(Some(records.len() as i64))
    }
}

/// Builder for an `AppState` where every handler starts unconfigured.
pub struct TestState(AppState);

impl TestState {
    pub fn new() -> Self {
        let unconfigured = |service: &'static str, missing: &'static str| {
            Arc::new(UnconfiguredProvider { service, missing })
        };
        Self(AppState {
            interview_llm: unconfigured("interview analysis", "INTERVIEW_OPENAI_KEY"),
            question_llm: unconfigured("question generation", "QUESTION_VOICE_OPENAI_KEY"),
            resume_llm: unconfigured("résumé feedback", "RESUME_OPENAI_KEY"),
            transcriber: unconfigured("voice transcription", "QUESTION_VOICE_OPENAI_KEY"),
            feedback_store: Arc::new(DisabledFeedbackStore),
            persona: PersonaConfig {
                company: "CareerPass".to_string(),
                values: "Growth mindset and candid feedback.".to_string(),
            },
            voice_language: "ko".to_string(),
        })
    }

    pub fn interview(mut self, llm: impl ChatCompletion + 'static) -> Self {
        self.0.interview_llm = Arc::new(llm);
        self
    }

    pub fn question(mut self, llm: impl ChatCompletion + 'static) -> Self {
        self.0.question_llm = Arc::new(llm);
        self
    }

    pub fn resume(mut self, llm: impl ChatCompletion + 'static) -> Self {
        self.0.resume_llm = Arc::new(llm);
        self
    }

    pub fn transcriber(mut self, stt: impl Transcription + 'static) -> Self {
        self.0.transcriber = Arc::new(stt);
        self
    }

    pub fn store(mut self, store: impl FeedbackStore + 'static) -> Self {
        self.0.feedback_store = Arc::new(store);
        self
    }

    pub fn router(self) -> Router {
        build_router(self.0)
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(app, request).await
}

/// Posts a `multipart/form-data` body with optional `meta` and `file` parts.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    meta: Option<&str>,
    file: Option<(&str, &[u8])>,
) -> (StatusCode, Value) {
    const BOUNDARY: &str = "careerpass-test-boundary";
    let mut body: Vec<u8> = Vec::new();

    if let Some(meta) = meta {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"meta\"\r\n\r\n{meta}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}
