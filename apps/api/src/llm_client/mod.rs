/// LLM Client — the single point of entry for all provider calls in the service.
///
/// Handlers never talk to the provider directly. They hold an
/// `Arc<dyn ChatCompletion>` or `Arc<dyn Transcription>` built here, one per
/// handler, each with its own credential and model.
///
/// Every logical call maps to exactly one HTTP request: no retry, no backoff.
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ProviderConfig;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Provider returned empty content")]
    EmptyContent,

    #[error("{service} is not configured: {missing} is not set")]
    Unconfigured {
        service: &'static str,
        missing: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Requested output format. Serializes as `{"type": "json_object"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
}

/// A provider-agnostic chat completion request. The model id is supplied by
/// the client that sends it, so prompt construction stays independent of
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub response_format: Option<ResponseFormat>,
}

/// An audio payload ready to be forwarded to a speech-to-text provider.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Bytes,
    pub language: String,
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends one completion request and returns the raw text of the first choice.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

#[async_trait]
pub trait Transcription: Send + Sync {
    /// Sends one audio file and returns the transcript text.
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiTranscription {
    text: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible API, bound to one credential and one model.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_base: impl Into<String>, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn read_success(&self, response: reqwest::Response) -> Result<String, LlmError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the provider's own message when the body is its error envelope
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Provider returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let body = OpenAiChatRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            response_format: request.response_format,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let text = self.read_success(response).await?;
        let parsed: OpenAiChatResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Completion succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                self.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl Transcription for OpenAiClient {
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, LlmError> {
        let size = audio.bytes.len();
        let file = multipart::Part::stream_with_length(audio.bytes, size as u64)
            .file_name(audio.file_name)
            .mime_str(audio.mime_type)?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", audio.language)
            .text("response_format", "json")
            .part("file", file);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.api_base))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let text = self.read_success(response).await?;
        let parsed: OpenAiTranscription = serde_json::from_str(&text)?;
        debug!(
            "Transcription succeeded: model={}, bytes={size}",
            self.model
        );

        if parsed.text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(parsed.text)
    }
}

/// Stand-in for a handler whose credential or model is missing.
/// Fails every call the same way, before anything touches the network.
#[derive(Debug, Clone, Copy)]
pub struct UnconfiguredProvider {
    pub service: &'static str,
    pub missing: &'static str,
}

impl UnconfiguredProvider {
    fn error(&self) -> LlmError {
        LlmError::Unconfigured {
            service: self.service,
            missing: self.missing,
        }
    }
}

#[async_trait]
impl ChatCompletion for UnconfiguredProvider {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, LlmError> {
        Err(self.error())
    }
}

#[async_trait]
impl Transcription for UnconfiguredProvider {
    async fn transcribe(&self, _audio: AudioUpload) -> Result<String, LlmError> {
        Err(self.error())
    }
}

/// Validates one handler's provider settings, yielding either a live client or
/// the variable that is missing.
pub fn resolve(
    service: &'static str,
    api_base: &str,
    settings: &ProviderConfig,
) -> Result<OpenAiClient, UnconfiguredProvider> {
    let unconfigured = |missing| UnconfiguredProvider { service, missing };
    let api_key = settings
        .api_key
        .clone()
        .ok_or_else(|| unconfigured(settings.key_var))?;
    let model = settings
        .model
        .clone()
        .ok_or_else(|| unconfigured(settings.model_var))?;
    Ok(OpenAiClient::new(api_base, api_key, model))
}

pub fn chat_provider(
    service: &'static str,
    api_base: &str,
    settings: &ProviderConfig,
) -> Arc<dyn ChatCompletion> {
    match resolve(service, api_base, settings) {
        Ok(client) => {
            tracing::info!("{service}: using model {}", client.model());
            Arc::new(client)
        }
        Err(stub) => {
            warn!("{service} disabled: {} is not set", stub.missing);
            Arc::new(stub)
        }
    }
}

pub fn transcription_provider(
    service: &'static str,
    api_base: &str,
    settings: &ProviderConfig,
) -> Arc<dyn Transcription> {
    match resolve(service, api_base, settings) {
        Ok(client) => {
            tracing::info!("{service}: using model {}", client.model());
            Arc::new(client)
        }
        Err(stub) => {
            warn!("{service} disabled: {} is not set", stub.missing);
            Arc::new(stub)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>, model: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            key_var: "RESUME_OPENAI_KEY",
            api_key: api_key.map(String::from),
            model_var: "RESUME_MODEL_ID",
            model: model.map(String::from),
        }
    }

    #[test]
    fn test_chat_request_body_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = OpenAiChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            temperature: 0.0,
            response_format: Some(ResponseFormat::JsonObject),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_chat_request_omits_absent_response_format() {
        let body = OpenAiChatRequest {
            model: "gpt-3.5-turbo",
            messages: &[],
            temperature: 0.7,
            response_format: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn test_resolve_reports_missing_key_first() {
        let err = resolve("résumé feedback", "http://localhost", &settings(None, None))
            .err()
            .unwrap();
        assert_eq!(err.missing, "RESUME_OPENAI_KEY");
    }

    #[test]
    fn test_resolve_reports_missing_model() {
        let err = resolve(
            "résumé feedback",
            "http://localhost",
            &settings(Some("sk"), None),
        )
        .err()
        .unwrap();
        assert_eq!(err.missing, "RESUME_MODEL_ID");
    }

    #[test]
    fn test_resolve_builds_client() {
        let client = resolve(
            "résumé feedback",
            "http://localhost",
            &settings(Some("sk"), Some("gpt-4o-mini")),
        )
        .unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_transcribe_sends_audio_as_multipart() {
        use axum::{extract::Multipart, routing::post, Json, Router};
        use serde_json::{json, Map, Value};

        // Echoes the received form back as the transcript
        async fn echo_form(mut form: Multipart) -> Json<Value> {
            let mut seen = Map::new();
            while let Some(field) = form.next_field().await.unwrap() {
                let name = field.name().unwrap().to_string();
                if name == "file" {
                    let file_name = field.file_name().unwrap().to_string();
                    let mime = field.content_type().unwrap().to_string();
                    let bytes = field.bytes().await.unwrap();
                    seen.insert(
                        name,
                        json!({ "name": file_name, "mime": mime, "body": bytes.to_vec() }),
                    );
                } else {
                    seen.insert(name, json!(field.text().await.unwrap()));
                }
            }
            Json(json!({ "text": Value::Object(seen).to_string() }))
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/audio/transcriptions", post(echo_form));
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let client = OpenAiClient::new(
            format!("http://{addr}"),
            "sk-test".to_string(),
            "gpt-4o-mini-transcribe".to_string(),
        );
        let audio = Bytes::from_static(b"RIFF\x24\x00\x00\x00WAVEfmt ");
        let text = client
            .transcribe(AudioUpload {
                file_name: "answer.wav".to_string(),
                mime_type: "audio/wav",
                bytes: audio.clone(),
                language: "ko".to_string(),
            })
            .await
            .unwrap();

        let form: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(form["model"], "gpt-4o-mini-transcribe");
        assert_eq!(form["language"], "ko");
        assert_eq!(form["file"]["name"], "answer.wav");
        assert_eq!(form["file"]["mime"], "audio/wav");
        assert_eq!(form["file"]["body"], json!(audio.to_vec()));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_always_fails() {
        let stub = UnconfiguredProvider {
            service: "question generation",
            missing: "QUESTION_VOICE_OPENAI_KEY",
        };
        let request = ChatRequest {
            messages: vec![ChatMessage::user("hello")],
            temperature: 0.7,
            response_format: None,
        };
        let err = stub.complete(&request).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::Unconfigured {
                missing: "QUESTION_VOICE_OPENAI_KEY",
                ..
            }
        ));
    }
}
