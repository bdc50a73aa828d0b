use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_QUESTION_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_RESUME_MODEL: &str = "gpt-4o-mini";
const DEFAULT_VOICE_MODEL: &str = "gpt-4o-mini-transcribe";
const DEFAULT_VOICE_LANGUAGE: &str = "ko";
const DEFAULT_PERSONA_COMPANY: &str = "CareerPass";
const DEFAULT_PERSONA_VALUES: &str = "Customer obsession, ownership of outcomes, \
    continuous learning, and candid collaboration across teams.";

/// Credential and model for one provider-backed handler.
///
/// Each handler reads its own variables so different handlers can run against
/// different provider accounts. A `None` in either field leaves the handler
/// unconfigured; it still mounts, but every request fails with 503.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Name of the env var holding the key, reported when it is missing.
    pub key_var: &'static str,
    pub api_key: Option<String>,
    /// Name of the env var holding the model id.
    pub model_var: &'static str,
    pub model: Option<String>,
}

/// Company persona used for the third résumé rewrite.
#[derive(Debug, Clone)]
pub struct PersonaConfig {
    pub company: String,
    pub values: String,
}

/// Application configuration loaded from environment variables.
/// Only malformed values abort startup; absent credentials are tolerated.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub api_base: String,
    pub interview: ProviderConfig,
    pub question: ProviderConfig,
    pub resume: ProviderConfig,
    pub voice: ProviderConfig,
    pub voice_language: String,
    pub persona: PersonaConfig,
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: env_or("SERVICE_HOST", "0.0.0.0"),
            port: env_or("SERVICE_PORT", "8000")
                .parse::<u16>()
                .context("SERVICE_PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            api_base: env_or("OPENAI_API_BASE", DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            interview: provider(
                "INTERVIEW_OPENAI_KEY",
                "INTERVIEW_FINEDTUNED_MODEL_ID",
                None,
            ),
            question: provider(
                "QUESTION_VOICE_OPENAI_KEY",
                "QUESTION_MODEL_ID",
                Some(DEFAULT_QUESTION_MODEL),
            ),
            resume: provider(
                "RESUME_OPENAI_KEY",
                "RESUME_MODEL_ID",
                Some(DEFAULT_RESUME_MODEL),
            ),
            voice: provider(
                "QUESTION_VOICE_OPENAI_KEY",
                "VOICE_MODEL_ID",
                Some(DEFAULT_VOICE_MODEL),
            ),
            voice_language: env_or("VOICE_LANGUAGE", DEFAULT_VOICE_LANGUAGE),
            persona: PersonaConfig {
                company: env_or("RESUME_PERSONA_COMPANY", DEFAULT_PERSONA_COMPANY),
                values: env_or("RESUME_PERSONA_VALUES", DEFAULT_PERSONA_VALUES),
            },
            database_url: optional_env("DATABASE_URL"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn provider(
    key_var: &'static str,
    model_var: &'static str,
    default_model: Option<&str>,
) -> ProviderConfig {
    ProviderConfig {
        key_var,
        api_key: optional_env(key_var),
        model_var,
        model: optional_env(model_var).or_else(|| default_model.map(String::from)),
    }
}

/// Blank values count as unset so an empty line in `.env` can't pass for a key.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
