mod config;
mod db;
mod errors;
mod extract;
mod interview;
mod llm_client;
mod question;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod voice;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::connect_feedback_store;
use crate::llm_client::{chat_provider, transcription_provider};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerPass AI API v{}", env!("CARGO_PKG_VERSION"));

    // One provider per handler; missing settings yield an always-failing stub
    let interview_llm = chat_provider("interview analysis", &config.api_base, &config.interview);
    let question_llm = chat_provider("question generation", &config.api_base, &config.question);
    let resume_llm = chat_provider("résumé feedback", &config.api_base, &config.resume);
    let transcriber =
        transcription_provider("voice transcription", &config.api_base, &config.voice);

    let feedback_store = connect_feedback_store(config.database_url.as_deref()).await?;

    let state = AppState {
        interview_llm,
        question_llm,
        resume_llm,
        transcriber,
        feedback_store,
        persona: config.persona.clone(),
        voice_language: config.voice_language.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr();
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
