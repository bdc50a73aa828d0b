pub mod health;

use axum::{routing::get, Router};

use crate::state::AppState;
use crate::{interview, question, resume, voice};

/// Mounts each handler surface under its prefix. The surfaces share nothing
/// but `AppState`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/interview", interview::handlers::router())
        .nest("/question", question::handlers::router())
        .nest("/resume", resume::handlers::router())
        .nest("/voice", voice::handlers::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{get_json, TestState};

    #[tokio::test]
    async fn test_root_health() {
        let (status, body) = get_json(TestState::new().router(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "careerpass-api");
    }
}
