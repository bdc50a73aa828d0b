//! Persistence of résumé feedback.
//!
//! `AppState` holds an `Arc<dyn FeedbackStore>`: Postgres when `DATABASE_URL`
//! is set, otherwise a disabled store that records nothing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS resume_feedback (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL,
    resume_text TEXT,
    feedback_text TEXT,
    created_at TIMESTAMPTZ NOT NULL
)";

const INSERT_FEEDBACK: &str = "INSERT INTO resume_feedback (user_id, resume_text, feedback_text, created_at) \
    VALUES ($1, $2, $3, $4) RETURNING id";

#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub user_id: i64,
    pub resume_text: String,
    pub feedback_text: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Stores one record, returning its id, or `None` if the store is disabled.
    async fn save(&self, record: &FeedbackRecord) -> Result<Option<i64>, sqlx::Error>;
}

pub struct PgFeedbackStore {
    pool: PgPool,
}

impl PgFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `resume_feedback` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("resume_feedback table ready");
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn save(&self, record: &FeedbackRecord) -> Result<Option<i64>, sqlx::Error> {
        let id: i64 = sqlx::query_scalar(INSERT_FEEDBACK)
            .bind(record.user_id)
            .bind(&record.resume_text)
            .bind(&record.feedback_text)
            .bind(record.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(Some(id))
    }
}

pub struct DisabledFeedbackStore;

#[async_trait]
impl FeedbackStore for DisabledFeedbackStore {
    async fn save(&self, _record: &FeedbackRecord) -> Result<Option<i64>, sqlx::Error> {
        Ok(None)
    }
}
