use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::resume::store::{DisabledFeedbackStore, FeedbackStore, PgFeedbackStore};

/// Builds the résumé feedback store.
///
/// With a `DATABASE_URL` this connects, bootstraps the table, and fails startup
/// if either step fails. Without one, feedback is not persisted.
pub async fn connect_feedback_store(database_url: Option<&str>) -> Result<Arc<dyn FeedbackStore>> {
    let Some(database_url) = database_url else {
        warn!("DATABASE_URL not set; résumé feedback will not be persisted");
        return Ok(Arc::new(DisabledFeedbackStore));
    };

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to DATABASE_URL")?;
    info!("PostgreSQL connection pool established");

    let store = PgFeedbackStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("Failed to create resume_feedback table")?;
    Ok(Arc::new(store))
}
