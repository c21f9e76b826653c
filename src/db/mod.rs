pub mod migrate;
pub mod operations;

use std::time::{Duration, Instant};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Thin wrapper around the single PostgreSQL pool. Opened once per process
/// and shared across requests; each request touches only the calling user's
/// rows, so no cross-request coordination is needed.
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, DbInitError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        let started = Instant::now();
        sqlx::query("SELECT 1").execute(&pool).await?;
        tracing::info!(
            latency_ms = started.elapsed().as_millis() as u64,
            "database connection verified"
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
