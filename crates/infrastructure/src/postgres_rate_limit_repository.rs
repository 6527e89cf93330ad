//! PostgreSQL-backed rate limit repository using the append-only
//! `rate_limit_attempts` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fintrack_application::RateLimitRepository;
use fintrack_core::{AppError, AppResult};
use fintrack_domain::{RateLimitScope, WindowBounds};

/// PostgreSQL implementation of the rate limit repository port.
#[derive(Clone)]
pub struct PostgresRateLimitRepository {
    pool: PgPool,
}

impl PostgresRateLimitRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateLimitRepository for PostgresRateLimitRepository {
    async fn count_attempts(
        &self,
        subject: &str,
        scope: RateLimitScope,
        window: WindowBounds,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM rate_limit_attempts
            WHERE subject = $1
                AND scope = $2
                AND attempted_at >= $3
                AND attempted_at < $4
            "#,
        )
        .bind(subject)
        .bind(scope.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count rate limit attempts: {error}")))
    }

    async fn record_attempt(
        &self,
        subject: &str,
        scope: RateLimitScope,
        attempted_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rate_limit_attempts (subject, scope, attempted_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(subject)
        .bind(scope.as_str())
        .bind(attempted_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to record rate limit attempt: {error}"))
        })?;

        Ok(())
    }
}
