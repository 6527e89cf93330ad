use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fintrack_application::{AuditLogPredicate, AuditLogRepository};
use fintrack_core::{AppError, AppResult, UserId};
use fintrack_domain::AuditLogEntry;

use crate::stored_values::parse_stored;

/// PostgreSQL-backed repository for trigger-written audit entries.
#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: Uuid,
    user_id: Uuid,
    entity_type: String,
    entity_id: Uuid,
    action: String,
    old_data: Option<Value>,
    new_data: Option<Value>,
    performed_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLogEntry {
    type Error = AppError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            entity_type: parse_stored("audit entity type", &row.entity_type)?,
            entity_id: row.entity_id,
            action: parse_stored("audit action", &row.action)?,
            old_data: row.old_data,
            new_data: row.new_data,
            performed_at: row.performed_at,
        })
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn list_entries(
        &self,
        predicate: &AuditLogPredicate,
        fetch: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let filter = &predicate.filter;
        let fetch = i64::try_from(fetch).unwrap_or(i64::MAX);

        // The row comparison is the keyset continuation as one clause.
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT
                id,
                user_id,
                entity_type,
                entity_id,
                action,
                old_data,
                new_data,
                performed_at
            FROM audit_log_entries
            WHERE user_id = $1
                AND ($2::TEXT IS NULL OR entity_type = $2)
                AND ($3::UUID IS NULL OR entity_id = $3)
                AND ($4::TEXT IS NULL OR action = $4)
                AND ($5::TIMESTAMPTZ IS NULL OR performed_at >= $5)
                AND ($6::TIMESTAMPTZ IS NULL OR performed_at <= $6)
                AND ($7::TIMESTAMPTZ IS NULL OR (performed_at, id) < ($7, $8::UUID))
            ORDER BY performed_at DESC, id DESC
            LIMIT $9
            "#,
        )
        .bind(predicate.owner.as_uuid())
        .bind(filter.entity_type().map(|entity_type| entity_type.as_str()))
        .bind(filter.entity_id())
        .bind(filter.action().map(|action| action.as_str()))
        .bind(filter.from_date())
        .bind(filter.to_date())
        .bind(predicate.after.map(|cursor| cursor.performed_at))
        .bind(predicate.after.map(|cursor| cursor.id))
        .bind(fetch)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list audit log entries: {error}"))
        })?;

        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }
}

#[cfg(test)]
mod tests;
