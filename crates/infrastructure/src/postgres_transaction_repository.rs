use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fintrack_application::{TransactionListQuery, TransactionRepository};
use fintrack_core::{AppError, AppResult, UserId};
use fintrack_domain::{Money, Transaction, TransactionDraft};

use crate::stored_values::{is_foreign_key_violation, parse_stored};

const TRANSACTION_COLUMNS: &str = r#"
    id,
    user_id,
    kind,
    amount_cents,
    category_id,
    description,
    occurred_on,
    idempotency_key,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed repository for income and expense transactions.
#[derive(Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_idempotency_key(
        &self,
        user_id: UserId,
        idempotency_key: Uuid,
    ) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE user_id = $1 AND idempotency_key = $2"
        ))
        .bind(user_id.as_uuid())
        .bind(idempotency_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve idempotent transaction: {error}"))
        })?;

        row.map(Transaction::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    amount_cents: i64,
    category_id: Uuid,
    description: Option<String>,
    occurred_on: NaiveDate,
    idempotency_key: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            kind: parse_stored("transaction kind", &row.kind)?,
            amount: Money::from_cents(row.amount_cents),
            category_id: row.category_id,
            description: row.description,
            occurred_on: row.occurred_on,
            idempotency_key: row.idempotency_key,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(error: sqlx::Error, action: &str) -> AppError {
    if is_foreign_key_violation(&error) {
        return AppError::Validation("category does not exist".to_owned());
    }

    AppError::Internal(format!("failed to {action} transaction: {error}"))
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn list(
        &self,
        user_id: UserId,
        query: TransactionListQuery,
    ) -> AppResult<Vec<Transaction>> {
        let (from, to) = query
            .month
            .map(|month| (Some(month.first_day()), Some(month.next_first_day())))
            .unwrap_or((None, None));

        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1
                AND ($2::DATE IS NULL OR occurred_on >= $2)
                AND ($3::DATE IS NULL OR occurred_on < $3)
                AND ($4::TEXT IS NULL OR kind = $4)
                AND ($5::UUID IS NULL OR category_id = $5)
            ORDER BY occurred_on DESC, created_at DESC, id DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(from)
        .bind(to)
        .bind(query.kind.map(|kind| kind.as_str()))
        .bind(query.category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list transactions: {error}")))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn find(&self, user_id: UserId, transaction_id: Uuid) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE user_id = $1 AND id = $2"
        ))
        .bind(user_id.as_uuid())
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find transaction: {error}")))?;

        row.map(Transaction::try_from).transpose()
    }

    async fn insert(&self, transaction: Transaction) -> AppResult<Transaction> {
        let inserted = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions (
                id,
                user_id,
                kind,
                amount_cents,
                category_id,
                description,
                occurred_on,
                idempotency_key,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id, idempotency_key) WHERE idempotency_key IS NOT NULL
            DO NOTHING
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction.id)
        .bind(transaction.user_id.as_uuid())
        .bind(transaction.kind.as_str())
        .bind(transaction.amount.cents())
        .bind(transaction.category_id)
        .bind(transaction.description.as_deref())
        .bind(transaction.occurred_on)
        .bind(transaction.idempotency_key)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "insert"))?;

        if let Some(row) = inserted {
            return Transaction::try_from(row);
        }

        // Conflict on the idempotency key: hand back the row that won.
        let Some(idempotency_key) = transaction.idempotency_key else {
            return Err(AppError::Internal(
                "transaction insert returned no row".to_owned(),
            ));
        };
        self.find_by_idempotency_key(transaction.user_id, idempotency_key)
            .await?
            .ok_or_else(|| {
                AppError::Internal("idempotent transaction vanished after conflict".to_owned())
            })
    }

    async fn update(
        &self,
        user_id: UserId,
        transaction_id: Uuid,
        draft: TransactionDraft,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            UPDATE transactions
            SET
                kind = $3,
                amount_cents = $4,
                category_id = $5,
                description = $6,
                occurred_on = $7,
                updated_at = $8
            WHERE user_id = $1 AND id = $2
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(transaction_id)
        .bind(draft.kind().as_str())
        .bind(draft.amount().cents())
        .bind(draft.category_id())
        .bind(draft.description())
        .bind(draft.occurred_on())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update"))?;

        row.map(Transaction::try_from).transpose()
    }

    async fn delete(&self, user_id: UserId, transaction_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM transactions
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(transaction_id)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete transaction: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
