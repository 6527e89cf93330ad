use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::{AppResult, UserId};
use fintrack_domain::{Month, Transaction, TransactionDraft, TransactionKind};
use uuid::Uuid;

/// Input payload for transaction creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransactionInput {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount in minor units.
    pub amount_cents: i64,
    /// Category identifier.
    pub category_id: Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Calendar date the money moved.
    pub occurred_on: NaiveDate,
    /// Optional client key that makes retries safe.
    pub idempotency_key: Option<Uuid>,
}

/// Input payload for transaction updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTransactionInput {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount in minor units.
    pub amount_cents: i64,
    /// Category identifier.
    pub category_id: Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Calendar date the money moved.
    pub occurred_on: NaiveDate,
}

/// Filters for transaction listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionListQuery {
    /// Restricts results to one calendar month.
    pub month: Option<Month>,
    /// Restricts results to one kind.
    pub kind: Option<TransactionKind>,
    /// Restricts results to one category.
    pub category_id: Option<Uuid>,
}

/// Repository port for transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Lists the user's transactions, newest `occurred_on` first.
    async fn list(&self, user_id: UserId, query: TransactionListQuery)
    -> AppResult<Vec<Transaction>>;

    /// Finds one of the user's transactions.
    async fn find(&self, user_id: UserId, transaction_id: Uuid) -> AppResult<Option<Transaction>>;

    /// Inserts a transaction.
    ///
    /// When the user already has a transaction with the same idempotency key,
    /// nothing is inserted and the existing row is returned.
    async fn insert(&self, transaction: Transaction) -> AppResult<Transaction>;

    /// Replaces the editable fields of one transaction.
    async fn update(
        &self,
        user_id: UserId,
        transaction_id: Uuid,
        draft: TransactionDraft,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Transaction>>;

    /// Deletes one transaction. Returns whether a row was removed.
    async fn delete(&self, user_id: UserId, transaction_id: Uuid) -> AppResult<bool>;
}
