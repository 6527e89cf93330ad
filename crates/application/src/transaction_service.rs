use std::sync::Arc;

use chrono::Utc;
use fintrack_core::{AppError, AppResult, UserIdentity};
use fintrack_domain::{Transaction, TransactionDraft};
use tracing::debug;
use uuid::Uuid;

use crate::finance_ports::{
    CategoryRepository, CreateTransactionInput, TransactionListQuery, TransactionRepository,
    UpdateTransactionInput,
};

/// Application service for income and expense transactions.
#[derive(Clone)]
pub struct TransactionService {
    repository: Arc<dyn TransactionRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl TransactionService {
    /// Creates a new transaction service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            repository,
            category_repository,
        }
    }

    /// Lists the actor's transactions.
    pub async fn list_transactions(
        &self,
        actor: &UserIdentity,
        query: TransactionListQuery,
    ) -> AppResult<Vec<Transaction>> {
        self.repository.list(actor.user_id(), query).await
    }

    /// Returns one of the actor's transactions.
    pub async fn get_transaction(
        &self,
        actor: &UserIdentity,
        transaction_id: Uuid,
    ) -> AppResult<Transaction> {
        self.repository
            .find(actor.user_id(), transaction_id)
            .await?
            .ok_or_else(|| not_found(transaction_id))
    }

    /// Records a transaction.
    ///
    /// Resubmitting with the same idempotency key returns the transaction
    /// stored by the first submission.
    pub async fn create_transaction(
        &self,
        actor: &UserIdentity,
        input: CreateTransactionInput,
    ) -> AppResult<Transaction> {
        let draft = TransactionDraft::new(
            input.kind,
            input.amount_cents,
            input.category_id,
            input.description,
            input.occurred_on,
        )?;
        self.ensure_category(actor, &draft).await?;

        let now = Utc::now();
        let transaction_id = Uuid::new_v4();
        let stored = self
            .repository
            .insert(Transaction {
                id: transaction_id,
                user_id: actor.user_id(),
                kind: draft.kind(),
                amount: draft.amount(),
                category_id: draft.category_id(),
                description: draft.description().map(str::to_owned),
                occurred_on: draft.occurred_on(),
                idempotency_key: input.idempotency_key,
                created_at: now,
                updated_at: now,
            })
            .await?;

        if stored.id != transaction_id {
            debug!(transaction_id = %stored.id, "idempotent replay returned existing transaction");
        }

        Ok(stored)
    }

    /// Replaces the editable fields of a transaction.
    pub async fn update_transaction(
        &self,
        actor: &UserIdentity,
        transaction_id: Uuid,
        input: UpdateTransactionInput,
    ) -> AppResult<Transaction> {
        let draft = TransactionDraft::new(
            input.kind,
            input.amount_cents,
            input.category_id,
            input.description,
            input.occurred_on,
        )?;
        self.ensure_category(actor, &draft).await?;

        self.repository
            .update(actor.user_id(), transaction_id, draft, Utc::now())
            .await?
            .ok_or_else(|| not_found(transaction_id))
    }

    /// Deletes a transaction.
    pub async fn delete_transaction(
        &self,
        actor: &UserIdentity,
        transaction_id: Uuid,
    ) -> AppResult<()> {
        if self
            .repository
            .delete(actor.user_id(), transaction_id)
            .await?
        {
            Ok(())
        } else {
            Err(not_found(transaction_id))
        }
    }

    async fn ensure_category(&self, actor: &UserIdentity, draft: &TransactionDraft) -> AppResult<()> {
        let category = self
            .category_repository
            .find_visible(actor.user_id(), draft.category_id())
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "category '{}' does not exist",
                    draft.category_id()
                ))
            })?;

        draft.ensure_category(actor.user_id(), &category)
    }
}

fn not_found(transaction_id: Uuid) -> AppError {
    AppError::NotFound(format!("transaction '{transaction_id}' not found"))
}
