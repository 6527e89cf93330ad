//! In-process fakes for the finance repository ports.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::{AppError, AppResult, UserId};
use fintrack_domain::{
    Category, CategoryName, Goal, GoalEvent, GoalEventKind, GoalName, GoalStatus, Money,
    Transaction, TransactionDraft, TransactionKind,
};
use uuid::Uuid;

use crate::finance_ports::{
    CategoryRepository, GoalRepository, TransactionListQuery, TransactionRepository,
};

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|error| AppError::Internal(format!("failed to lock fake store: {error}")))
}

#[derive(Default)]
pub(crate) struct FakeFinanceStore {
    categories: Mutex<Vec<Category>>,
    categories_in_use: Mutex<HashSet<Uuid>>,
    transactions: Mutex<Vec<Transaction>>,
    goals: Mutex<Vec<Goal>>,
    events: Mutex<Vec<GoalEvent>>,
}

impl FakeFinanceStore {
    pub(crate) fn with_system_categories() -> Self {
        let store = Self::default();
        if let Ok(mut categories) = store.categories.lock() {
            for (name, kind) in [
                ("Salary", TransactionKind::Income),
                ("Groceries", TransactionKind::Expense),
                ("Rent", TransactionKind::Expense),
            ] {
                categories.push(Category {
                    id: Uuid::new_v4(),
                    user_id: None,
                    name: CategoryName::new(name).unwrap_or_else(|_| unreachable!()),
                    kind,
                });
            }
        }
        store
    }

    pub(crate) fn system_category_id(&self, kind: TransactionKind) -> Uuid {
        self.categories
            .lock()
            .ok()
            .and_then(|categories| {
                categories
                    .iter()
                    .find(|category| category.is_system() && category.kind == kind)
                    .map(|category| category.id)
            })
            .unwrap_or_else(Uuid::nil)
    }

    pub(crate) fn system_category_named(&self, name: &str) -> Uuid {
        self.categories
            .lock()
            .ok()
            .and_then(|categories| {
                categories
                    .iter()
                    .find(|category| category.name.as_str() == name)
                    .map(|category| category.id)
            })
            .unwrap_or_else(Uuid::nil)
    }

    pub(crate) fn mark_category_in_use(&self, category_id: Uuid) {
        if let Ok(mut in_use) = self.categories_in_use.lock() {
            in_use.insert(category_id);
        }
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.transactions
            .lock()
            .map(|transactions| transactions.len())
            .unwrap_or_default()
    }

    pub(crate) fn seed_transaction(
        &self,
        user_id: UserId,
        kind: TransactionKind,
        amount_cents: i64,
        category_id: Uuid,
        occurred_on: NaiveDate,
    ) {
        if let Ok(mut transactions) = self.transactions.lock() {
            transactions.push(Transaction {
                id: Uuid::new_v4(),
                user_id,
                kind,
                amount: Money::from_cents(amount_cents),
                category_id,
                description: None,
                occurred_on,
                idempotency_key: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
        }
    }

    pub(crate) fn seed_event(
        &self,
        user_id: UserId,
        kind: GoalEventKind,
        amount_cents: i64,
        occurred_at: DateTime<Utc>,
    ) {
        if let Ok(mut events) = self.events.lock() {
            events.push(GoalEvent {
                id: Uuid::new_v4(),
                goal_id: Uuid::new_v4(),
                user_id,
                kind,
                amount: Money::from_cents(amount_cents),
                note: None,
                occurred_at,
            });
        }
    }
}

#[async_trait]
impl CategoryRepository for FakeFinanceStore {
    async fn list_visible(
        &self,
        user_id: UserId,
        kind: Option<TransactionKind>,
    ) -> AppResult<Vec<Category>> {
        Ok(lock(&self.categories)?
            .iter()
            .filter(|category| category.is_visible_to(user_id))
            .filter(|category| kind.is_none_or(|kind| category.kind == kind))
            .cloned()
            .collect())
    }

    async fn find_visible(
        &self,
        user_id: UserId,
        category_id: Uuid,
    ) -> AppResult<Option<Category>> {
        Ok(lock(&self.categories)?
            .iter()
            .find(|category| category.id == category_id && category.is_visible_to(user_id))
            .cloned())
    }

    async fn save(&self, category: Category) -> AppResult<()> {
        lock(&self.categories)?.push(category);
        Ok(())
    }

    async fn is_in_use(&self, user_id: UserId, category_id: Uuid) -> AppResult<bool> {
        if lock(&self.categories_in_use)?.contains(&category_id) {
            return Ok(true);
        }

        Ok(lock(&self.transactions)?.iter().any(|transaction| {
            transaction.user_id == user_id && transaction.category_id == category_id
        }))
    }

    async fn delete_owned(&self, user_id: UserId, category_id: Uuid) -> AppResult<bool> {
        let mut categories = lock(&self.categories)?;
        let before = categories.len();
        categories
            .retain(|category| !(category.id == category_id && category.user_id == Some(user_id)));
        Ok(categories.len() != before)
    }
}

#[async_trait]
impl TransactionRepository for FakeFinanceStore {
    async fn list(
        &self,
        user_id: UserId,
        query: TransactionListQuery,
    ) -> AppResult<Vec<Transaction>> {
        let mut listed: Vec<Transaction> = lock(&self.transactions)?
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .filter(|transaction| {
                query
                    .month
                    .is_none_or(|month| month.contains(transaction.occurred_on))
            })
            .filter(|transaction| query.kind.is_none_or(|kind| transaction.kind == kind))
            .filter(|transaction| {
                query
                    .category_id
                    .is_none_or(|category_id| transaction.category_id == category_id)
            })
            .cloned()
            .collect();
        listed.sort_by(|left, right| right.occurred_on.cmp(&left.occurred_on));
        Ok(listed)
    }

    async fn find(&self, user_id: UserId, transaction_id: Uuid) -> AppResult<Option<Transaction>> {
        Ok(lock(&self.transactions)?
            .iter()
            .find(|transaction| transaction.id == transaction_id && transaction.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, transaction: Transaction) -> AppResult<Transaction> {
        let mut transactions = lock(&self.transactions)?;
        if let Some(key) = transaction.idempotency_key {
            if let Some(existing) = transactions.iter().find(|existing| {
                existing.user_id == transaction.user_id && existing.idempotency_key == Some(key)
            }) {
                return Ok(existing.clone());
            }
        }

        transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn update(
        &self,
        user_id: UserId,
        transaction_id: Uuid,
        draft: TransactionDraft,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Transaction>> {
        let mut transactions = lock(&self.transactions)?;
        let Some(transaction) = transactions
            .iter_mut()
            .find(|transaction| transaction.id == transaction_id && transaction.user_id == user_id)
        else {
            return Ok(None);
        };

        transaction.kind = draft.kind();
        transaction.amount = draft.amount();
        transaction.category_id = draft.category_id();
        transaction.description = draft.description().map(str::to_owned);
        transaction.occurred_on = draft.occurred_on();
        transaction.updated_at = updated_at;
        Ok(Some(transaction.clone()))
    }

    async fn delete(&self, user_id: UserId, transaction_id: Uuid) -> AppResult<bool> {
        let mut transactions = lock(&self.transactions)?;
        let before = transactions.len();
        transactions.retain(|transaction| {
            !(transaction.id == transaction_id && transaction.user_id == user_id)
        });
        Ok(transactions.len() != before)
    }
}

#[async_trait]
impl GoalRepository for FakeFinanceStore {
    async fn list(&self, user_id: UserId, include_archived: bool) -> AppResult<Vec<Goal>> {
        let mut goals: Vec<Goal> = lock(&self.goals)?
            .iter()
            .filter(|goal| goal.user_id == user_id)
            .filter(|goal| include_archived || goal.status == GoalStatus::Active)
            .cloned()
            .collect();
        goals.sort_by(|left, right| {
            right
                .is_priority
                .cmp(&left.is_priority)
                .then(right.created_at.cmp(&left.created_at))
        });
        Ok(goals)
    }

    async fn find(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Option<Goal>> {
        Ok(lock(&self.goals)?
            .iter()
            .find(|goal| goal.id == goal_id && goal.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, goal: Goal) -> AppResult<Goal> {
        let mut goals = lock(&self.goals)?;
        if goal.is_priority {
            for existing in goals.iter_mut().filter(|existing| existing.user_id == goal.user_id) {
                existing.is_priority = false;
            }
        }
        goals.push(goal.clone());
        Ok(goal)
    }

    async fn update_details(
        &self,
        user_id: UserId,
        goal_id: Uuid,
        name: GoalName,
        target_amount: Money,
        deadline: Option<NaiveDate>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Goal>> {
        let mut goals = lock(&self.goals)?;
        let Some(goal) = goals.iter_mut().find(|goal| {
            goal.id == goal_id && goal.user_id == user_id && goal.status == GoalStatus::Active
        }) else {
            return Ok(None);
        };

        goal.name = name;
        goal.target_amount = target_amount;
        goal.deadline = deadline;
        goal.updated_at = updated_at;
        Ok(Some(goal.clone()))
    }

    async fn set_priority(
        &self,
        user_id: UserId,
        goal_id: Uuid,
        is_priority: bool,
    ) -> AppResult<Option<Goal>> {
        let mut goals = lock(&self.goals)?;
        let exists = goals.iter().any(|goal| {
            goal.id == goal_id && goal.user_id == user_id && goal.status == GoalStatus::Active
        });
        if !exists {
            return Ok(None);
        }

        let mut updated = None;
        for goal in goals.iter_mut().filter(|goal| goal.user_id == user_id) {
            if goal.id == goal_id {
                goal.is_priority = is_priority;
                updated = Some(goal.clone());
            } else if is_priority {
                goal.is_priority = false;
            }
        }
        Ok(updated)
    }

    async fn archive(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Option<Goal>> {
        let mut goals = lock(&self.goals)?;
        let Some(goal) = goals.iter_mut().find(|goal| {
            goal.id == goal_id
                && goal.user_id == user_id
                && goal.status == GoalStatus::Active
                && !goal.is_priority
        }) else {
            return Ok(None);
        };

        goal.status = GoalStatus::Archived;
        Ok(Some(goal.clone()))
    }

    async fn record_event(&self, event: GoalEvent) -> AppResult<Option<Goal>> {
        let mut goals = lock(&self.goals)?;
        let Some(goal) = goals.iter_mut().find(|goal| {
            goal.id == event.goal_id
                && goal.user_id == event.user_id
                && goal.status == GoalStatus::Active
        }) else {
            return Ok(None);
        };

        let balance = goal.current_amount + event.signed_amount();
        if balance < Money::ZERO {
            return Ok(None);
        }

        goal.current_amount = balance;
        let updated = goal.clone();
        lock(&self.events)?.push(event);
        Ok(Some(updated))
    }

    async fn list_events(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Vec<GoalEvent>> {
        let mut events: Vec<GoalEvent> = lock(&self.events)?
            .iter()
            .filter(|event| event.user_id == user_id && event.goal_id == goal_id)
            .cloned()
            .collect();
        events.sort_by(|left, right| right.occurred_at.cmp(&left.occurred_at));
        Ok(events)
    }

    async fn list_events_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<GoalEvent>> {
        Ok(lock(&self.events)?
            .iter()
            .filter(|event| {
                event.user_id == user_id && event.occurred_at >= from && event.occurred_at < to
            })
            .cloned()
            .collect())
    }
}
