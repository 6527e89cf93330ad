//! Monthly aggregates over transactions and goal events.

use std::collections::HashMap;
use std::sync::Arc;

use fintrack_core::{AppResult, UserIdentity};
use fintrack_domain::{GoalEvent, Money, Month, TransactionKind};
use serde::Serialize;
use uuid::Uuid;

use crate::finance_ports::{
    CategoryRepository, GoalRepository, TransactionListQuery, TransactionRepository,
};

const UNKNOWN_CATEGORY_NAME: &str = "Uncategorized";

/// Cash-flow summary for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyMetrics {
    /// Month summarised.
    pub month: Month,
    /// Sum of income transactions.
    pub income: Money,
    /// Sum of expense transactions.
    pub expenses: Money,
    /// Goal deposits minus goal withdrawals.
    pub net_saved: Money,
    /// Income minus expenses minus net saved.
    pub free_cash_flow: Money,
    /// Number of transactions in the month.
    pub transaction_count: usize,
}

/// Expense total of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Category identifier.
    pub category_id: Uuid,
    /// Category display name.
    pub category_name: String,
    /// Sum of the category's expenses.
    pub amount: Money,
    /// Share of total expenses, rounded to two decimals.
    pub percentage: f64,
    /// Number of expense transactions.
    pub transaction_count: usize,
}

/// Expenses for one month grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Month summarised.
    pub month: Month,
    /// Sum of all expenses.
    pub total_expenses: Money,
    /// Per-category totals, largest first.
    pub categories: Vec<CategoryShare>,
}

/// Application service computing dashboard metrics.
#[derive(Clone)]
pub struct MetricsService {
    transaction_repository: Arc<dyn TransactionRepository>,
    goal_repository: Arc<dyn GoalRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl MetricsService {
    /// Creates a new metrics service.
    #[must_use]
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepository>,
        goal_repository: Arc<dyn GoalRepository>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            transaction_repository,
            goal_repository,
            category_repository,
        }
    }

    /// Computes income, expenses, net saved and free cash flow for a month.
    pub async fn monthly_metrics(
        &self,
        actor: &UserIdentity,
        month: Month,
    ) -> AppResult<MonthlyMetrics> {
        let transactions = self
            .transaction_repository
            .list(
                actor.user_id(),
                TransactionListQuery {
                    month: Some(month),
                    ..TransactionListQuery::default()
                },
            )
            .await?;

        let (from, to) = month.utc_bounds();
        let events = self
            .goal_repository
            .list_events_between(actor.user_id(), from, to)
            .await?;

        let total_of = |kind: TransactionKind| -> Money {
            transactions
                .iter()
                .filter(|transaction| transaction.kind == kind)
                .map(|transaction| transaction.amount)
                .sum()
        };
        let income = total_of(TransactionKind::Income);
        let expenses = total_of(TransactionKind::Expense);
        let net_saved: Money = events.iter().map(GoalEvent::signed_amount).sum();

        Ok(MonthlyMetrics {
            month,
            income,
            expenses,
            net_saved,
            free_cash_flow: income - expenses - net_saved,
            transaction_count: transactions.len(),
        })
    }

    /// Groups a month's expenses by category with percentage shares.
    pub async fn category_breakdown(
        &self,
        actor: &UserIdentity,
        month: Month,
    ) -> AppResult<CategoryBreakdown> {
        let expenses = self
            .transaction_repository
            .list(
                actor.user_id(),
                TransactionListQuery {
                    month: Some(month),
                    kind: Some(TransactionKind::Expense),
                    category_id: None,
                },
            )
            .await?;

        let names: HashMap<Uuid, String> = self
            .category_repository
            .list_visible(actor.user_id(), Some(TransactionKind::Expense))
            .await?
            .into_iter()
            .map(|category| (category.id, category.name.as_str().to_owned()))
            .collect();

        let mut grouped: HashMap<Uuid, (Money, usize)> = HashMap::new();
        for expense in &expenses {
            let entry = grouped.entry(expense.category_id).or_insert((Money::ZERO, 0));
            entry.0 = entry.0 + expense.amount;
            entry.1 += 1;
        }

        let total_expenses: Money = grouped.values().map(|(amount, _)| *amount).sum();
        let mut categories: Vec<CategoryShare> = grouped
            .into_iter()
            .map(|(category_id, (amount, transaction_count))| CategoryShare {
                category_id,
                category_name: names
                    .get(&category_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_owned()),
                amount,
                percentage: percentage_of(amount, total_expenses),
                transaction_count,
            })
            .collect();
        categories.sort_by(|left, right| {
            right
                .amount
                .cmp(&left.amount)
                .then_with(|| left.category_name.cmp(&right.category_name))
        });

        Ok(CategoryBreakdown {
            month,
            total_expenses,
            categories,
        })
    }
}

/// `part / total` as a percentage rounded half-up to two decimals.
fn percentage_of(part: Money, total: Money) -> f64 {
    if total.cents() <= 0 {
        return 0.0;
    }

    let part = i128::from(part.cents());
    let total = i128::from(total.cents());
    let basis_points = (part * 10_000 * 2 + total) / (total * 2);
    basis_points as f64 / 100.0
}

#[cfg(test)]
mod tests;
