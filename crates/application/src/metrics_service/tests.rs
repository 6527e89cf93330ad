use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use fintrack_core::{UserId, UserIdentity};
use fintrack_domain::{GoalEventKind, Money, Month, TransactionKind};

use super::{MetricsService, percentage_of};
use crate::test_fakes::FakeFinanceStore;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn service(store: &Arc<FakeFinanceStore>) -> MetricsService {
    MetricsService::new(store.clone(), store.clone(), store.clone())
}

fn march() -> Month {
    Month::new(2024, 3).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn monthly_metrics_combine_transactions_and_goal_events() {
    let store = Arc::new(FakeFinanceStore::with_system_categories());
    let actor = UserIdentity::new(UserId::new(), None);
    let user_id = actor.user_id();
    let salary = store.system_category_named("Salary");
    let rent = store.system_category_named("Rent");
    let groceries = store.system_category_named("Groceries");

    store.seed_transaction(user_id, TransactionKind::Income, 300_000, salary, date(2024, 3, 1));
    store.seed_transaction(user_id, TransactionKind::Expense, 120_000, rent, date(2024, 3, 2));
    store.seed_transaction(user_id, TransactionKind::Expense, 30_000, groceries, date(2024, 3, 31));
    // Outside the month and foreign rows must not count.
    store.seed_transaction(user_id, TransactionKind::Expense, 99_999, rent, date(2024, 4, 1));
    store.seed_transaction(UserId::new(), TransactionKind::Income, 50_000, salary, date(2024, 3, 5));

    let mid_march = Utc
        .with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .single()
        .unwrap_or_default();
    store.seed_event(user_id, GoalEventKind::Deposit, 50_000, mid_march);
    store.seed_event(user_id, GoalEventKind::Withdraw, 10_000, mid_march);

    let metrics = service(&store)
        .monthly_metrics(&actor, march())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(metrics.income, Money::from_cents(300_000));
    assert_eq!(metrics.expenses, Money::from_cents(150_000));
    assert_eq!(metrics.net_saved, Money::from_cents(40_000));
    assert_eq!(metrics.free_cash_flow, Money::from_cents(110_000));
    assert_eq!(metrics.transaction_count, 3);
}

#[tokio::test]
async fn empty_month_has_zero_metrics() {
    let store = Arc::new(FakeFinanceStore::with_system_categories());
    let actor = UserIdentity::new(UserId::new(), None);

    let metrics = service(&store)
        .monthly_metrics(&actor, march())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(metrics.income.is_zero());
    assert!(metrics.free_cash_flow.is_zero());
}

#[tokio::test]
async fn category_breakdown_sorts_by_amount_with_percentages() {
    let store = Arc::new(FakeFinanceStore::with_system_categories());
    let actor = UserIdentity::new(UserId::new(), None);
    let user_id = actor.user_id();
    let rent = store.system_category_named("Rent");
    let groceries = store.system_category_named("Groceries");
    let salary = store.system_category_named("Salary");

    store.seed_transaction(user_id, TransactionKind::Expense, 20_000, groceries, date(2024, 3, 3));
    store.seed_transaction(user_id, TransactionKind::Expense, 10_000, groceries, date(2024, 3, 9));
    store.seed_transaction(user_id, TransactionKind::Expense, 60_000, rent, date(2024, 3, 1));
    store.seed_transaction(user_id, TransactionKind::Income, 500_000, salary, date(2024, 3, 1));

    let breakdown = service(&store)
        .category_breakdown(&actor, march())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(breakdown.total_expenses, Money::from_cents(90_000));
    assert_eq!(breakdown.categories.len(), 2);
    assert_eq!(breakdown.categories[0].category_name, "Rent");
    assert!((breakdown.categories[0].percentage - 66.67).abs() < f64::EPSILON);
    assert_eq!(breakdown.categories[1].category_name, "Groceries");
    assert_eq!(breakdown.categories[1].transaction_count, 2);
    assert!((breakdown.categories[1].percentage - 33.33).abs() < f64::EPSILON);
}

#[test]
fn percentage_handles_zero_total() {
    assert!(percentage_of(Money::from_cents(10), Money::ZERO).abs() < f64::EPSILON);
    assert!((percentage_of(Money::from_cents(1), Money::from_cents(8)) - 12.5).abs() < f64::EPSILON);
}
