use std::sync::Arc;

use chrono::NaiveDate;
use fintrack_application::{
    AuditLogFilter, AuditLogListQuery, AuditLogPredicate, AuditLogRepository, AuditLogService,
};
use fintrack_core::{UserId, UserIdentity};
use fintrack_domain::{AuditAction, AuditEntityType};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresAuditLogRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres audit log tests: {error}");
    }

    Some(pool)
}

async fn insert_expense(pool: &PgPool, user_id: UserId) -> Uuid {
    let category_id = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM categories WHERE user_id IS NULL AND kind = 'expense' LIMIT 1",
    )
    .fetch_one(pool)
    .await
    .unwrap_or_else(|error| panic!("seeded expense category missing: {error}"));

    let transaction_id = Uuid::new_v4();
    let insert = sqlx::query(
        r#"
            INSERT INTO transactions (id, user_id, kind, amount_cents, category_id, occurred_on)
            VALUES ($1, $2, 'expense', 1250, $3, $4)
            "#,
    )
    .bind(transaction_id)
    .bind(user_id.as_uuid())
    .bind(category_id)
    .bind(NaiveDate::from_ymd_opt(2024, 3, 10))
    .execute(pool)
    .await;
    assert!(insert.is_ok());

    transaction_id
}

#[tokio::test]
async fn triggers_write_entries_that_page_newest_first() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let user_id = UserId::new();
    let mut created = Vec::new();
    for _ in 0..5 {
        created.push(insert_expense(&pool, user_id).await);
    }
    let delete = sqlx::query("DELETE FROM transactions WHERE id = $1")
        .bind(created[0])
        .execute(&pool)
        .await;
    assert!(delete.is_ok());

    let service = AuditLogService::new(Arc::new(PostgresAuditLogRepository::new(pool.clone())));
    let actor = UserIdentity::new(user_id, None);

    let mut seen = Vec::new();
    let mut cursor = None;
    loop {
        let page = service
            .list(
                &actor,
                AuditLogListQuery {
                    filter: AuditLogFilter::default(),
                    cursor,
                    limit: Some(2),
                },
            )
            .await
            .unwrap_or_else(|error| panic!("audit page failed: {error}"));
        seen.extend(page.entries);
        if !page.has_more {
            break;
        }
        cursor = page.next_cursor;
    }

    assert_eq!(seen.len(), 6);
    assert_eq!(seen[0].action, AuditAction::Delete);
    assert_eq!(seen[0].entity_id, created[0]);
    assert!(seen[0].new_data.is_none());
    assert!(
        seen.windows(2)
            .all(|pair| pair[0].sort_key() > pair[1].sort_key())
    );
}

#[tokio::test]
async fn filters_and_owner_scope_apply_in_sql() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let owner = UserId::new();
    let stranger = UserId::new();
    let target = insert_expense(&pool, owner).await;
    insert_expense(&pool, owner).await;
    insert_expense(&pool, stranger).await;

    let repository = PostgresAuditLogRepository::new(pool.clone());
    let filter = AuditLogFilter::new(
        Some(AuditEntityType::Transaction),
        Some(target),
        Some(AuditAction::Create),
        None,
        None,
    )
    .unwrap_or_else(|error| panic!("filter rejected: {error}"));
    let entries = repository
        .list_entries(
            &AuditLogPredicate {
                owner,
                filter,
                after: None,
            },
            10,
        )
        .await
        .unwrap_or_else(|error| panic!("listing failed: {error}"));

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity_id, target);
    assert_eq!(entries[0].user_id, owner);
}
