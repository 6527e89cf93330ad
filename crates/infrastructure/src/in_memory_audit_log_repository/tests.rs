use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fintrack_application::{
    AuditLogFilter, AuditLogListQuery, AuditLogService, MAX_AUDIT_PAGE_LIMIT,
};
use fintrack_core::{AppError, UserId, UserIdentity};
use fintrack_domain::{AuditAction, AuditEntityType, AuditLogEntry};
use uuid::Uuid;

use super::InMemoryAuditLogRepository;

fn at(offset_seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::seconds(offset_seconds)
}

fn entry(user_id: UserId, entity_type: AuditEntityType, performed_at: DateTime<Utc>) -> AuditLogEntry {
    AuditLogEntry {
        id: Uuid::new_v4(),
        user_id,
        entity_type,
        entity_id: Uuid::new_v4(),
        action: AuditAction::Create,
        old_data: None,
        new_data: Some(serde_json::json!({ "note": "seed" })),
        performed_at,
    }
}

async fn seeded(entries: Vec<AuditLogEntry>) -> AuditLogService {
    let repository = Arc::new(InMemoryAuditLogRepository::new());
    for entry in entries {
        repository.append(entry).await;
    }
    AuditLogService::new(repository)
}

async fn collect_all(
    service: &AuditLogService,
    actor: &UserIdentity,
    limit: u32,
) -> Vec<AuditLogEntry> {
    let mut collected = Vec::new();
    let mut cursor = None;
    loop {
        let page = service
            .list(
                actor,
                AuditLogListQuery {
                    filter: AuditLogFilter::default(),
                    cursor,
                    limit: Some(limit),
                },
            )
            .await
            .unwrap_or_else(|_| unreachable!());
        collected.extend(page.entries);
        if !page.has_more {
            return collected;
        }
        cursor = page.next_cursor;
    }
}

#[tokio::test]
async fn pages_cover_every_entry_once_across_timestamp_ties() {
    let actor = UserIdentity::new(UserId::new(), None);
    // Ten entries share one timestamp so several page boundaries fall inside the tie.
    let entries: Vec<AuditLogEntry> = (0..31)
        .map(|index| {
            let offset = if index < 10 { 0 } else { index };
            entry(actor.user_id(), AuditEntityType::Transaction, at(offset))
        })
        .collect();
    let expected: HashSet<Uuid> = entries.iter().map(|entry| entry.id).collect();
    let service = seeded(entries).await;

    for limit in [1, 3, 7, 30] {
        let collected = collect_all(&service, &actor, limit).await;
        let ids: HashSet<Uuid> = collected.iter().map(|entry| entry.id).collect();

        assert_eq!(collected.len(), 31);
        assert_eq!(ids, expected);
        assert!(
            collected
                .windows(2)
                .all(|pair| pair[0].sort_key() > pair[1].sort_key())
        );
    }
}

#[tokio::test]
async fn other_owners_entries_are_invisible() {
    let actor = UserIdentity::new(UserId::new(), None);
    let stranger = UserId::new();
    let service = seeded(vec![
        entry(stranger, AuditEntityType::Goal, at(1)),
        entry(actor.user_id(), AuditEntityType::Goal, at(2)),
        entry(stranger, AuditEntityType::Goal, at(3)),
    ])
    .await;

    let collected = collect_all(&service, &actor, 1).await;

    assert_eq!(collected.len(), 1);
    assert!(collected.iter().all(|entry| entry.user_id == actor.user_id()));
}

#[tokio::test]
async fn goal_filter_over_mixed_entries() {
    let actor = UserIdentity::new(UserId::new(), None);
    let mut entries = Vec::new();
    for index in 0..5 {
        entries.push(entry(actor.user_id(), AuditEntityType::Transaction, at(index)));
    }
    for index in 0..3 {
        entries.push(entry(actor.user_id(), AuditEntityType::Goal, at(index)));
    }
    let service = seeded(entries).await;

    let page = service
        .list(
            &actor,
            AuditLogListQuery {
                filter: AuditLogFilter::new(Some(AuditEntityType::Goal), None, None, None, None)
                    .unwrap_or_else(|_| unreachable!()),
                cursor: None,
                limit: Some(50),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.entries.len(), 3);
    assert!(!page.has_more);
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn max_limit_with_one_extra_row_reports_more() {
    let actor = UserIdentity::new(UserId::new(), None);
    let entries = (0..101)
        .map(|index| entry(actor.user_id(), AuditEntityType::GoalEvent, at(index)))
        .collect();
    let service = seeded(entries).await;

    let page = service
        .list(
            &actor,
            AuditLogListQuery {
                filter: AuditLogFilter::default(),
                cursor: None,
                limit: Some(MAX_AUDIT_PAGE_LIMIT),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.entries.len(), 100);
    assert!(page.has_more);
    assert!(page.next_cursor.is_some());

    let rest = service
        .list(
            &actor,
            AuditLogListQuery {
                filter: AuditLogFilter::default(),
                cursor: page.next_cursor,
                limit: Some(MAX_AUDIT_PAGE_LIMIT),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(rest.entries.len(), 1);
    assert!(!rest.has_more);
}

#[tokio::test]
async fn date_range_is_inclusive_on_both_ends() {
    let actor = UserIdentity::new(UserId::new(), None);
    let entries = (0..10)
        .map(|index| entry(actor.user_id(), AuditEntityType::Goal, at(index * 60)))
        .collect();
    let service = seeded(entries).await;

    let page = service
        .list(
            &actor,
            AuditLogListQuery {
                filter: AuditLogFilter::new(None, None, None, Some(at(120)), Some(at(300)))
                    .unwrap_or_else(|_| unreachable!()),
                cursor: None,
                limit: None,
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.entries.len(), 4);
}

#[tokio::test]
async fn tampered_cursor_is_a_cursor_error() {
    let actor = UserIdentity::new(UserId::new(), None);
    let service = seeded(Vec::new()).await;

    let result = service
        .list(
            &actor,
            AuditLogListQuery {
                filter: AuditLogFilter::default(),
                cursor: Some("eyJpZCI6Im5vcGUifQ".to_owned()),
                limit: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::InvalidCursor(_))));
}
