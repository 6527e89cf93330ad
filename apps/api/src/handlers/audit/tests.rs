use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{TimeZone, Utc};
use fintrack_application::{AuditCursor, AuditLogListQuery};
use fintrack_core::AppError;
use fintrack_domain::{AuditAction, AuditEntityType};
use proptest::prelude::*;

use super::{AuditLogParams, BoundEdge, parse_bound};
use crate::error::ApiError;

fn convert(params: AuditLogParams) -> Result<AuditLogListQuery, AppError> {
    AuditLogListQuery::try_from(params)
}

#[test]
fn empty_params_use_service_defaults() {
    let query = convert(AuditLogParams::default()).unwrap_or_else(|_| unreachable!());

    assert_eq!(query, AuditLogListQuery::default());
}

#[tokio::test]
async fn empty_cursor_is_an_invalid_cursor_not_the_first_page() {
    let query = convert(AuditLogParams {
        cursor: Some(String::new()),
        ..AuditLogParams::default()
    })
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(query.cursor.as_deref(), Some(""));

    let error = AuditCursor::decode("").map_err(AppError::from);
    let Err(error) = error else {
        panic!("empty cursor must not decode");
    };
    let response = ApiError::from(error).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|_| unreachable!());
    let body: serde_json::Value =
        serde_json::from_slice(&bytes).unwrap_or_else(|_| unreachable!());
    assert_eq!(body["error"], "invalid_cursor");
}

#[test]
fn filters_parse_into_typed_values() {
    let query = convert(AuditLogParams {
        entity_type: Some("goal_event".to_owned()),
        entity_id: Some("1d5c8a3e-7b2f-4e61-9f0a-6c4d2b8e1a73".to_owned()),
        action: Some("DELETE".to_owned()),
        cursor: Some("eyJpZCI6IngifQ".to_owned()),
        limit: Some("25".to_owned()),
        ..AuditLogParams::default()
    })
    .unwrap_or_else(|_| unreachable!());

    assert_eq!(query.filter.entity_type(), Some(AuditEntityType::GoalEvent));
    assert_eq!(query.filter.action(), Some(AuditAction::Delete));
    assert_eq!(
        query.filter.entity_id().map(|id| id.to_string()),
        Some("1d5c8a3e-7b2f-4e61-9f0a-6c4d2b8e1a73".to_owned())
    );
    assert_eq!(query.cursor.as_deref(), Some("eyJpZCI6IngifQ"));
    assert_eq!(query.limit, Some(25));
}

#[test]
fn unknown_entity_type_is_rejected() {
    let result = convert(AuditLogParams {
        entity_type: Some("budget".to_owned()),
        ..AuditLogParams::default()
    });

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn non_numeric_limit_is_rejected() {
    for limit in ["ten", "-1", "1.5"] {
        let result = convert(AuditLogParams {
            limit: Some(limit.to_owned()),
            ..AuditLogParams::default()
        });
        assert!(
            matches!(result, Err(AppError::Validation(_))),
            "limit {limit} should be rejected"
        );
    }
}

#[test]
fn inverted_date_range_is_rejected() {
    let result = convert(AuditLogParams {
        from_date: Some("2026-03-10".to_owned()),
        to_date: Some("2026-03-09".to_owned()),
        ..AuditLogParams::default()
    });

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn same_day_range_is_accepted() {
    let query = convert(AuditLogParams {
        from_date: Some("2026-03-10".to_owned()),
        to_date: Some("2026-03-10".to_owned()),
        ..AuditLogParams::default()
    })
    .unwrap_or_else(|_| unreachable!());

    assert!(query.filter.from_date() < query.filter.to_date());
}

#[test]
fn date_only_end_bound_covers_the_whole_day() {
    let end = parse_bound("to_date", "2026-03-10", BoundEdge::End)
        .unwrap_or_else(|_| unreachable!());
    let last_write = Utc
        .with_ymd_and_hms(2026, 3, 10, 23, 59, 59)
        .single()
        .unwrap_or_else(|| unreachable!());
    let next_day = Utc
        .with_ymd_and_hms(2026, 3, 11, 0, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!());

    assert!(last_write <= end);
    assert!(end < next_day);
}

#[test]
fn rfc3339_bounds_are_normalised_to_utc() {
    let start = parse_bound("from_date", "2026-03-10T08:00:00+02:00", BoundEdge::Start)
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        start,
        Utc.with_ymd_and_hms(2026, 3, 10, 6, 0, 0)
            .single()
            .unwrap_or_else(|| unreachable!())
    );
}

proptest! {
    #[test]
    fn any_numeric_limit_parses(limit in 0_u32..10_000) {
        let query = convert(AuditLogParams {
            limit: Some(limit.to_string()),
            ..AuditLogParams::default()
        });
        prop_assert_eq!(query.ok().and_then(|query| query.limit), Some(limit));
    }
}
