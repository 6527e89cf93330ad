use axum::Json;
use axum::extract::{Extension, Query, State};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use fintrack_application::{AuditLogFilter, AuditLogListQuery};
use fintrack_core::{AppError, UserIdentity};
use fintrack_domain::{AuditAction, AuditEntityType};
use serde::Deserialize;

use crate::dto::{AuditLogPageResponse, parse_optional, parse_uuid};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

/// Raw query string. Every field is text so malformed values surface as
/// validation errors instead of extractor rejections.
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogParams {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub action: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
}

impl TryFrom<AuditLogParams> for AuditLogListQuery {
    type Error = AppError;

    fn try_from(value: AuditLogParams) -> Result<Self, Self::Error> {
        let filter = AuditLogFilter::new(
            parse_optional(value.entity_type.as_deref(), str::parse::<AuditEntityType>)?,
            parse_optional(value.entity_id.as_deref(), |entity_id| {
                parse_uuid("entity_id", entity_id)
            })?,
            parse_optional(value.action.as_deref(), str::parse::<AuditAction>)?,
            parse_optional(value.from_date.as_deref(), |from| {
                parse_bound("from_date", from, BoundEdge::Start)
            })?,
            parse_optional(value.to_date.as_deref(), |to| {
                parse_bound("to_date", to, BoundEdge::End)
            })?,
        )?;

        Ok(Self {
            filter,
            cursor: value.cursor,
            limit: parse_optional(value.limit.as_deref(), parse_limit)?,
        })
    }
}

pub async fn list_audit_log_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<AuditLogParams>,
) -> ApiResult<Json<AuditLogPageResponse>> {
    let page = state
        .audit_log_service
        .list(&user, AuditLogListQuery::try_from(params)?)
        .await?;

    Ok(Json(AuditLogPageResponse::from(page)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundEdge {
    Start,
    End,
}

/// Accepts an RFC 3339 timestamp or a `YYYY-MM-DD` date. A bare date
/// starts at midnight UTC, or covers the whole day when it closes a range.
fn parse_bound(field: &str, value: &str, edge: BoundEdge) -> Result<DateTime<Utc>, AppError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!(
            "{field} must be an RFC 3339 timestamp or a YYYY-MM-DD date, got '{value}'"
        ))
    })?;

    let start = date.and_time(NaiveTime::MIN).and_utc();
    match edge {
        BoundEdge::Start => Ok(start),
        BoundEdge::End => start
            .checked_add_days(Days::new(1))
            .map(|next_day| next_day - TimeDelta::microseconds(1))
            .ok_or_else(|| AppError::Validation(format!("{field} is out of range"))),
    }
}

fn parse_limit(value: &str) -> Result<u32, AppError> {
    value
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("limit must be a whole number, got '{value}'")))
}
