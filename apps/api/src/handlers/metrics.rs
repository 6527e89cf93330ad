use axum::Json;
use axum::extract::{Extension, Query, State};
use chrono::Utc;
use fintrack_core::{AppError, UserIdentity};
use fintrack_domain::Month;
use serde::Deserialize;

use crate::dto::{CategoryBreakdownResponse, MonthlyMetricsResponse, parse_optional};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub month: Option<String>,
}

impl MetricsQuery {
    /// Requested month, defaulting to the current UTC month.
    fn month(&self) -> Result<Month, AppError> {
        Ok(parse_optional(self.month.as_deref(), str::parse::<Month>)?
            .unwrap_or_else(|| Month::containing(Utc::now().date_naive())))
    }
}

pub async fn monthly_metrics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<MetricsQuery>,
) -> ApiResult<Json<MonthlyMetricsResponse>> {
    let metrics = state
        .metrics_service
        .monthly_metrics(&user, query.month()?)
        .await?;

    Ok(Json(MonthlyMetricsResponse::from(metrics)))
}

pub async fn category_breakdown_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<MetricsQuery>,
) -> ApiResult<Json<CategoryBreakdownResponse>> {
    let breakdown = state
        .metrics_service
        .category_breakdown(&user, query.month()?)
        .await?;

    Ok(Json(CategoryBreakdownResponse::from(breakdown)))
}
