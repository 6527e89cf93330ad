use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use fintrack_application::{CreateGoalInput, RecordGoalEventInput, UpdateGoalInput};
use fintrack_core::{AppError, UserIdentity};
use serde::Deserialize;
use uuid::Uuid;

use crate::dto::{
    CreateGoalRequest, GoalEventResponse, GoalResponse, RecordGoalEventRequest,
    RecordGoalEventResponse, SetGoalPriorityRequest, UpdateGoalRequest, parse_optional,
    parse_uuid,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GoalListQuery {
    pub include_archived: Option<String>,
}

pub async fn list_goals_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<GoalListQuery>,
) -> ApiResult<Json<Vec<GoalResponse>>> {
    let include_archived = parse_optional(query.include_archived.as_deref(), parse_flag)?
        .unwrap_or(false);

    let goals = state
        .goal_service
        .list_goals(&user, include_archived)
        .await?
        .into_iter()
        .map(GoalResponse::from)
        .collect();

    Ok(Json(goals))
}

pub async fn get_goal_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(goal_id): Path<String>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = state
        .goal_service
        .get_goal(&user, goal_id_from_path(&goal_id)?)
        .await?;

    Ok(Json(GoalResponse::from(goal)))
}

pub async fn create_goal_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateGoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalResponse>)> {
    let input = CreateGoalInput::try_from(payload)?;
    let goal = state.goal_service.create_goal(&user, input).await?;

    Ok((StatusCode::CREATED, Json(GoalResponse::from(goal))))
}

pub async fn update_goal_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(goal_id): Path<String>,
    Json(payload): Json<UpdateGoalRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let goal_id = goal_id_from_path(&goal_id)?;
    let input = UpdateGoalInput::try_from(payload)?;
    let goal = state.goal_service.update_goal(&user, goal_id, input).await?;

    Ok(Json(GoalResponse::from(goal)))
}

pub async fn set_goal_priority_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(goal_id): Path<String>,
    Json(payload): Json<SetGoalPriorityRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = state
        .goal_service
        .set_priority(&user, goal_id_from_path(&goal_id)?, payload.is_priority)
        .await?;

    Ok(Json(GoalResponse::from(goal)))
}

pub async fn archive_goal_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(goal_id): Path<String>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = state
        .goal_service
        .archive_goal(&user, goal_id_from_path(&goal_id)?)
        .await?;

    Ok(Json(GoalResponse::from(goal)))
}

pub async fn list_goal_events_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(goal_id): Path<String>,
) -> ApiResult<Json<Vec<GoalEventResponse>>> {
    let events = state
        .goal_service
        .list_goal_events(&user, goal_id_from_path(&goal_id)?)
        .await?
        .into_iter()
        .map(GoalEventResponse::from)
        .collect();

    Ok(Json(events))
}

pub async fn record_goal_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(goal_id): Path<String>,
    Json(payload): Json<RecordGoalEventRequest>,
) -> ApiResult<(StatusCode, Json<RecordGoalEventResponse>)> {
    let goal_id = goal_id_from_path(&goal_id)?;
    let input = RecordGoalEventInput::try_from(payload)?;
    let (goal, event) = state
        .goal_service
        .record_goal_event(&user, goal_id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordGoalEventResponse {
            goal: GoalResponse::from(goal),
            event: GoalEventResponse::from(event),
        }),
    ))
}

fn goal_id_from_path(goal_id: &str) -> Result<Uuid, AppError> {
    parse_uuid("goal id", goal_id)
}

fn parse_flag(value: &str) -> Result<bool, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "include_archived must be true or false, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flags_accept_common_spellings() {
        assert!(matches!(parse_flag("TRUE"), Ok(true)));
        assert!(matches!(parse_flag("0"), Ok(false)));
        assert!(parse_flag("yes please").is_err());
    }
}
