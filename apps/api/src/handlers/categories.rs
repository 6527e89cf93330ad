use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use fintrack_application::CreateCategoryInput;
use fintrack_core::UserIdentity;
use fintrack_domain::TransactionKind;
use serde::Deserialize;
use uuid::Uuid;

use crate::dto::{CategoryResponse, CreateCategoryRequest, parse_optional, parse_uuid};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    pub kind: Option<String>,
}

pub async fn list_categories_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<CategoryListQuery>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let kind = parse_optional(query.kind.as_deref(), str::parse::<TransactionKind>)?;

    let categories = state
        .category_service
        .list_categories(&user, kind)
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();

    Ok(Json(categories))
}

pub async fn create_category_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let input = CreateCategoryInput::try_from(payload)?;
    let category = state.category_service.create_category(&user, input).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(category_id): Path<String>,
) -> ApiResult<StatusCode> {
    let category_id: Uuid = parse_uuid("category id", category_id.as_str())?;
    state
        .category_service
        .delete_category(&user, category_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
