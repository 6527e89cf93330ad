use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use fintrack_application::{CreateTransactionInput, TransactionListQuery, UpdateTransactionInput};
use fintrack_core::{AppError, UserIdentity};
use fintrack_domain::{Month, TransactionKind};
use serde::Deserialize;

use crate::dto::{
    CreateTransactionRequest, TransactionResponse, UpdateTransactionRequest, parse_optional,
    parse_uuid,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    pub month: Option<String>,
    pub kind: Option<String>,
    pub category_id: Option<String>,
}

impl TryFrom<TransactionListParams> for TransactionListQuery {
    type Error = AppError;

    fn try_from(value: TransactionListParams) -> Result<Self, Self::Error> {
        Ok(Self {
            month: parse_optional(value.month.as_deref(), str::parse::<Month>)?,
            kind: parse_optional(value.kind.as_deref(), str::parse::<TransactionKind>)?,
            category_id: parse_optional(value.category_id.as_deref(), |category_id| {
                parse_uuid("category_id", category_id)
            })?,
        })
    }
}

pub async fn list_transactions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<TransactionListParams>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let transactions = state
        .transaction_service
        .list_transactions(&user, TransactionListQuery::try_from(params)?)
        .await?
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(transactions))
}

pub async fn get_transaction_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(transaction_id): Path<String>,
) -> ApiResult<Json<TransactionResponse>> {
    let transaction_id = parse_uuid("transaction id", transaction_id.as_str())?;
    let transaction = state
        .transaction_service
        .get_transaction(&user, transaction_id)
        .await?;

    Ok(Json(TransactionResponse::from(transaction)))
}

pub async fn create_transaction_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let input = CreateTransactionInput::try_from(payload)?;
    let transaction = state
        .transaction_service
        .create_transaction(&user, input)
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(transaction))))
}

pub async fn update_transaction_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(transaction_id): Path<String>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> ApiResult<Json<TransactionResponse>> {
    let transaction_id = parse_uuid("transaction id", transaction_id.as_str())?;
    let input = UpdateTransactionInput::try_from(payload)?;
    let transaction = state
        .transaction_service
        .update_transaction(&user, transaction_id, input)
        .await?;

    Ok(Json(TransactionResponse::from(transaction)))
}

pub async fn delete_transaction_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(transaction_id): Path<String>,
) -> ApiResult<StatusCode> {
    let transaction_id = parse_uuid("transaction id", transaction_id.as_str())?;
    state
        .transaction_service
        .delete_transaction(&user, transaction_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use fintrack_application::TransactionListQuery;
    use fintrack_core::AppError;
    use fintrack_domain::TransactionKind;

    use super::TransactionListParams;

    #[test]
    fn empty_params_list_everything() {
        let query = TransactionListQuery::try_from(TransactionListParams::default())
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(query, TransactionListQuery::default());
    }

    #[test]
    fn params_parse_into_typed_filters() {
        let query = TransactionListQuery::try_from(TransactionListParams {
            month: Some("2026-03".to_owned()),
            kind: Some("income".to_owned()),
            category_id: Some(String::new()),
        })
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(query.month.map(|month| month.to_string()), Some("2026-03".to_owned()));
        assert_eq!(query.kind, Some(TransactionKind::Income));
        assert_eq!(query.category_id, None);
    }

    #[test]
    fn malformed_month_is_rejected() {
        let result = TransactionListQuery::try_from(TransactionListParams {
            month: Some("03/2026".to_owned()),
            ..TransactionListParams::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
