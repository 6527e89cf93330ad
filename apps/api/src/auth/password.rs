use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::{ForgotPasswordRequest, GenericMessageResponse};
use crate::error::ApiResult;
use crate::state::AppState;

const RESET_REQUESTED_MESSAGE: &str =
    "if that email address is in our database, we will send you an email to reset your password";

/// POST /auth/forgot-password - Requests a password reset email.
///
/// The response never reveals whether the account exists or how many
/// attempts remain. Denials surface as 429 with `retry_after_seconds`.
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> ApiResult<(StatusCode, Json<GenericMessageResponse>)> {
    state
        .password_reset_service
        .request_password_reset(payload.email.as_str())
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(GenericMessageResponse {
            message: RESET_REQUESTED_MESSAGE.to_owned(),
        }),
    ))
}
