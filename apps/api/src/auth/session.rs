use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use fintrack_core::{AppError, UserId, UserIdentity};
use fintrack_domain::EmailAddress;
use tower_sessions::Session;
use tracing::info;

use crate::dto::{OpenSessionRequest, UserIdentityResponse, parse_optional, parse_uuid};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// POST /auth/session - Opens a session for an identity vouched for by the
/// auth provider callback.
pub async fn open_session_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<OpenSessionRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let identity = identity_from_request(&payload)?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    info!(user_id = %identity.user_id(), "session opened");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /auth/logout - Ends the current session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - Returns the session identity.
pub async fn me_handler(
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserIdentityResponse>> {
    Ok(Json(UserIdentityResponse::from(user)))
}

fn identity_from_request(payload: &OpenSessionRequest) -> Result<UserIdentity, AppError> {
    let user_id = UserId::from_uuid(parse_uuid("user_id", payload.user_id.as_str())?);
    let email = parse_optional(payload.email.as_deref(), |email| EmailAddress::new(email))?
        .map(String::from);

    Ok(UserIdentity::new(user_id, email))
}

#[cfg(test)]
mod tests {
    use fintrack_core::AppError;

    use super::identity_from_request;
    use crate::dto::OpenSessionRequest;

    fn request(user_id: &str, email: Option<&str>) -> OpenSessionRequest {
        OpenSessionRequest {
            user_id: user_id.to_owned(),
            email: email.map(ToOwned::to_owned),
            token: "bootstrap".to_owned(),
        }
    }

    #[test]
    fn identity_carries_normalized_email() {
        let identity = identity_from_request(&request(
            "0b6a3c52-2f1e-4d7a-9c3b-5e8f1a2d4c60",
            Some(" Ana@Example.COM "),
        ))
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(identity.email(), Some("ana@example.com"));
        assert_eq!(
            identity.user_id().to_string(),
            "0b6a3c52-2f1e-4d7a-9c3b-5e8f1a2d4c60"
        );
    }

    #[test]
    fn identity_requires_uuid_user_id() {
        let result = identity_from_request(&request("ana", None));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
