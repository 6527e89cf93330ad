use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use fintrack_core::AppError;
use serde_json::json;

mod types;

pub use types::ErrorResponse;

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) | AppError::InvalidCursor(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match &self.0 {
            AppError::Validation(message) => ErrorResponse::new("validation_error", message),
            AppError::InvalidCursor(message) => ErrorResponse::new("invalid_cursor", message),
            AppError::NotFound(message) => ErrorResponse::new("not_found", message),
            AppError::Conflict(reason) => ErrorResponse::new("conflict", reason.message())
                .with_details(json!({ "reason": reason.code() })),
            AppError::Unauthorized(message) => ErrorResponse::new("unauthorized", message),
            AppError::Forbidden(message) => ErrorResponse::new("forbidden", message),
            AppError::RateLimited {
                retry_after_seconds,
            } => ErrorResponse::new("rate_limited", "too many requests, try again later")
                .with_details(json!({ "retry_after_seconds": retry_after_seconds })),
            AppError::Internal(_) => {
                ErrorResponse::new("internal_error", "an internal error occurred")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let AppError::Internal(message) = &self.0 {
            tracing::error!(error = %message, "request failed with internal error");
        }

        let status = self.status();
        let mut response = (status, Json(self.body())).into_response();

        if let AppError::RateLimited {
            retry_after_seconds,
        } = self.0
            && let Ok(value) = HeaderValue::from_str(&retry_after_seconds.to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }

        response
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
