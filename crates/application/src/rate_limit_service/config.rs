use fintrack_core::{AppError, AppResult};
use fintrack_domain::{FixedWindow, RateLimitScope};

/// Default ceiling for password reset requests per window.
pub const DEFAULT_PASSWORD_RESET_MAX_ATTEMPTS: i64 = 3;

/// Default password reset window length.
pub const DEFAULT_PASSWORD_RESET_WINDOW_SECONDS: i64 = 30 * 60;

/// Configuration for a rate limit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    /// Action the rule guards.
    pub scope: RateLimitScope,
    /// Maximum number of admitted attempts per window.
    pub max_attempts: i64,
    /// Window geometry.
    pub window: FixedWindow,
}

impl RateLimitRule {
    /// Creates a new rate limit rule.
    pub fn new(scope: RateLimitScope, max_attempts: i64, window_seconds: i64) -> AppResult<Self> {
        if max_attempts <= 0 {
            return Err(AppError::Validation(
                "rate limit max_attempts must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            scope,
            max_attempts,
            window: FixedWindow::from_seconds(window_seconds)?,
        })
    }

    /// Three password reset emails per thirty minutes.
    pub fn password_reset_default() -> AppResult<Self> {
        Self::new(
            RateLimitScope::ResetPassword,
            DEFAULT_PASSWORD_RESET_MAX_ATTEMPTS,
            DEFAULT_PASSWORD_RESET_WINDOW_SECONDS,
        )
    }
}
