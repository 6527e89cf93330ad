use async_trait::async_trait;
use chrono::{DateTime, Utc};

use fintrack_core::AppResult;
use fintrack_domain::{RateLimitScope, WindowBounds};

/// Repository port for rate limit persistence.
#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Counts attempts for `(subject, scope)` with `attempted_at` in `[start, end)`.
    async fn count_attempts(
        &self,
        subject: &str,
        scope: RateLimitScope,
        window: WindowBounds,
    ) -> AppResult<i64>;

    /// Appends one attempt.
    async fn record_attempt(
        &self,
        subject: &str,
        scope: RateLimitScope,
        attempted_at: DateTime<Utc>,
    ) -> AppResult<()>;
}
