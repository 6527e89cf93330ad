use std::sync::Arc;

use chrono::{DateTime, Utc};

use fintrack_core::{AppError, AppResult};

use super::config::RateLimitRule;
use super::ports::RateLimitRepository;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The attempt may proceed and has been recorded.
    Allowed {
        /// Attempts in the window including this one; `None` when counting failed.
        attempts_count: Option<i64>,
    },
    /// The ceiling was reached for the current window.
    Denied {
        /// Whole seconds until the window closes.
        retry_after_seconds: i64,
        /// Attempts seen in the window.
        attempts_count: i64,
    },
}

impl RateLimitDecision {
    /// Returns whether the attempt was admitted.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Converts a denial into [`AppError::RateLimited`].
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Allowed { .. } => Ok(()),
            Self::Denied {
                retry_after_seconds,
                ..
            } => Err(AppError::RateLimited {
                retry_after_seconds,
            }),
        }
    }
}

/// Application service for fixed-window rate limiting.
#[derive(Clone)]
pub struct RateLimitService {
    repository: Arc<dyn RateLimitRepository>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(repository: Arc<dyn RateLimitRepository>) -> Self {
        Self { repository }
    }

    /// Checks `subject` against `rule` and records the attempt when admitted.
    pub async fn check_and_record(&self, rule: &RateLimitRule, subject: &str) -> RateLimitDecision {
        self.check_and_record_at(rule, subject, Utc::now()).await
    }

    /// Same as [`Self::check_and_record`] with an explicit clock reading.
    ///
    /// Store failures never block the caller: a failed count admits the
    /// attempt and a failed write is logged and ignored.
    ///
    /// Counting and recording are two separate store calls, so concurrent
    /// callers for one subject can all pass the count before any of them
    /// records, and more than `max_attempts` may be admitted in a window.
    /// Strict enforcement needs a single atomic conditional increment in
    /// the store.
    pub async fn check_and_record_at(
        &self,
        rule: &RateLimitRule,
        subject: &str,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        let bucket = rule.window.bucket_for(now);

        let attempts_count = match self
            .repository
            .count_attempts(subject, rule.scope, bucket)
            .await
        {
            Ok(count) => Some(count),
            Err(error) => {
                tracing::warn!(
                    scope = rule.scope.as_str(),
                    error = %error,
                    "rate limit count failed, admitting attempt"
                );
                None
            }
        };

        if let Some(count) = attempts_count
            && count >= rule.max_attempts
        {
            let retry_after_seconds = rule.window.retry_after_seconds(now);
            tracing::info!(
                scope = rule.scope.as_str(),
                attempts = count,
                retry_after_seconds,
                "rate limit exceeded"
            );
            return RateLimitDecision::Denied {
                retry_after_seconds,
                attempts_count: count,
            };
        }

        if let Err(error) = self
            .repository
            .record_attempt(subject, rule.scope, now)
            .await
        {
            tracing::warn!(
                scope = rule.scope.as_str(),
                error = %error,
                "failed to record rate limit attempt"
            );
        }

        RateLimitDecision::Allowed {
            attempts_count: attempts_count.map(|count| count + 1),
        }
    }
}
