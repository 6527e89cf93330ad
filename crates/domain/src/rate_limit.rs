use std::str::FromStr;

use chrono::{DateTime, Utc};
use fintrack_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Actions guarded by the fixed-window limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitScope {
    /// Password reset email requests.
    ResetPassword,
}

impl RateLimitScope {
    /// Returns a stable storage value for this scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResetPassword => "reset_password",
        }
    }
}

impl FromStr for RateLimitScope {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "reset_password" => Ok(Self::ResetPassword),
            _ => Err(AppError::Validation(format!(
                "unknown rate limit scope '{value}'"
            ))),
        }
    }
}

/// Half-open `[start, end)` bounds of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

/// Wall-clock aligned, non-overlapping windows of a fixed length.
///
/// Every instant in `[k * len, (k + 1) * len)` (milliseconds since the Unix
/// epoch) belongs to bucket `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWindow {
    length_ms: i64,
}

impl FixedWindow {
    /// Creates a window of the given length in seconds.
    pub fn from_seconds(seconds: i64) -> AppResult<Self> {
        if seconds <= 0 {
            return Err(AppError::Validation(
                "rate limit window must be greater than zero seconds".to_owned(),
            ));
        }

        let length_ms = seconds.checked_mul(1_000).ok_or_else(|| {
            AppError::Validation(format!("rate limit window of {seconds}s is too large"))
        })?;

        Ok(Self { length_ms })
    }

    /// Window length in whole seconds.
    #[must_use]
    pub fn length_seconds(&self) -> i64 {
        self.length_ms / 1_000
    }

    /// Returns the bucket containing `now`.
    #[must_use]
    pub fn bucket_for(&self, now: DateTime<Utc>) -> WindowBounds {
        let now_ms = now.timestamp_millis();
        let start_ms = now_ms.div_euclid(self.length_ms) * self.length_ms;
        let end_ms = start_ms.saturating_add(self.length_ms);

        WindowBounds {
            start: DateTime::from_timestamp_millis(start_ms).unwrap_or(now),
            end: DateTime::from_timestamp_millis(end_ms).unwrap_or(now),
        }
    }

    /// Whole seconds, rounded up, until the bucket containing `now` closes.
    #[must_use]
    pub fn retry_after_seconds(&self, now: DateTime<Utc>) -> i64 {
        let now_ms = now.timestamp_millis();
        let bucket = self.bucket_for(now);
        let remaining_ms = bucket.end.timestamp_millis() - now_ms;
        (remaining_ms + 999) / 1_000
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    use super::FixedWindow;

    fn thirty_minutes() -> FixedWindow {
        FixedWindow::from_seconds(30 * 60).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn rejects_non_positive_length() {
        assert!(FixedWindow::from_seconds(0).is_err());
        assert!(FixedWindow::from_seconds(-10).is_err());
    }

    #[test]
    fn buckets_align_to_wall_clock() {
        let window = thirty_minutes();
        let now = Utc
            .with_ymd_and_hms(2024, 6, 1, 10, 47, 12)
            .single()
            .unwrap_or_default();
        let bucket = window.bucket_for(now);

        assert_eq!(
            bucket.start,
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0)
                .single()
                .unwrap_or_default()
        );
        assert_eq!(
            bucket.end,
            Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0)
                .single()
                .unwrap_or_default()
        );
        assert_eq!(window.retry_after_seconds(now), 12 * 60 + 48);
    }

    #[test]
    fn second_1801_opens_a_fresh_bucket() {
        let window = thirty_minutes();
        let start = Utc
            .with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
            .single()
            .unwrap_or_default();
        let early = start + chrono::Duration::seconds(1);
        let late = start + chrono::Duration::seconds(1799);
        let next = start + chrono::Duration::seconds(1801);

        assert_eq!(window.bucket_for(early), window.bucket_for(late));
        assert_ne!(window.bucket_for(early), window.bucket_for(next));
    }

    #[test]
    fn sub_second_remainder_rounds_up() {
        let window = thirty_minutes();
        let almost_end = DateTime::from_timestamp_millis(1_800_000 - 1).unwrap_or_default();
        assert_eq!(window.retry_after_seconds(almost_end), 1);
    }

    proptest! {
        #[test]
        fn bucket_contains_instant_and_retry_is_bounded(millis in 0_i64..4_000_000_000_000) {
            let window = thirty_minutes();
            let now = DateTime::from_timestamp_millis(millis).unwrap_or_default();
            let bucket = window.bucket_for(now);

            prop_assert!(bucket.start <= now);
            prop_assert!(now < bucket.end);
            prop_assert_eq!(bucket.start.timestamp_millis() % 1_800_000, 0);

            let retry = window.retry_after_seconds(now);
            prop_assert!(retry > 0);
            prop_assert!(retry <= 1_800);
        }
    }
}
