//! Shared primitives for all Rust crates in fintrack.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use auth::UserIdentity;

/// Result type used across fintrack crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// User identifier used as the owner key for every persisted resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Reasons a write can conflict with existing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    /// The goal is the owner's priority goal and cannot be archived.
    GoalIsPriority,
    /// The goal is archived and no longer accepts changes.
    GoalArchived,
    /// A withdrawal exceeds the goal's current balance.
    InsufficientGoalBalance,
    /// The category is still referenced by transactions.
    CategoryInUse,
}

impl ConflictReason {
    /// Returns the stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::GoalIsPriority => "goal_is_priority",
            Self::GoalArchived => "goal_archived",
            Self::InsufficientGoalBalance => "insufficient_goal_balance",
            Self::CategoryInUse => "category_in_use",
        }
    }

    /// Returns a human-readable description.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::GoalIsPriority => "a priority goal cannot be archived; clear its priority first",
            Self::GoalArchived => "archived goals cannot be modified",
            Self::InsufficientGoalBalance => "withdrawal exceeds the goal's current balance",
            Self::CategoryInUse => "category is still used by transactions",
        }
    }
}

impl Display for ConflictReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.message())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(ConflictReason),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Pagination token could not be decoded.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    /// Action denied by a rate limit.
    #[error("rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited {
        /// Seconds until the current window closes.
        retry_after_seconds: i64,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
