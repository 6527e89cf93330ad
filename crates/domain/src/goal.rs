use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::{AppError, AppResult, ConflictReason, NonEmptyString, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

/// Maximum length of a goal name, in characters.
pub const GOAL_NAME_MAX_LENGTH: usize = 100;

/// Validated goal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalName(NonEmptyString);

impl GoalName {
    /// Creates a validated goal name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = NonEmptyString::new(value)?;
        if value.as_str().chars().count() > GOAL_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "goal name must not exceed {GOAL_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Lifecycle state of a savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Accepting deposits and withdrawals.
    Active,
    /// Frozen; kept for history only.
    Archived,
}

impl GoalStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(AppError::Validation(format!(
                "unknown goal status '{value}'"
            ))),
        }
    }
}

/// Savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Stable goal identifier.
    pub id: Uuid,
    /// Owner of the goal.
    pub user_id: UserId,
    /// Display name.
    pub name: GoalName,
    /// Amount the owner wants to reach.
    pub target_amount: Money,
    /// Balance after all deposits and withdrawals.
    pub current_amount: Money,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
    /// Whether this is the owner's priority goal.
    pub is_priority: bool,
    /// Lifecycle state.
    pub status: GoalStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Fails with [`ConflictReason::GoalArchived`] unless the goal is active.
    pub fn ensure_active(&self) -> AppResult<()> {
        match self.status {
            GoalStatus::Active => Ok(()),
            GoalStatus::Archived => Err(AppError::Conflict(ConflictReason::GoalArchived)),
        }
    }

    /// Checks that the goal may be archived.
    pub fn ensure_archivable(&self) -> AppResult<()> {
        self.ensure_active()?;
        if self.is_priority {
            return Err(AppError::Conflict(ConflictReason::GoalIsPriority));
        }

        Ok(())
    }

    /// Returns the balance after applying an event, without mutating the goal.
    pub fn balance_after(&self, kind: GoalEventKind, amount: Money) -> AppResult<Money> {
        self.ensure_active()?;
        match kind {
            GoalEventKind::Deposit => Ok(self.current_amount + amount),
            GoalEventKind::Withdraw if amount > self.current_amount => Err(AppError::Conflict(
                ConflictReason::InsufficientGoalBalance,
            )),
            GoalEventKind::Withdraw => Ok(self.current_amount - amount),
        }
    }

    /// Share of the target reached, capped at 100.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.target_amount.cents() <= 0 {
            return 0;
        }

        let percent = self.current_amount.cents().max(0).saturating_mul(100)
            / self.target_amount.cents();
        u8::try_from(percent.min(100)).unwrap_or(100)
    }
}

/// Direction of a goal balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalEventKind {
    /// Moves money into the goal.
    Deposit,
    /// Takes money out of the goal.
    Withdraw,
}

impl GoalEventKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl FromStr for GoalEventKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            _ => Err(AppError::Validation(format!(
                "unknown goal event type '{value}'"
            ))),
        }
    }
}

/// Deposit into or withdrawal from a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEvent {
    /// Stable event identifier.
    pub id: Uuid,
    /// Goal the event belongs to.
    pub goal_id: Uuid,
    /// Owner of the goal.
    pub user_id: UserId,
    /// Deposit or withdraw.
    pub kind: GoalEventKind,
    /// Positive amount moved.
    pub amount: Money,
    /// Optional note.
    pub note: Option<String>,
    /// When the money moved.
    pub occurred_at: DateTime<Utc>,
}

impl GoalEvent {
    /// Signed contribution of this event to the goal balance.
    #[must_use]
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            GoalEventKind::Deposit => self.amount,
            GoalEventKind::Withdraw => Money::ZERO - self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use fintrack_core::{AppError, ConflictReason, UserId};
    use uuid::Uuid;

    use super::{Goal, GoalEventKind, GoalName, GoalStatus};
    use crate::Money;

    fn goal(current: i64, is_priority: bool, status: GoalStatus) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            user_id: UserId::new(),
            name: GoalName::new("Emergency fund").unwrap_or_else(|_| unreachable!()),
            target_amount: Money::from_cents(100_000),
            current_amount: Money::from_cents(current),
            deadline: None,
            is_priority,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn priority_goal_cannot_be_archived() {
        let result = goal(0, true, GoalStatus::Active).ensure_archivable();
        assert!(matches!(
            result,
            Err(AppError::Conflict(ConflictReason::GoalIsPriority))
        ));
    }

    #[test]
    fn archived_goal_rejects_events() {
        let result = goal(500, false, GoalStatus::Archived)
            .balance_after(GoalEventKind::Deposit, Money::from_cents(100));
        assert!(matches!(
            result,
            Err(AppError::Conflict(ConflictReason::GoalArchived))
        ));
    }

    #[test]
    fn withdraw_cannot_exceed_balance() {
        let goal = goal(500, false, GoalStatus::Active);
        assert!(matches!(
            goal.balance_after(GoalEventKind::Withdraw, Money::from_cents(501)),
            Err(AppError::Conflict(ConflictReason::InsufficientGoalBalance))
        ));
        assert_eq!(
            goal.balance_after(GoalEventKind::Withdraw, Money::from_cents(500))
                .unwrap_or(Money::from_cents(-1)),
            Money::ZERO
        );
    }

    #[test]
    fn progress_is_capped() {
        assert_eq!(goal(250_000, false, GoalStatus::Active).progress_percent(), 100);
        assert_eq!(goal(25_000, false, GoalStatus::Active).progress_percent(), 25);
    }
}
