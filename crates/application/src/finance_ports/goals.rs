use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::{AppResult, UserId};
use fintrack_domain::{Goal, GoalEvent, GoalEventKind, GoalName, Money};
use uuid::Uuid;

/// Input payload for goal creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGoalInput {
    /// Display name.
    pub name: String,
    /// Target amount in minor units.
    pub target_amount_cents: i64,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
    /// Whether the new goal becomes the priority goal.
    pub is_priority: bool,
}

/// Input payload for goal detail updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGoalInput {
    /// Display name.
    pub name: String,
    /// Target amount in minor units.
    pub target_amount_cents: i64,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
}

/// Input payload for a deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGoalEventInput {
    /// Deposit or withdraw.
    pub kind: GoalEventKind,
    /// Amount in minor units.
    pub amount_cents: i64,
    /// Optional note.
    pub note: Option<String>,
    /// When the money moved; defaults to now.
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Repository port for goals and their events.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Lists the user's goals, priority goal first, then newest.
    async fn list(&self, user_id: UserId, include_archived: bool) -> AppResult<Vec<Goal>>;

    /// Finds one of the user's goals.
    async fn find(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Option<Goal>>;

    /// Inserts a goal. A priority goal clears the flag on the user's other goals.
    async fn insert(&self, goal: Goal) -> AppResult<Goal>;

    /// Replaces name, target and deadline of an active goal.
    async fn update_details(
        &self,
        user_id: UserId,
        goal_id: Uuid,
        name: GoalName,
        target_amount: Money,
        deadline: Option<NaiveDate>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Goal>>;

    /// Sets or clears the priority flag of an active goal, clearing it on
    /// every other goal of the user when set.
    async fn set_priority(
        &self,
        user_id: UserId,
        goal_id: Uuid,
        is_priority: bool,
    ) -> AppResult<Option<Goal>>;

    /// Archives an active, non-priority goal. Returns `None` if the row did
    /// not match those conditions.
    async fn archive(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Option<Goal>>;

    /// Stores an event and moves the goal balance in one atomic step.
    ///
    /// Returns `None` without storing anything when the goal is not active or
    /// a withdrawal would take the balance below zero.
    async fn record_event(&self, event: GoalEvent) -> AppResult<Option<Goal>>;

    /// Lists a goal's events, newest first.
    async fn list_events(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Vec<GoalEvent>>;

    /// Lists all of the user's goal events with `occurred_at` in `[from, to)`.
    async fn list_events_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<GoalEvent>>;
}
