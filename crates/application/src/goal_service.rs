use std::sync::Arc;

use chrono::Utc;
use fintrack_core::{AppError, AppResult, UserIdentity};
use fintrack_domain::{Goal, GoalEvent, GoalName, GoalStatus, Money, normalize_description};
use tracing::info;
use uuid::Uuid;

use crate::finance_ports::{CreateGoalInput, GoalRepository, RecordGoalEventInput, UpdateGoalInput};

/// Application service for savings goals and their deposit/withdraw events.
#[derive(Clone)]
pub struct GoalService {
    repository: Arc<dyn GoalRepository>,
}

impl GoalService {
    /// Creates a new goal service.
    #[must_use]
    pub fn new(repository: Arc<dyn GoalRepository>) -> Self {
        Self { repository }
    }

    /// Lists the actor's goals.
    pub async fn list_goals(
        &self,
        actor: &UserIdentity,
        include_archived: bool,
    ) -> AppResult<Vec<Goal>> {
        self.repository
            .list(actor.user_id(), include_archived)
            .await
    }

    /// Returns one of the actor's goals.
    pub async fn get_goal(&self, actor: &UserIdentity, goal_id: Uuid) -> AppResult<Goal> {
        self.repository
            .find(actor.user_id(), goal_id)
            .await?
            .ok_or_else(|| not_found(goal_id))
    }

    /// Creates a goal with a zero balance.
    pub async fn create_goal(&self, actor: &UserIdentity, input: CreateGoalInput) -> AppResult<Goal> {
        let now = Utc::now();
        let goal = Goal {
            id: Uuid::new_v4(),
            user_id: actor.user_id(),
            name: GoalName::new(input.name)?,
            target_amount: Money::positive(input.target_amount_cents)?,
            current_amount: Money::ZERO,
            deadline: input.deadline,
            is_priority: input.is_priority,
            status: GoalStatus::Active,
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(goal).await
    }

    /// Updates name, target and deadline of an active goal.
    pub async fn update_goal(
        &self,
        actor: &UserIdentity,
        goal_id: Uuid,
        input: UpdateGoalInput,
    ) -> AppResult<Goal> {
        let name = GoalName::new(input.name)?;
        let target_amount = Money::positive(input.target_amount_cents)?;
        self.get_goal(actor, goal_id).await?.ensure_active()?;

        match self
            .repository
            .update_details(
                actor.user_id(),
                goal_id,
                name,
                target_amount,
                input.deadline,
                Utc::now(),
            )
            .await?
        {
            Some(goal) => Ok(goal),
            None => Err(self.diagnose(actor, goal_id, Goal::ensure_active).await),
        }
    }

    /// Marks or unmarks the goal as the actor's priority goal.
    pub async fn set_priority(
        &self,
        actor: &UserIdentity,
        goal_id: Uuid,
        is_priority: bool,
    ) -> AppResult<Goal> {
        self.get_goal(actor, goal_id).await?.ensure_active()?;

        match self
            .repository
            .set_priority(actor.user_id(), goal_id, is_priority)
            .await?
        {
            Some(goal) => Ok(goal),
            None => Err(self.diagnose(actor, goal_id, Goal::ensure_active).await),
        }
    }

    /// Archives a goal. Priority goals must be deprioritised first.
    pub async fn archive_goal(&self, actor: &UserIdentity, goal_id: Uuid) -> AppResult<Goal> {
        self.get_goal(actor, goal_id).await?.ensure_archivable()?;

        match self.repository.archive(actor.user_id(), goal_id).await? {
            Some(goal) => {
                info!(goal_id = %goal.id, "goal archived");
                Ok(goal)
            }
            None => Err(self.diagnose(actor, goal_id, Goal::ensure_archivable).await),
        }
    }

    /// Records a deposit or withdrawal and returns the updated goal.
    pub async fn record_goal_event(
        &self,
        actor: &UserIdentity,
        goal_id: Uuid,
        input: RecordGoalEventInput,
    ) -> AppResult<(Goal, GoalEvent)> {
        let amount = Money::positive(input.amount_cents)?;
        let note = normalize_description(input.note)?;
        let goal = self.get_goal(actor, goal_id).await?;
        goal.balance_after(input.kind, amount)?;

        let event = GoalEvent {
            id: Uuid::new_v4(),
            goal_id,
            user_id: actor.user_id(),
            kind: input.kind,
            amount,
            note,
            occurred_at: input.occurred_at.unwrap_or_else(Utc::now),
        };

        match self.repository.record_event(event.clone()).await? {
            Some(goal) => Ok((goal, event)),
            None => Err(self.diagnose_event(actor, goal_id, &event).await),
        }
    }

    /// Lists a goal's events, newest first.
    pub async fn list_goal_events(
        &self,
        actor: &UserIdentity,
        goal_id: Uuid,
    ) -> AppResult<Vec<GoalEvent>> {
        self.get_goal(actor, goal_id).await?;
        self.repository.list_events(actor.user_id(), goal_id).await
    }

    /// Explains why a conditional write matched no row after the pre-check
    /// passed, i.e. the goal changed concurrently.
    async fn diagnose(
        &self,
        actor: &UserIdentity,
        goal_id: Uuid,
        precondition: fn(&Goal) -> AppResult<()>,
    ) -> AppError {
        match self.get_goal(actor, goal_id).await {
            Ok(goal) => match precondition(&goal) {
                Err(error) => error,
                Ok(()) => AppError::Internal(format!("goal '{goal_id}' changed concurrently")),
            },
            Err(error) => error,
        }
    }

    async fn diagnose_event(
        &self,
        actor: &UserIdentity,
        goal_id: Uuid,
        event: &GoalEvent,
    ) -> AppError {
        match self.get_goal(actor, goal_id).await {
            Ok(goal) => match goal.balance_after(event.kind, event.amount) {
                Err(error) => error,
                Ok(_) => AppError::Internal(format!("goal '{goal_id}' changed concurrently")),
            },
            Err(error) => error,
        }
    }
}

fn not_found(goal_id: Uuid) -> AppError {
    AppError::NotFound(format!("goal '{goal_id}' not found"))
}
