use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fintrack_application::GoalRepository;
use fintrack_core::{AppError, AppResult, UserId};
use fintrack_domain::{Goal, GoalEvent, GoalName, Money};

use crate::stored_values::parse_stored;

const GOAL_COLUMNS: &str = r#"
    id,
    user_id,
    name,
    target_amount_cents,
    current_amount_cents,
    deadline,
    is_priority,
    status,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed repository for savings goals and their events.
#[derive(Clone)]
pub struct PostgresGoalRepository {
    pool: PgPool,
}

impl PostgresGoalRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GoalRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    target_amount_cents: i64,
    current_amount_cents: i64,
    deadline: Option<NaiveDate>,
    is_priority: bool,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GoalRow> for Goal {
    type Error = AppError;

    fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            name: GoalName::new(row.name)?,
            target_amount: Money::from_cents(row.target_amount_cents),
            current_amount: Money::from_cents(row.current_amount_cents),
            deadline: row.deadline,
            is_priority: row.is_priority,
            status: parse_stored("goal status", &row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct GoalEventRow {
    id: Uuid,
    goal_id: Uuid,
    user_id: Uuid,
    kind: String,
    amount_cents: i64,
    note: Option<String>,
    occurred_at: DateTime<Utc>,
}

impl TryFrom<GoalEventRow> for GoalEvent {
    type Error = AppError;

    fn try_from(row: GoalEventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            goal_id: row.goal_id,
            user_id: UserId::from_uuid(row.user_id),
            kind: parse_stored("goal event kind", &row.kind)?,
            amount: Money::from_cents(row.amount_cents),
            note: row.note,
            occurred_at: row.occurred_at,
        })
    }
}

fn internal(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |error| AppError::Internal(format!("failed to {action}: {error}"))
}

#[async_trait]
impl GoalRepository for PostgresGoalRepository {
    async fn list(&self, user_id: UserId, include_archived: bool) -> AppResult<Vec<Goal>> {
        let rows = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            SELECT {GOAL_COLUMNS}
            FROM goals
            WHERE user_id = $1
                AND ($2 OR status = 'active')
            ORDER BY is_priority DESC, created_at DESC, id DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(include_archived)
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list goals"))?;

        rows.into_iter().map(Goal::try_from).collect()
    }

    async fn find(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Option<Goal>> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = $1 AND id = $2"
        ))
        .bind(user_id.as_uuid())
        .bind(goal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("find goal"))?;

        row.map(Goal::try_from).transpose()
    }

    async fn insert(&self, goal: Goal) -> AppResult<Goal> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(internal("begin transaction"))?;

        if goal.is_priority {
            sqlx::query(
                r#"
                UPDATE goals
                SET is_priority = false, updated_at = now()
                WHERE user_id = $1 AND is_priority
                "#,
            )
            .bind(goal.user_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(internal("clear priority goal"))?;
        }

        let row = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            INSERT INTO goals (
                id,
                user_id,
                name,
                target_amount_cents,
                current_amount_cents,
                deadline,
                is_priority,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(goal.id)
        .bind(goal.user_id.as_uuid())
        .bind(goal.name.as_str())
        .bind(goal.target_amount.cents())
        .bind(goal.current_amount.cents())
        .bind(goal.deadline)
        .bind(goal.is_priority)
        .bind(goal.status.as_str())
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .fetch_one(&mut *transaction)
        .await
        .map_err(internal("insert goal"))?;

        transaction
            .commit()
            .await
            .map_err(internal("commit transaction"))?;

        Goal::try_from(row)
    }

    async fn update_details(
        &self,
        user_id: UserId,
        goal_id: Uuid,
        name: GoalName,
        target_amount: Money,
        deadline: Option<NaiveDate>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Goal>> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            UPDATE goals
            SET name = $3, target_amount_cents = $4, deadline = $5, updated_at = $6
            WHERE user_id = $1 AND id = $2 AND status = 'active'
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(goal_id)
        .bind(name.as_str())
        .bind(target_amount.cents())
        .bind(deadline)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("update goal"))?;

        row.map(Goal::try_from).transpose()
    }

    async fn set_priority(
        &self,
        user_id: UserId,
        goal_id: Uuid,
        is_priority: bool,
    ) -> AppResult<Option<Goal>> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(internal("begin transaction"))?;

        let locked = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM goals
            WHERE user_id = $1 AND id = $2 AND status = 'active'
            FOR UPDATE
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(goal_id)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(internal("lock goal"))?;

        if locked.is_none() {
            return Ok(None);
        }

        if is_priority {
            sqlx::query(
                r#"
                UPDATE goals
                SET is_priority = false, updated_at = now()
                WHERE user_id = $1 AND is_priority AND id <> $2
                "#,
            )
            .bind(user_id.as_uuid())
            .bind(goal_id)
            .execute(&mut *transaction)
            .await
            .map_err(internal("clear priority goal"))?;
        }

        let row = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            UPDATE goals
            SET is_priority = $3, updated_at = now()
            WHERE user_id = $1 AND id = $2
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(goal_id)
        .bind(is_priority)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(internal("set goal priority"))?;

        transaction
            .commit()
            .await
            .map_err(internal("commit transaction"))?;

        row.map(Goal::try_from).transpose()
    }

    async fn archive(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Option<Goal>> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            UPDATE goals
            SET status = 'archived', updated_at = now()
            WHERE user_id = $1 AND id = $2 AND status = 'active' AND NOT is_priority
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(goal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("archive goal"))?;

        row.map(Goal::try_from).transpose()
    }

    async fn record_event(&self, event: GoalEvent) -> AppResult<Option<Goal>> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(internal("begin transaction"))?;

        // Balance check and update happen in one statement.
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            UPDATE goals
            SET current_amount_cents = current_amount_cents + $3, updated_at = now()
            WHERE user_id = $1
                AND id = $2
                AND status = 'active'
                AND current_amount_cents + $3 >= 0
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(event.user_id.as_uuid())
        .bind(event.goal_id)
        .bind(event.signed_amount().cents())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(internal("apply goal event"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO goal_events (id, goal_id, user_id, kind, amount_cents, note, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id)
        .bind(event.goal_id)
        .bind(event.user_id.as_uuid())
        .bind(event.kind.as_str())
        .bind(event.amount.cents())
        .bind(event.note.as_deref())
        .bind(event.occurred_at)
        .execute(&mut *transaction)
        .await
        .map_err(internal("insert goal event"))?;

        transaction
            .commit()
            .await
            .map_err(internal("commit transaction"))?;

        Goal::try_from(row).map(Some)
    }

    async fn list_events(&self, user_id: UserId, goal_id: Uuid) -> AppResult<Vec<GoalEvent>> {
        let rows = sqlx::query_as::<_, GoalEventRow>(
            r#"
            SELECT id, goal_id, user_id, kind, amount_cents, note, occurred_at
            FROM goal_events
            WHERE user_id = $1 AND goal_id = $2
            ORDER BY occurred_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(goal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list goal events"))?;

        rows.into_iter().map(GoalEvent::try_from).collect()
    }

    async fn list_events_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<GoalEvent>> {
        let rows = sqlx::query_as::<_, GoalEventRow>(
            r#"
            SELECT id, goal_id, user_id, kind, amount_cents, note, occurred_at
            FROM goal_events
            WHERE user_id = $1 AND occurred_at >= $2 AND occurred_at < $3
            ORDER BY occurred_at, id
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list goal events"))?;

        rows.into_iter().map(GoalEvent::try_from).collect()
    }
}
