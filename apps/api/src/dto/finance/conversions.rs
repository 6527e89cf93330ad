use fintrack_application::{
    CategoryBreakdown, CategoryShare, CreateCategoryInput, CreateGoalInput,
    CreateTransactionInput, MonthlyMetrics, RecordGoalEventInput, UpdateGoalInput,
    UpdateTransactionInput,
};
use fintrack_core::AppError;
use fintrack_domain::{Category, Goal, GoalEvent, Transaction};

use super::super::parsing::{parse_date, parse_enum, parse_optional, parse_timestamp, parse_uuid};
use super::types::{
    CategoryBreakdownResponse, CategoryResponse, CategoryShareResponse, CreateCategoryRequest,
    CreateGoalRequest, CreateTransactionRequest, GoalEventResponse, GoalResponse,
    MonthlyMetricsResponse, RecordGoalEventRequest, TransactionResponse, UpdateGoalRequest,
    UpdateTransactionRequest,
};

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.to_string(),
            is_system: value.is_system(),
            name: value.name.as_str().to_owned(),
            kind: value.kind.as_str().to_owned(),
        }
    }
}

impl TryFrom<CreateCategoryRequest> for CreateCategoryInput {
    type Error = AppError;

    fn try_from(value: CreateCategoryRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            kind: parse_enum(value.kind.as_str())?,
        })
    }
}

impl From<Transaction> for TransactionResponse {
    fn from(value: Transaction) -> Self {
        Self {
            id: value.id.to_string(),
            kind: value.kind.as_str().to_owned(),
            amount_cents: value.amount.cents(),
            category_id: value.category_id.to_string(),
            description: value.description,
            occurred_on: value.occurred_on.to_string(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<CreateTransactionRequest> for CreateTransactionInput {
    type Error = AppError;

    fn try_from(value: CreateTransactionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_enum(value.kind.as_str())?,
            amount_cents: value.amount_cents,
            category_id: parse_uuid("category_id", value.category_id.as_str())?,
            description: value.description,
            occurred_on: parse_date("occurred_on", value.occurred_on.as_str())?,
            idempotency_key: parse_optional(value.idempotency_key.as_deref(), |key| {
                parse_uuid("idempotency_key", key)
            })?,
        })
    }
}

impl TryFrom<UpdateTransactionRequest> for UpdateTransactionInput {
    type Error = AppError;

    fn try_from(value: UpdateTransactionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_enum(value.kind.as_str())?,
            amount_cents: value.amount_cents,
            category_id: parse_uuid("category_id", value.category_id.as_str())?,
            description: value.description,
            occurred_on: parse_date("occurred_on", value.occurred_on.as_str())?,
        })
    }
}

impl From<Goal> for GoalResponse {
    fn from(value: Goal) -> Self {
        Self {
            id: value.id.to_string(),
            progress_percent: value.progress_percent(),
            name: value.name.as_str().to_owned(),
            target_amount_cents: value.target_amount.cents(),
            current_amount_cents: value.current_amount.cents(),
            deadline: value.deadline.map(|deadline| deadline.to_string()),
            is_priority: value.is_priority,
            status: value.status.as_str().to_owned(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<CreateGoalRequest> for CreateGoalInput {
    type Error = AppError;

    fn try_from(value: CreateGoalRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            target_amount_cents: value.target_amount_cents,
            deadline: parse_optional(value.deadline.as_deref(), |deadline| {
                parse_date("deadline", deadline)
            })?,
            is_priority: value.is_priority,
        })
    }
}

impl TryFrom<UpdateGoalRequest> for UpdateGoalInput {
    type Error = AppError;

    fn try_from(value: UpdateGoalRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            target_amount_cents: value.target_amount_cents,
            deadline: parse_optional(value.deadline.as_deref(), |deadline| {
                parse_date("deadline", deadline)
            })?,
        })
    }
}

impl From<GoalEvent> for GoalEventResponse {
    fn from(value: GoalEvent) -> Self {
        Self {
            id: value.id.to_string(),
            goal_id: value.goal_id.to_string(),
            kind: value.kind.as_str().to_owned(),
            amount_cents: value.amount.cents(),
            note: value.note,
            occurred_at: value.occurred_at.to_rfc3339(),
        }
    }
}

impl TryFrom<RecordGoalEventRequest> for RecordGoalEventInput {
    type Error = AppError;

    fn try_from(value: RecordGoalEventRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_enum(value.kind.as_str())?,
            amount_cents: value.amount_cents,
            note: value.note,
            occurred_at: parse_optional(value.occurred_at.as_deref(), |occurred_at| {
                parse_timestamp("occurred_at", occurred_at)
            })?,
        })
    }
}

impl From<MonthlyMetrics> for MonthlyMetricsResponse {
    fn from(value: MonthlyMetrics) -> Self {
        Self {
            month: value.month.to_string(),
            income_cents: value.income.cents(),
            expenses_cents: value.expenses.cents(),
            net_saved_cents: value.net_saved.cents(),
            free_cash_flow_cents: value.free_cash_flow.cents(),
            transaction_count: value.transaction_count,
        }
    }
}

impl From<CategoryShare> for CategoryShareResponse {
    fn from(value: CategoryShare) -> Self {
        Self {
            category_id: value.category_id.to_string(),
            category_name: value.category_name,
            amount_cents: value.amount.cents(),
            percentage: value.percentage,
            transaction_count: value.transaction_count,
        }
    }
}

impl From<CategoryBreakdown> for CategoryBreakdownResponse {
    fn from(value: CategoryBreakdown) -> Self {
        Self {
            month: value.month.to_string(),
            total_expenses_cents: value.total_expenses.cents(),
            categories: value
                .categories
                .into_iter()
                .map(CategoryShareResponse::from)
                .collect(),
        }
    }
}
