use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/category-response.ts"
)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub is_system: bool,
}

/// Incoming payload for category creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-category-request.ts"
)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub kind: String,
}

/// API representation of a transaction. Amounts are integer cents.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/transaction-response.ts"
)]
pub struct TransactionResponse {
    pub id: String,
    pub kind: String,
    #[ts(type = "number")]
    pub amount_cents: i64,
    pub category_id: String,
    pub description: Option<String>,
    pub occurred_on: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Incoming payload for transaction creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-transaction-request.ts"
)]
pub struct CreateTransactionRequest {
    pub kind: String,
    #[ts(type = "number")]
    pub amount_cents: i64,
    pub category_id: String,
    pub description: Option<String>,
    pub occurred_on: String,
    pub idempotency_key: Option<String>,
}

/// Incoming payload for transaction updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-transaction-request.ts"
)]
pub struct UpdateTransactionRequest {
    pub kind: String,
    #[ts(type = "number")]
    pub amount_cents: i64,
    pub category_id: String,
    pub description: Option<String>,
    pub occurred_on: String,
}

/// API representation of a savings goal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/goal-response.ts"
)]
pub struct GoalResponse {
    pub id: String,
    pub name: String,
    #[ts(type = "number")]
    pub target_amount_cents: i64,
    #[ts(type = "number")]
    pub current_amount_cents: i64,
    pub deadline: Option<String>,
    pub is_priority: bool,
    pub status: String,
    pub progress_percent: u8,
    pub created_at: String,
    pub updated_at: String,
}

/// Incoming payload for goal creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-goal-request.ts"
)]
pub struct CreateGoalRequest {
    pub name: String,
    #[ts(type = "number")]
    pub target_amount_cents: i64,
    pub deadline: Option<String>,
    #[serde(default)]
    pub is_priority: bool,
}

/// Incoming payload for goal updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-goal-request.ts"
)]
pub struct UpdateGoalRequest {
    pub name: String,
    #[ts(type = "number")]
    pub target_amount_cents: i64,
    pub deadline: Option<String>,
}

/// Incoming payload for setting or clearing the priority flag.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-goal-priority-request.ts"
)]
pub struct SetGoalPriorityRequest {
    pub is_priority: bool,
}

/// API representation of a deposit or withdrawal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/goal-event-response.ts"
)]
pub struct GoalEventResponse {
    pub id: String,
    pub goal_id: String,
    pub kind: String,
    #[ts(type = "number")]
    pub amount_cents: i64,
    pub note: Option<String>,
    pub occurred_at: String,
}

/// Incoming payload for recording a deposit or withdrawal.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/record-goal-event-request.ts"
)]
pub struct RecordGoalEventRequest {
    pub kind: String,
    #[ts(type = "number")]
    pub amount_cents: i64,
    pub note: Option<String>,
    pub occurred_at: Option<String>,
}

/// Goal balance after an event together with the stored event.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/record-goal-event-response.ts"
)]
pub struct RecordGoalEventResponse {
    pub goal: GoalResponse,
    pub event: GoalEventResponse,
}

/// Cash-flow summary for one month.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/monthly-metrics-response.ts"
)]
pub struct MonthlyMetricsResponse {
    pub month: String,
    #[ts(type = "number")]
    pub income_cents: i64,
    #[ts(type = "number")]
    pub expenses_cents: i64,
    #[ts(type = "number")]
    pub net_saved_cents: i64,
    #[ts(type = "number")]
    pub free_cash_flow_cents: i64,
    #[ts(type = "number")]
    pub transaction_count: usize,
}

/// Expense share of one category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/category-share-response.ts"
)]
pub struct CategoryShareResponse {
    pub category_id: String,
    pub category_name: String,
    #[ts(type = "number")]
    pub amount_cents: i64,
    pub percentage: f64,
    #[ts(type = "number")]
    pub transaction_count: usize,
}

/// Expenses for one month grouped by category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/category-breakdown-response.ts"
)]
pub struct CategoryBreakdownResponse {
    pub month: String,
    #[ts(type = "number")]
    pub total_expenses_cents: i64,
    pub categories: Vec<CategoryShareResponse>,
}
