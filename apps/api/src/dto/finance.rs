mod conversions;
mod types;

pub use types::{
    CategoryBreakdownResponse, CategoryResponse, CategoryShareResponse, CreateCategoryRequest,
    CreateGoalRequest, CreateTransactionRequest, GoalEventResponse, GoalResponse,
    MonthlyMetricsResponse, RecordGoalEventRequest, RecordGoalEventResponse,
    SetGoalPriorityRequest, TransactionResponse, UpdateGoalRequest, UpdateTransactionRequest,
};
