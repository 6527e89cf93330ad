mod audit;
mod common;
mod finance;
mod parsing;

pub use audit::{AuditLogEntryResponse, AuditLogPageResponse, AuditLogPaginationResponse};
pub use common::{
    ForgotPasswordRequest, GenericMessageResponse, HealthDependencyStatus, HealthResponse,
    OpenSessionRequest, UserIdentityResponse,
};
pub use finance::{
    CategoryBreakdownResponse, CategoryResponse, CategoryShareResponse, CreateCategoryRequest,
    CreateGoalRequest, CreateTransactionRequest, GoalEventResponse, GoalResponse,
    MonthlyMetricsResponse, RecordGoalEventRequest, RecordGoalEventResponse,
    SetGoalPriorityRequest, TransactionResponse, UpdateGoalRequest, UpdateTransactionRequest,
};
pub use parsing::{parse_optional, parse_uuid};
