//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_service;
mod category_service;
mod finance_ports;
mod goal_service;
mod metrics_service;
mod password_reset_service;
mod rate_limit_service;
mod transaction_service;

#[cfg(test)]
mod test_fakes;

pub use audit_log_service::{
    AuditCursor, AuditLogFilter, AuditLogListQuery, AuditLogPage, AuditLogPredicate,
    AuditLogRepository, AuditLogService, CursorDecodeError, DEFAULT_AUDIT_PAGE_LIMIT,
    MAX_AUDIT_PAGE_LIMIT,
};
pub use category_service::CategoryService;
pub use finance_ports::{
    CategoryRepository, CreateCategoryInput, CreateGoalInput, CreateTransactionInput,
    GoalRepository, RecordGoalEventInput, TransactionListQuery, TransactionRepository,
    UpdateGoalInput, UpdateTransactionInput,
};
pub use goal_service::GoalService;
pub use metrics_service::{CategoryBreakdown, CategoryShare, MetricsService, MonthlyMetrics};
pub use password_reset_service::{EmailService, PasswordResetService};
pub use rate_limit_service::{
    DEFAULT_PASSWORD_RESET_MAX_ATTEMPTS, DEFAULT_PASSWORD_RESET_WINDOW_SECONDS, RateLimitDecision,
    RateLimitRepository, RateLimitRule, RateLimitService,
};
pub use transaction_service::TransactionService;
