use fintrack_application::{
    AuditLogService, CategoryService, GoalService, MetricsService, PasswordResetService,
    TransactionService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub category_service: CategoryService,
    pub transaction_service: TransactionService,
    pub goal_service: GoalService,
    pub metrics_service: MetricsService,
    pub audit_log_service: AuditLogService,
    pub password_reset_service: PasswordResetService,
    pub postgres_pool: PgPool,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
