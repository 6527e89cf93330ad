use std::sync::Arc;

use fintrack_application::{
    AuditLogService, CategoryRepository, CategoryService, GoalRepository, GoalService,
    MetricsService, PasswordResetService, RateLimitRule, RateLimitService, TransactionRepository,
    TransactionService,
};
use fintrack_core::AppError;
use fintrack_domain::RateLimitScope;
use fintrack_infrastructure::{
    PostgresAuditLogRepository, PostgresCategoryRepository, PostgresGoalRepository,
    PostgresRateLimitRepository, PostgresTransactionRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::email::build_email_service;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let category_repository: Arc<dyn CategoryRepository> =
        Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let transaction_repository: Arc<dyn TransactionRepository> =
        Arc::new(PostgresTransactionRepository::new(pool.clone()));
    let goal_repository: Arc<dyn GoalRepository> =
        Arc::new(PostgresGoalRepository::new(pool.clone()));

    let password_reset_rule = RateLimitRule::new(
        RateLimitScope::ResetPassword,
        config.password_reset_max_attempts,
        config.password_reset_window_seconds,
    )?;
    let rate_limit_service =
        RateLimitService::new(Arc::new(PostgresRateLimitRepository::new(pool.clone())));

    Ok(AppState {
        category_service: CategoryService::new(category_repository.clone()),
        transaction_service: TransactionService::new(
            transaction_repository.clone(),
            category_repository.clone(),
        ),
        goal_service: GoalService::new(goal_repository.clone()),
        metrics_service: MetricsService::new(
            transaction_repository,
            goal_repository,
            category_repository,
        ),
        audit_log_service: AuditLogService::new(Arc::new(PostgresAuditLogRepository::new(
            pool.clone(),
        ))),
        password_reset_service: PasswordResetService::new(
            rate_limit_service,
            password_reset_rule,
            build_email_service(config),
            config.frontend_url.clone(),
        ),
        postgres_pool: pool,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    })
}
