//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_email_service;
mod in_memory_audit_log_repository;
mod postgres_audit_log_repository;
mod postgres_category_repository;
mod postgres_goal_repository;
mod postgres_rate_limit_repository;
mod postgres_transaction_repository;
mod stored_values;

pub use console_email_service::ConsoleEmailService;
pub use in_memory_audit_log_repository::InMemoryAuditLogRepository;
pub use postgres_audit_log_repository::PostgresAuditLogRepository;
pub use postgres_category_repository::PostgresCategoryRepository;
pub use postgres_goal_repository::PostgresGoalRepository;
pub use postgres_rate_limit_repository::PostgresRateLimitRepository;
pub use postgres_transaction_repository::PostgresTransactionRepository;
