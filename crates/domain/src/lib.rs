//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod category;
mod email;
mod goal;
mod money;
mod month;
mod rate_limit;
mod transaction;

pub use audit::{AuditAction, AuditEntityType, AuditLogEntry};
pub use category::{CATEGORY_NAME_MAX_LENGTH, Category, CategoryName};
pub use email::EmailAddress;
pub use goal::{GOAL_NAME_MAX_LENGTH, Goal, GoalEvent, GoalEventKind, GoalName, GoalStatus};
pub use money::{MAX_AMOUNT_CENTS, Money};
pub use month::Month;
pub use rate_limit::{FixedWindow, RateLimitScope, WindowBounds};
pub use transaction::{
    TRANSACTION_DESCRIPTION_MAX_LENGTH, Transaction, TransactionDraft, TransactionKind,
    normalize_description,
};
