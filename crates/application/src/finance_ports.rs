//! Repository ports and inputs for categories, transactions and goals.

mod categories;
mod goals;
mod transactions;

pub use categories::{CategoryRepository, CreateCategoryInput};
pub use goals::{CreateGoalInput, GoalRepository, RecordGoalEventInput, UpdateGoalInput};
pub use transactions::{
    CreateTransactionInput, TransactionListQuery, TransactionRepository, UpdateTransactionInput,
};
