pub mod audit;
pub mod categories;
pub mod goals;
pub mod health;
pub mod metrics;
pub mod transactions;
