use std::fmt::Display;
use std::str::FromStr;

use fintrack_core::{AppError, AppResult};

/// Parses a text column holding an enum storage value.
pub(crate) fn parse_stored<T>(column: &str, value: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse::<T>().map_err(|error| {
        AppError::Internal(format!("invalid stored {column} '{value}': {error}"))
    })
}

/// Returns whether `error` is a PostgreSQL unique violation.
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    has_sql_state(error, "23505")
}

/// Returns whether `error` is a PostgreSQL foreign key violation.
pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    has_sql_state(error, "23503")
}

fn has_sql_state(error: &sqlx::Error, state: &str) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some(state)
    )
}
