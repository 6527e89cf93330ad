use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::AppError;
use uuid::Uuid;

/// Parses a UUID supplied by the client, naming the offending field.
pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::Validation(format!("{field} must be a UUID, got '{value}'")))
}

/// Parses an optional value, treating blank strings as absent.
pub fn parse_optional<T>(
    value: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, AppError>,
) -> Result<Option<T>, AppError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => parse(value).map(Some),
        _ => Ok(None),
    }
}

pub(super) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("{field} must use YYYY-MM-DD format, got '{value}'"))
    })
}

pub(super) fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            AppError::Validation(format!("{field} must be an RFC 3339 timestamp, got '{value}'"))
        })
}

pub(super) fn parse_enum<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = AppError>,
{
    value.trim().parse()
}
