use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use fintrack_core::AppError;
use serde::{Deserialize, Serialize};

/// Calendar month used to bucket transactions and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month from a year and a one-based month number.
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(AppError::Validation(format!(
                "invalid month {year:04}-{month:02}"
            )));
        }

        Ok(Self { year, month })
    }

    /// Returns the month that contains the given date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the one-based month number.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month (inclusive lower bound).
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month (exclusive upper bound).
    #[must_use]
    pub fn next_first_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    /// Returns whether the date falls inside this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.next_first_day()
    }

    /// UTC instant bounds `[start, end)` of the month.
    #[must_use]
    pub fn utc_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.first_day().and_time(chrono::NaiveTime::MIN).and_utc(),
            self.next_first_day()
                .and_time(chrono::NaiveTime::MIN)
                .and_utc(),
        )
    }
}

impl Display for Month {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Validation(format!("month must use YYYY-MM format, got '{value}'"));

        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.to_string()
    }
}
