use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Sub};

use fintrack_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Largest single amount accepted from user input (ten billion in minor units).
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000_000;

/// Monetary amount in integer minor units (cents).
///
/// Totals may be negative; user-entered amounts go through [`Money::positive`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw minor-unit value without validation.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Validates a user-entered amount: strictly positive and bounded.
    pub fn positive(cents: i64) -> AppResult<Self> {
        if cents <= 0 {
            return Err(AppError::Validation(
                "amount must be greater than zero".to_owned(),
            ));
        }

        if cents > MAX_AMOUNT_CENTS {
            return Err(AppError::Validation(format!(
                "amount must not exceed {MAX_AMOUNT_CENTS} cents"
            )));
        }

        Ok(Self(cents))
    }

    /// Returns the raw minor-unit value.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Display for Money {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let absolute = self.0.unsigned_abs();
        write!(formatter, "{sign}{}.{:02}", absolute / 100, absolute % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_AMOUNT_CENTS, Money};

    #[test]
    fn positive_rejects_zero_and_negative_amounts() {
        assert!(Money::positive(0).is_err());
        assert!(Money::positive(-5).is_err());
        assert!(Money::positive(MAX_AMOUNT_CENTS + 1).is_err());
        assert!(Money::positive(1).is_ok());
    }

    #[test]
    fn display_renders_two_decimal_places() {
        assert_eq!(Money::from_cents(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn sum_folds_from_zero() {
        let total: Money = [100, 250, -50].into_iter().map(Money::from_cents).sum();
        assert_eq!(total, Money::from_cents(300));
    }
}
