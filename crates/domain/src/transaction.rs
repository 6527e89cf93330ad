use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::{AppError, AppResult, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, Money};

/// Maximum length of a transaction description, in characters.
pub const TRANSACTION_DESCRIPTION_MAX_LENGTH: usize = 200;

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(AppError::Validation(format!(
                "unknown transaction type '{value}'"
            ))),
        }
    }
}

/// Persisted income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable transaction identifier.
    pub id: Uuid,
    /// Owner of the transaction.
    pub user_id: UserId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Positive amount.
    pub amount: Money,
    /// Category the transaction is filed under.
    pub category_id: Uuid,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Calendar date the money moved.
    pub occurred_on: NaiveDate,
    /// Client-supplied key used to deduplicate retried submissions.
    pub idempotency_key: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated transaction fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    kind: TransactionKind,
    amount: Money,
    category_id: Uuid,
    description: Option<String>,
    occurred_on: NaiveDate,
}

impl TransactionDraft {
    /// Validates raw transaction input.
    pub fn new(
        kind: TransactionKind,
        amount_cents: i64,
        category_id: Uuid,
        description: Option<String>,
        occurred_on: NaiveDate,
    ) -> AppResult<Self> {
        Ok(Self {
            kind,
            amount: Money::positive(amount_cents)?,
            category_id,
            description: normalize_description(description)?,
            occurred_on,
        })
    }

    /// Ensures the category is usable for this transaction.
    ///
    /// The category must be visible to the owner and of the same kind.
    pub fn ensure_category(&self, owner: UserId, category: &Category) -> AppResult<()> {
        if category.id != self.category_id || !category.is_visible_to(owner) {
            return Err(AppError::Validation(format!(
                "category '{}' does not exist",
                self.category_id
            )));
        }

        if category.kind != self.kind {
            return Err(AppError::Validation(format!(
                "category '{}' is for {} transactions, not {}",
                category.name.as_str(),
                category.kind.as_str(),
                self.kind.as_str()
            )));
        }

        Ok(())
    }

    /// Returns the transaction kind.
    #[must_use]
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Returns the validated amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the category identifier.
    #[must_use]
    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    /// Returns the trimmed description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the occurrence date.
    #[must_use]
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }
}

/// Trims a description, maps blank values to `None`, and enforces the length cap.
pub fn normalize_description(value: Option<String>) -> AppResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > TRANSACTION_DESCRIPTION_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "description must not exceed {TRANSACTION_DESCRIPTION_MAX_LENGTH} characters"
        )));
    }

    Ok(Some(trimmed.to_owned()))
}
