use fintrack_core::{AppError, AppResult, NonEmptyString, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TransactionKind;

/// Maximum length of a category name, in characters.
pub const CATEGORY_NAME_MAX_LENGTH: usize = 50;

/// Validated category display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(NonEmptyString);

impl CategoryName {
    /// Creates a validated category name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = NonEmptyString::new(value)?;
        if value.as_str().chars().count() > CATEGORY_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "category name must not exceed {CATEGORY_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Transaction category. System categories have no owner and are shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable category identifier.
    pub id: Uuid,
    /// Owner, or `None` for built-in categories.
    pub user_id: Option<UserId>,
    /// Display name.
    pub name: CategoryName,
    /// Kind of transactions this category accepts.
    pub kind: TransactionKind,
}

impl Category {
    /// Returns whether the category is built in.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.user_id.is_none()
    }

    /// Returns whether the user may file transactions under this category.
    #[must_use]
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.user_id.is_none_or(|owner| owner == user_id)
    }
}
