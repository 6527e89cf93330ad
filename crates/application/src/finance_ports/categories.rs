use async_trait::async_trait;
use fintrack_core::{AppResult, UserId};
use fintrack_domain::{Category, TransactionKind};
use uuid::Uuid;

/// Input payload for user-defined category creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryInput {
    /// Display name.
    pub name: String,
    /// Kind of transactions the category accepts.
    pub kind: TransactionKind,
}

/// Repository port for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists system categories plus the user's own, optionally by kind.
    async fn list_visible(
        &self,
        user_id: UserId,
        kind: Option<TransactionKind>,
    ) -> AppResult<Vec<Category>>;

    /// Finds one category visible to the user.
    async fn find_visible(&self, user_id: UserId, category_id: Uuid)
    -> AppResult<Option<Category>>;

    /// Persists a user-defined category.
    async fn save(&self, category: Category) -> AppResult<()>;

    /// Returns whether any of the user's transactions reference the category.
    async fn is_in_use(&self, user_id: UserId, category_id: Uuid) -> AppResult<bool>;

    /// Deletes a category owned by the user. Returns whether a row was removed.
    async fn delete_owned(&self, user_id: UserId, category_id: Uuid) -> AppResult<bool>;
}
