use std::sync::Arc;

use fintrack_core::{AppError, AppResult, ConflictReason, UserIdentity};
use fintrack_domain::{Category, CategoryName, TransactionKind};
use uuid::Uuid;

use crate::finance_ports::{CategoryRepository, CreateCategoryInput};

/// Application service for transaction categories.
#[derive(Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    #[must_use]
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Lists system categories plus the actor's own.
    pub async fn list_categories(
        &self,
        actor: &UserIdentity,
        kind: Option<TransactionKind>,
    ) -> AppResult<Vec<Category>> {
        self.repository.list_visible(actor.user_id(), kind).await
    }

    /// Creates a category owned by the actor.
    pub async fn create_category(
        &self,
        actor: &UserIdentity,
        input: CreateCategoryInput,
    ) -> AppResult<Category> {
        let name = CategoryName::new(input.name)?;

        let duplicate = self
            .repository
            .list_visible(actor.user_id(), Some(input.kind))
            .await?
            .into_iter()
            .any(|existing| existing.name.as_str().eq_ignore_ascii_case(name.as_str()));
        if duplicate {
            return Err(AppError::Validation(format!(
                "a {} category named '{}' already exists",
                input.kind.as_str(),
                name.as_str()
            )));
        }

        let category = Category {
            id: Uuid::new_v4(),
            user_id: Some(actor.user_id()),
            name,
            kind: input.kind,
        };
        self.repository.save(category.clone()).await?;

        Ok(category)
    }

    /// Deletes one of the actor's own categories.
    pub async fn delete_category(&self, actor: &UserIdentity, category_id: Uuid) -> AppResult<()> {
        let category = self
            .repository
            .find_visible(actor.user_id(), category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category '{category_id}' not found")))?;

        if category.is_system() {
            return Err(AppError::Forbidden(
                "built-in categories cannot be deleted".to_owned(),
            ));
        }

        if self
            .repository
            .is_in_use(actor.user_id(), category_id)
            .await?
        {
            return Err(AppError::Conflict(ConflictReason::CategoryInUse));
        }

        if !self
            .repository
            .delete_owned(actor.user_id(), category_id)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "category '{category_id}' not found"
            )));
        }

        Ok(())
    }
}
