use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fintrack_application::CategoryRepository;
use fintrack_core::{AppError, AppResult, ConflictReason, UserId};
use fintrack_domain::{Category, CategoryName, TransactionKind};

use crate::stored_values::{is_foreign_key_violation, is_unique_violation, parse_stored};

/// PostgreSQL-backed repository for system and user categories.
#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: Uuid,
    user_id: Option<Uuid>,
    name: String,
    kind: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = AppError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id.map(UserId::from_uuid),
            name: CategoryName::new(row.name)?,
            kind: parse_stored("category kind", &row.kind)?,
        })
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_visible(
        &self,
        user_id: UserId,
        kind: Option<TransactionKind>,
    ) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, user_id, name, kind
            FROM categories
            WHERE (user_id IS NULL OR user_id = $1)
                AND ($2::TEXT IS NULL OR kind = $2)
            ORDER BY user_id NULLS FIRST, lower(name)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(kind.map(|kind| kind.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list categories: {error}")))?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn find_visible(
        &self,
        user_id: UserId,
        category_id: Uuid,
    ) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, user_id, name, kind
            FROM categories
            WHERE id = $2
                AND (user_id IS NULL OR user_id = $1)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find category: {error}")))?;

        row.map(Category::try_from).transpose()
    }

    async fn save(&self, category: Category) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, user_id, name, kind)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(category.id)
        .bind(category.user_id.map(|user_id| user_id.as_uuid()))
        .bind(category.name.as_str())
        .bind(category.kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Validation(format!(
                    "category '{}' already exists",
                    category.name.as_str()
                ));
            }
            AppError::Internal(format!("failed to save category: {error}"))
        })?;

        Ok(())
    }

    async fn is_in_use(&self, user_id: UserId, category_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM transactions
                WHERE user_id = $1 AND category_id = $2
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to check category usage: {error}")))
    }

    async fn delete_owned(&self, user_id: UserId, category_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $2 AND user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(category_id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                return AppError::Conflict(ConflictReason::CategoryInUse);
            }
            AppError::Internal(format!("failed to delete category: {error}"))
        })?;

        Ok(result.rows_affected() > 0)
    }
}
