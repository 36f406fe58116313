//! # Category Repository
//!
//! Database operations for product categories.
//!
//! Categories have their own lifecycle. Products point at them through
//! `category_id`, and the schema refuses to delete a category that is still
//! referenced (`ON DELETE RESTRICT`).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult, DbResultExt};
use kasir_core::validation::{validate_category_name, validate_description};
use kasir_core::{Category, CategoryInput};

/// Repository for category database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CategoryRepository::new(pool);
///
/// let snacks = repo.create(&CategoryInput {
///     name: "Snacks".into(),
///     description: "Chips and crackers".into(),
/// }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Category>> {
        debug!("Listing categories");

        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("get_all_categories")?;

        debug!(count = categories.len(), "Categories loaded");
        Ok(categories)
    }

    /// Gets a category by its id.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Category found
    /// * `Err(DbError::NotFound)` - No such id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Category> {
        debug!(id = %id, "Fetching category");

        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("get_category")?
            .ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Inserts a new category and returns it with its assigned id.
    pub async fn create(&self, input: &CategoryInput) -> DbResult<Category> {
        validate_category_name(&input.name)?;
        validate_description(&input.description)?;

        debug!(name = %input.name, "Inserting category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .context("create_category")?;

        Ok(category)
    }

    /// Replaces name and description of an existing category.
    ///
    /// ## Errors
    /// `DbError::NotFound` when no row has this id.
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        validate_category_name(&input.name)?;
        validate_description(&input.description)?;

        debug!(id = %id, "Updating category");

        let result = sqlx::query("UPDATE categories SET name = ?2, description = ?3 WHERE id = ?1")
            .bind(id)
            .bind(input.name.trim())
            .bind(&input.description)
            .execute(&self.pool)
            .await
            .context("update_category")?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(Category {
            id,
            name: input.name.trim().to_string(),
            description: input.description.clone(),
        })
    }

    /// Deletes a category.
    ///
    /// ## Errors
    /// - `DbError::NotFound` when no row has this id
    /// - `DbError::ForeignKeyViolation` while products still use it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete_category")
            .map_err(|e| match e {
                DbError::ForeignKeyViolation { .. } => DbError::ForeignKeyViolation {
                    message: format!("category id {} is still used by products", id),
                },
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn input(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: format!("{} aisle", name),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let created = repo.create(&input("Minuman")).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.description, "Minuman aisle");
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        repo.create(&input("Snacks")).await.unwrap();
        repo.create(&input("Drinks")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Snacks", "Drinks"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let err = repo.update(99, &input("Ghost")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete(99).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.get_by_id(99).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let created = repo.create(&input("Snack")).await.unwrap();
        let updated = repo
            .update(
                created.id,
                &CategoryInput {
                    name: "Snacks".to_string(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), updated);
        assert_eq!(updated.description, "");
    }

    #[tokio::test]
    async fn test_delete_referenced_category_is_refused() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let category = repo.create(&input("Drinks")).await.unwrap();
        db.execute(&format!(
            "INSERT INTO products (name, price, stock, category_id) VALUES ('Aqua', 4000, 5, {})",
            category.id
        ))
        .await
        .unwrap();

        let err = repo.delete(category.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(repo.get_by_id(category.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.categories().create(&input("   ")).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
