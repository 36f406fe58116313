//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Name search (case-insensitive substring)
//! - CRUD operations
//!
//! ## Category Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Every read joins the category                          │
//! │                                                                         │
//! │  products p  INNER JOIN  categories c ON c.id = p.category_id          │
//! │                                                                         │
//! │  ┌────┬────────────────┬───────┬─────┐    ┌────┬─────────┐             │
//! │  │ id │ name           │ price │ cat │    │ id │ name    │             │
//! │  ├────┼────────────────┼───────┼─────┤    ├────┼─────────┤             │
//! │  │ 1  │ Indomie Goreng │ 3500  │ 1   │──► │ 1  │ Makanan │  ✓ returned │
//! │  │ 2  │ Teh Botol      │ 5000  │ 9   │──► │ -- │ (none)  │  ✗ skipped  │
//! │  └────┴────────────────┴───────┴─────┘    └────┴─────────┘             │
//! │                                                                         │
//! │  A product whose category can't be resolved is not-found for readers.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult, DbResultExt};
use kasir_core::validation::{validate_product_input, validate_search_query};
use kasir_core::{Category, Product, ProductInput, ValidationError};

const SELECT_PRODUCT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.stock,
        p.category_id,
        c.name AS category_name,
        c.description AS category_description
    FROM products p
    INNER JOIN categories c ON c.id = p.category_id
"#;

/// Flat row produced by [`SELECT_PRODUCT`].
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    stock: i64,
    category_id: i64,
    category_name: String,
    category_description: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            stock: row.stock,
            category_id: row.category_id,
            category: Some(Category {
                id: row.category_id,
                name: row.category_name,
                description: row.category_description,
            }),
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search products
/// let results = repo.get_all("indomie").await?;
///
/// // Get by ID
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products, optionally filtered by name.
    ///
    /// ## Arguments
    /// * `name_filter` - Case-insensitive substring; blank means "all"
    ///
    /// ## Example
    /// ```rust,ignore
    /// // "indo" matches "Indomie Goreng" and "Indomilk"
    /// let products = repo.get_all("indo").await?;
    ///
    /// // Empty filter returns everything
    /// let products = repo.get_all("").await?;
    /// ```
    pub async fn get_all(&self, name_filter: &str) -> DbResult<Vec<Product>> {
        let filter = validate_search_query(name_filter)?;

        debug!(filter = %filter, "Listing products");

        let rows = if filter.is_empty() {
            let sql = format!("{SELECT_PRODUCT} ORDER BY p.id");
            sqlx::query_as::<_, ProductRow>(&sql)
                .fetch_all(&self.pool)
                .await
                .context("get_all_products")?
        } else {
            // '%' and '_' in user input match literally.
            let pattern = format!("%{}%", escape_like(&filter.to_lowercase()));
            let sql =
                format!("{SELECT_PRODUCT} WHERE LOWER(p.name) LIKE ?1 ESCAPE '\\' ORDER BY p.id");

            sqlx::query_as::<_, ProductRow>(&sql)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
                .context("get_all_products")?
        };

        debug!(count = rows.len(), "Products loaded");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its id, with its category resolved.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No such id, or its category is gone
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        debug!(id = %id, "Fetching product");

        let sql = format!("{SELECT_PRODUCT} WHERE p.id = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("get_product")?;

        row.map(Product::from)
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// The stored product with its assigned id and resolved category.
    ///
    /// ## Errors
    /// `DbError::Validation` when a field is invalid or the category does
    /// not exist.
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        validate_product_input(input)?;

        debug!(name = %input.name, category_id = %input.category_id, "Inserting product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await
        .context("create_product")
        .map_err(|e| unknown_category(e, input.category_id))?;

        self.get_by_id(id).await
    }

    /// Replaces name, price, stock and category of an existing product.
    ///
    /// ## Errors
    /// - `DbError::NotFound` when no row has this id
    /// - `DbError::Validation` on invalid fields or an unknown category
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        validate_product_input(input)?;

        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                name = ?2,
                price = ?3,
                stock = ?4,
                category_id = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .execute(&self.pool)
        .await
        .context("update_product")
        .map_err(|e| unknown_category(e, input.category_id))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id).await
    }

    /// Deletes a product.
    ///
    /// ## Errors
    /// - `DbError::NotFound` when no row has this id
    /// - `DbError::ForeignKeyViolation` when the product has been sold
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete_product")
            .map_err(|e| match e {
                DbError::ForeignKeyViolation { .. } => DbError::ForeignKeyViolation {
                    message: format!("product id {} appears in recorded transactions", id),
                },
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .context("count_products")?;

        Ok(count)
    }
}

/// A foreign key failure on product writes can only mean a bad category.
fn unknown_category(err: DbError, category_id: i64) -> DbError {
    match err {
        DbError::ForeignKeyViolation { .. } => DbError::Validation(ValidationError::Inconsistent(
            format!("category id {} does not exist", category_id),
        )),
        other => other,
    }
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================
