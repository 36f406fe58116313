//! Product service: request validation and category normalization.

use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use kasir_core::validation::{resolve_category_id, validate_product_input};
use kasir_core::{Product, ProductInput};
use kasir_db::Database;

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
///
/// The category can be referenced either directly or through a nested
/// object, as returned by the read endpoints:
/// ```json
/// { "name": "Teh Botol", "price": 5000, "stock": 24, "category_id": 2 }
/// { "name": "Teh Botol", "price": 5000, "stock": 24, "category": { "id": 2 } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub category_id: Option<i64>,
    pub category: Option<CategoryRef>,
}

/// Nested category reference; only the id is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRef {
    pub id: Option<i64>,
}

impl ProductRequest {
    /// Validates the request and resolves it to a single category id.
    pub fn into_input(self) -> ApiResult<ProductInput> {
        let nested = self.category.and_then(|c| c.id);
        let category_id = resolve_category_id(self.category_id, nested)?;

        let input = ProductInput {
            name: self.name.trim().to_string(),
            price: self.price,
            stock: self.stock,
            category_id,
        };
        validate_product_input(&input)?;

        Ok(input)
    }
}

pub async fn list(db: &Database, name: Option<&str>) -> ApiResult<Vec<Product>> {
    Ok(db.products().get_all(name.unwrap_or_default()).await?)
}

pub async fn get(db: &Database, id: i64) -> ApiResult<Product> {
    Ok(db.products().get_by_id(id).await?)
}

pub async fn create(db: &Database, request: ProductRequest) -> ApiResult<Product> {
    let input = request.into_input()?;
    debug!(name = %input.name, category_id = %input.category_id, "Creating product");

    Ok(db.products().create(&input).await?)
}

pub async fn update(db: &Database, id: i64, request: ProductRequest) -> ApiResult<Product> {
    let input = request.into_input()?;

    Ok(db.products().update(id, &input).await?)
}

pub async fn delete(db: &Database, id: i64) -> ApiResult<()> {
    Ok(db.products().delete(id).await?)
}
