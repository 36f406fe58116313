//! Category service.

use serde::Deserialize;

use crate::error::ApiResult;
use kasir_core::validation::{validate_category_name, validate_description};
use kasir_core::{Category, CategoryInput};
use kasir_db::Database;

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
    pub description: String,
}

impl CategoryRequest {
    pub fn into_input(self) -> ApiResult<CategoryInput> {
        validate_category_name(&self.name)?;
        validate_description(&self.description)?;

        Ok(CategoryInput {
            name: self.name.trim().to_string(),
            description: self.description,
        })
    }
}

pub async fn list(db: &Database) -> ApiResult<Vec<Category>> {
    Ok(db.categories().get_all().await?)
}

pub async fn get(db: &Database, id: i64) -> ApiResult<Category> {
    Ok(db.categories().get_by_id(id).await?)
}

pub async fn create(db: &Database, request: CategoryRequest) -> ApiResult<Category> {
    let input = request.into_input()?;
    Ok(db.categories().create(&input).await?)
}

pub async fn update(db: &Database, id: i64, request: CategoryRequest) -> ApiResult<Category> {
    let input = request.into_input()?;
    Ok(db.categories().update(id, &input).await?)
}

pub async fn delete(db: &Database, id: i64) -> ApiResult<()> {
    Ok(db.categories().delete(id).await?)
}
