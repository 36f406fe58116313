//! Product handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_id;
use crate::error::ApiResult;
use crate::services::product::{self, ProductRequest};
use crate::state::AppState;
use kasir_core::Product;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let products = product::list(&state.db, query.name.as_deref()).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id, "product")?;
    Ok(Json(product::get(&state.db, id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(request) = payload?;
    let created = product::create(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id, "product")?;
    let Json(request) = payload?;
    Ok(Json(product::update(&state.db, id, request).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, "product")?;
    product::delete(&state.db, id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
