//! Category handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::parse_id;
use crate::error::ApiResult;
use crate::services::category::{self, CategoryRequest};
use crate::state::AppState;
use kasir_core::Category;

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(category::list(&state.db).await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id, "category")?;
    Ok(Json(category::get(&state.db, id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(request) = payload?;
    let created = category::create(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id, "category")?;
    let Json(request) = payload?;
    Ok(Json(category::update(&state.db, id, request).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, "category")?;
    category::delete(&state.db, id).await?;
    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
