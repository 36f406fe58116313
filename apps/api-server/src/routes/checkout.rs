//! Checkout handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::parse_id;
use crate::error::ApiResult;
use crate::services::transaction::{self, CheckoutRequest};
use crate::state::AppState;
use kasir_core::Transaction;

/// `POST /api/checkout`: 201 with the committed transaction and its details.
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let Json(request) = payload?;
    let committed = transaction::checkout(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(committed)))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Transaction>> {
    let id = parse_id(&id, "transaction")?;
    Ok(Json(transaction::get_transaction(&state.db, id).await?))
}
