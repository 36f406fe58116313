//! Sales report handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::services::transaction;
use crate::state::AppState;
use kasir_core::SalesReport;

/// `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD` (`start` / `end` also accepted).
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn today_report(State(state): State<AppState>) -> ApiResult<Json<SalesReport>> {
    Ok(Json(transaction::today_report(&state.db).await?))
}

pub async fn range_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<SalesReport>> {
    let Query(query) = query?;
    let start = query.start_date.as_deref().or(query.start.as_deref());
    let end = query.end_date.as_deref().or(query.end.as_deref());

    Ok(Json(transaction::range_report(&state.db, start, end).await?))
}
