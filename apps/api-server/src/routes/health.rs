use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;
use kasir_db::migrations::migration_status;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "OK", "message": "API Running" })),
    )
}

pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if !state.db.health_check().await {
        tracing::warn!("Readiness check failed: database unreachable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "database": "disconnected" })),
        );
    }

    let (total, applied) = match migration_status(state.db.pool()).await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("Readiness check failed: migration status unavailable: {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "database": "connected" })),
            );
        }
    };

    if applied < total {
        tracing::warn!(total, applied, "Readiness check failed: migrations pending");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "database": "connected",
                "migrations": { "total": total, "applied": applied }
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "database": "connected",
            "migrations": { "total": total, "applied": applied }
        })),
    )
}
