//! # kasir-api: HTTP API for the Kasir POS Backend
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  TCP ──► axum::serve ──► TraceLayer ──► Router ──► handler (routes/)   │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                               service (services/)       │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                          kasir_db::Database repos       │
//! │                                                        │                │
//! │  JSON ◄── IntoResponse ◄── Result<T, ApiError> ◄───────┘                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`build_app`] is used both by `main.rs` and by the integration tests,
//! which drive it with `tower::ServiceExt::oneshot`.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

use kasir_db::{Database, DbConfig, DbResult};

/// Builds the full application: routes, request tracing, state.
pub fn build_app(state: AppState) -> Router {
    routes::create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the database described by the configuration (runs migrations).
pub async fn connect_database(config: &AppConfig) -> DbResult<Database> {
    let db_config = DbConfig::new(&config.database_url).max_connections(config.db_max_connections);
    Database::new(db_config).await
}
