//! # Application State
//!
//! Shared state handed to every axum handler.
//!
//! ## Thread Safety
//! The `Database` from `kasir-db` wraps a `SqlitePool`, which is
//! thread-safe and cheap to clone. Each request gets its own clone; there is
//! no other shared mutable state in the server.

use kasir_db::Database;

/// State injected into handlers via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    /// Creates a new AppState wrapping the database handle.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
