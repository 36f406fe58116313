//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼  .context("create_product")                                    │
//! │  DbError (this module) ← Adds operation name and categorization        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in api-server) ← Status code + JSON body                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasir_core::{CoreError, ValidationError};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - ID doesn't exist
    /// - UPDATE / DELETE affected zero rows
    #[error("{entity} id {id} not found")]
    NotFound { entity: String, id: String },

    /// Input rejected before or while talking to the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Deleting a category that products still reference
    /// - Deleting a product that appears in transaction details
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK / NOT NULL constraint violation.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("{operation} failed: {message}")]
    QueryFailed { operation: String, message: String },

    /// Begin or commit of a store transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Attaches the failing operation name to query-level errors.
    ///
    /// Categorized errors (not found, constraint violations, ...) are
    /// returned unchanged.
    pub fn with_operation(self, operation: &str) -> Self {
        match self {
            DbError::QueryFailed { message, .. } => DbError::QueryFailed {
                operation: operation.to_string(),
                message,
            },
            DbError::Internal(message) => DbError::QueryFailed {
                operation: operation.to_string(),
                message,
            },
            other => other,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Constraint kind, else QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                match db_err.kind() {
                    ErrorKind::ForeignKeyViolation => {
                        DbError::ForeignKeyViolation { message: msg }
                    }
                    ErrorKind::UniqueViolation
                    | ErrorKind::CheckViolation
                    | ErrorKind::NotNullViolation => {
                        DbError::ConstraintViolation(msg)
                    }
                    _ => DbError::QueryFailed {
                        operation: "query".to_string(),
                        message: msg,
                    },
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => DbError::not_found("Product", id),
            CoreError::CategoryNotFound(id) => DbError::not_found("Category", id),
            CoreError::TransactionNotFound(id) => DbError::not_found("Transaction", id),
            CoreError::Validation(e) => DbError::Validation(e),
            overflow @ CoreError::AmountOverflow { .. } => {
                DbError::Validation(ValidationError::Inconsistent(overflow.to_string()))
            }
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Wraps sqlx results with the name of the operation that produced them.
///
/// ## Usage
/// ```rust,ignore
/// sqlx::query("DELETE FROM products WHERE id = ?1")
///     .bind(id)
///     .execute(&self.pool)
///     .await
///     .context("delete_product")?;
/// ```
pub trait DbResultExt<T> {
    fn context(self, operation: &str) -> DbResult<T>;
}

impl<T> DbResultExt<T> for Result<T, sqlx::Error> {
    fn context(self, operation: &str) -> DbResult<T> {
        self.map_err(|e| DbError::from(e).with_operation(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_names_the_operation() {
        let res: Result<(), sqlx::Error> = Err(sqlx::Error::Protocol("boom".to_string()));
        let err = res.context("get_today_report").unwrap_err();

        assert!(matches!(err, DbError::QueryFailed { ref operation, .. } if operation == "get_today_report"));
        assert!(err.to_string().starts_with("get_today_report failed"));
    }

    #[test]
    fn test_row_not_found_keeps_category() {
        let res: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        let err = res.context("get_product").unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_core_error_conversion() {
        let err: DbError = CoreError::ProductNotFound(9).into();
        assert_eq!(err.to_string(), "Product id 9 not found");

        let err: DbError = ValidationError::unknown_reference("product", 9).into();
        assert_eq!(err.to_string(), "product id 9 not found");

        let err: DbError = CoreError::AmountOverflow {
            context: "total".to_string(),
        }
        .into();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
