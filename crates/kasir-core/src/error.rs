//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in api-server)                                            │
//! │  └── ApiError         - What HTTP clients see (JSON)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product id doesn't exist in the database
    #[error("product id {0} not found")]
    ProductNotFound(i64),

    /// Category cannot be found.
    #[error("category id {0} not found")]
    CategoryNotFound(i64),

    /// Transaction cannot be found.
    #[error("transaction id {0} not found")]
    TransactionNotFound(i64),

    /// Monetary arithmetic left the i64 range.
    #[error("amount overflow while computing {context}")]
    AmountOverflow { context: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Input references a row that does not exist (e.g. a checkout line
    /// naming an unknown product).
    #[error("{entity} id {id} not found")]
    UnknownReference { entity: String, id: i64 },

    /// A collection that must contain elements is empty.
    #[error("{field} cannot be empty")]
    Empty { field: String },

    /// Two related values are inconsistent (e.g., start date after end date).
    #[error("{0}")]
    Inconsistent(String),
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an `UnknownReference` error for the given entity and id.
    pub fn unknown_reference(entity: impl Into<String>, id: i64) -> Self {
        ValidationError::UnknownReference {
            entity: entity.into(),
            id,
        }
    }

    /// Creates a `MustBePositive` error for the given field.
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound(42);
        assert_eq!(err.to_string(), "product id 42 not found");

        let err = CoreError::AmountOverflow {
            context: "subtotal".to_string(),
        };
        assert_eq!(err.to_string(), "amount overflow while computing subtotal");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::must_be_positive("price").to_string(),
            "price must be greater than 0"
        );
        assert_eq!(
            ValidationError::Empty {
                field: "items".to_string()
            }
            .to_string(),
            "items cannot be empty"
        );
        assert_eq!(
            ValidationError::unknown_reference("product", 999).to_string(),
            "product id 999 not found"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
