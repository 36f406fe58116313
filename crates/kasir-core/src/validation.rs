//! # Validation Module
//!
//! Input validation utilities for Kasir.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler                                                 │
//! │  ├── JSON decoding, path id parsing                                    │
//! │  └── 400 on malformed input                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service layer (Rust)                                         │
//! │  └── THIS MODULE: field rules, category normalization                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::validation::{validate_price, validate_quantity};
//!
//! validate_price(3500).unwrap();
//! validate_quantity(2).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{CheckoutItem, ProductInput};
use crate::{MAX_CHECKOUT_ITEMS, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, REPORT_DATE_FORMAT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Indomie Goreng").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a category name. Same rules as product names.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a category description (optional, bounded length).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validates a search query for the product list.
///
/// ## Returns
/// The trimmed query string. Empty means "no filter".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Must be strictly positive.
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price <= 0 {
        return Err(ValidationError::must_be_positive("price"));
    }

    Ok(())
}

/// Validates a stock level written through product CRUD.
///
/// Zero is allowed. Checkout may later drive stock negative; that path does
/// not go through this check.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a checkout quantity. Must be strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    Ok(())
}

/// Validates a store-assigned identifier.
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::must_be_positive(field));
    }

    Ok(())
}

// =============================================================================
// Category Reference Normalization
// =============================================================================

/// Resolves the category reference of a product request to one id.
///
/// An explicit `category_id` wins; otherwise the id of a nested category
/// object is used. Either way the id must be positive.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::resolve_category_id;
///
/// assert_eq!(resolve_category_id(Some(3), None).unwrap(), 3);
/// assert_eq!(resolve_category_id(None, Some(5)).unwrap(), 5);
/// assert!(resolve_category_id(None, None).is_err());
/// ```
pub fn resolve_category_id(explicit: Option<i64>, nested: Option<i64>) -> ValidationResult<i64> {
    let id = match (explicit, nested) {
        (Some(id), _) => id,
        (None, Some(id)) if id > 0 => id,
        _ => return Err(ValidationError::required("category_id")),
    };

    validate_id("category_id", id)?;
    Ok(id)
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a product write.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price(input.price)?;
    validate_stock(input.stock)?;
    validate_id("category_id", input.category_id)?;
    Ok(())
}

/// Validates a checkout request before any store access.
///
/// ## Rules
/// - At least one item, at most [`MAX_CHECKOUT_ITEMS`]
/// - Every product id positive, every quantity positive
pub fn validate_checkout_items(items: &[CheckoutItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    if items.len() > MAX_CHECKOUT_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_CHECKOUT_ITEMS as i64,
        });
    }

    for item in items {
        validate_id("product_id", item.product_id)?;
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a report bound in `YYYY-MM-DD` form.
pub fn parse_report_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    NaiveDate::parse_from_str(value, REPORT_DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Teh Botol").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price(1).is_ok());
        assert!(validate_price(0).is_err());
        assert!(validate_price(-100).is_err());

        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_resolve_category_id() {
        assert_eq!(resolve_category_id(Some(2), Some(9)).unwrap(), 2);
        assert_eq!(resolve_category_id(None, Some(9)).unwrap(), 9);
        assert_eq!(
            resolve_category_id(None, Some(0)).unwrap_err(),
            ValidationError::required("category_id")
        );
        assert_eq!(
            resolve_category_id(Some(0), None).unwrap_err(),
            ValidationError::must_be_positive("category_id")
        );
    }

    #[test]
    fn test_validate_checkout_items() {
        assert!(matches!(
            validate_checkout_items(&[]),
            Err(ValidationError::Empty { .. })
        ));

        let ok = [CheckoutItem {
            product_id: 1,
            quantity: 2,
        }];
        assert!(validate_checkout_items(&ok).is_ok());

        let zero_qty = [CheckoutItem {
            product_id: 1,
            quantity: 0,
        }];
        assert!(validate_checkout_items(&zero_qty).is_err());

        let too_many = vec![
            CheckoutItem {
                product_id: 1,
                quantity: 1,
            };
            MAX_CHECKOUT_ITEMS + 1
        ];
        assert!(validate_checkout_items(&too_many).is_err());
    }

    #[test]
    fn test_validate_product_input() {
        let mut input = ProductInput {
            name: "Aqua 600ml".to_string(),
            price: 4000,
            stock: 24,
            category_id: 1,
        };
        assert!(validate_product_input(&input).is_ok());

        input.stock = -1;
        assert!(validate_product_input(&input).is_err());
    }

    #[test]
    fn test_parse_report_date() {
        let d = parse_report_date("start_date", "2026-02-01").unwrap();
        assert_eq!(d.to_string(), "2026-02-01");

        assert!(parse_report_date("start_date", "").is_err());
        assert!(parse_report_date("start_date", "01/02/2026").is_err());
        assert!(parse_report_date("start_date", "2026-02-30").is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  indo ").unwrap(), "indo");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }
}
