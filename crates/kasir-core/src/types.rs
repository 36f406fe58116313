//! # Domain Types
//!
//! Core domain types used throughout Kasir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄──│    Product      │   │    Transaction      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  id                 │   │
//! │  │  name           │   │  name, price    │   │  total_amount       │   │
//! │  │  description    │   │  stock          │   │  created_at         │   │
//! │  └─────────────────┘   │  category_id    │   │  details[] ─────┐   │   │
//! │                        └─────────────────┘   └─────────────────┼───┘   │
//! │                                                                ▼       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  CheckoutItem   │   │  SalesReport    │   │ TransactionDetail   │   │
//! │  │  (input only)   │   │  (derived)      │   │  name snapshot      │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All identifiers are store-assigned positive integers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category. Referenced by products, never owned by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Fields accepted when creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Read paths always populate `category`; a product whose category cannot be
/// resolved is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Unit price in whole currency units.
    pub price: i64,

    /// Current stock level. Checkout may drive this below zero.
    pub stock: i64,

    pub category_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_units(self.price)
    }
}

/// Fields accepted when creating or fully replacing a product.
///
/// `category_id` is the single normalized category reference; request
/// shapes that carry a nested category object are resolved before this type
/// is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub category_id: i64,
}

// =============================================================================
// Checkout
// =============================================================================

/// One requested line of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    /// Line subtotal for this item at the given unit price.
    pub fn subtotal(&self, unit_price: Money) -> CoreResult<Money> {
        unit_price
            .multiply_quantity(self.quantity)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: format!("subtotal for product id {}", self.product_id),
            })
    }
}

/// A committed sale. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total_amount)
    }
}

/// A line item of a transaction.
/// Uses the snapshot pattern: `product_name` is frozen at time of sale so
/// historical receipts survive product renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    /// quantity × unit price at time of sale.
    pub subtotal: i64,
}

// =============================================================================
// Reports
// =============================================================================

/// Best-selling product within a report window.
///
/// Empty name and zero quantity when nothing was sold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub qty_sold: i64,
}

/// Aggregated sales over a date window. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub total_revenue: i64,
    pub total_transactions: i64,
    pub top_product: TopProduct,
}

/// Inclusive calendar-date window for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportPeriod {
    /// Creates a window; `start` must not be after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::Inconsistent(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
        Ok(ReportPeriod { start, end })
    }

    /// A window covering exactly one calendar day.
    pub fn single_day(day: NaiveDate) -> Self {
        ReportPeriod {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, crate::REPORT_DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_report_period_rejects_reversed_bounds() {
        assert!(ReportPeriod::new(date("2026-01-02"), date("2026-01-01")).is_err());

        let period = ReportPeriod::new(date("2026-01-01"), date("2026-01-31")).unwrap();
        assert_eq!(period.start(), date("2026-01-01"));
        assert_eq!(period.end(), date("2026-01-31"));
    }

    #[test]
    fn test_checkout_item_subtotal() {
        let item = CheckoutItem {
            product_id: 7,
            quantity: 3,
        };
        assert_eq!(item.subtotal(Money::from_units(2500)).unwrap().units(), 7500);

        let err = item.subtotal(Money::from_units(i64::MAX)).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }

    #[test]
    fn test_single_day_period() {
        let period = ReportPeriod::single_day(date("2026-03-15"));
        assert_eq!(period.start(), period.end());
    }

    #[test]
    fn test_empty_report_defaults() {
        let report = SalesReport::default();
        assert_eq!(report.total_revenue, 0);
        assert_eq!(report.total_transactions, 0);
        assert_eq!(report.top_product.name, "");
        assert_eq!(report.top_product.qty_sold, 0);
    }

    #[test]
    fn test_product_json_omits_unresolved_category() {
        let product = Product {
            id: 1,
            name: "Indomie Goreng".to_string(),
            price: 3500,
            stock: 10,
            category_id: 2,
            category: None,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("category").is_none());
        assert_eq!(json["category_id"], 2);
        assert_eq!(product.unit_price().units(), 3500);
    }
}
