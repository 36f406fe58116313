//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer currency units                                   │
//! │    Prices are whole units of the store currency (e.g. Rp 3500).        │
//! │    Subtotals and totals are exact integer sums.                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::from_units(3500);
//! let total = price.multiply_quantity(2).unwrap() + Money::from_units(1000);
//! assert_eq!(total.units(), 8000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► multiply_quantity(qty) ──► TransactionDetail.subtotal
///                                                    │
///                                                    ▼ (sum)
///                                        Transaction.total_amount
///                                                    │
///                                                    ▼ (sum per window)
///                                        SalesReport.total_revenue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::from_units(3500);
    /// assert_eq!(price.units(), 3500);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity to get a line subtotal.
    ///
    /// Returns `None` when the result does not fit in an `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let unit_price = Money::from_units(2500);
    /// let subtotal = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(subtotal.units(), 7500);
    ///
    /// assert!(Money::from_units(i64::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the raw unit amount; formatting for receipts is a client
/// concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Money(units)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(3500);
        assert_eq!(money.units(), 3500);
        assert!(money.is_positive());
        assert!(!money.is_zero());
    }

    #[test]
    fn test_arithmetic() {
        let mut total = Money::from_units(1000) + Money::from_units(500);
        assert_eq!(total.units(), 1500);

        total += Money::from_units(250);
        assert_eq!(total.units(), 1750);
    }

    #[test]
    fn test_multiply_quantity() {
        let price = Money::from_units(2999);
        assert_eq!(price.multiply_quantity(3), Some(Money::from_units(8997)));
        assert_eq!(price.multiply_quantity(0), Some(Money::zero()));
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Money::from_units(i64::MAX);
        assert!(huge.multiply_quantity(2).is_none());
        assert!(huge.checked_add(Money::from_units(1)).is_none());
    }

    #[test]
    fn test_sum_of_subtotals() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_units).sum();
        assert_eq!(total.units(), 1000);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_units(7500)).unwrap();
        assert_eq!(json, "7500");
    }
}
