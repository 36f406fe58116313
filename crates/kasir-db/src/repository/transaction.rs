//! # Transaction Repository
//!
//! Checkout and sales reporting.
//!
//! ## Checkout Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_transaction(items)                            │
//! │                                                                         │
//! │  items empty / qty ≤ 0 ──► ValidationError (no store access)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │   │                                                                     │
//! │   ├─ for each item (input order):                                      │
//! │   │     UPDATE products SET stock = stock - qty                         │
//! │   │     WHERE id = ? RETURNING name, price                              │
//! │   │       └── 0 rows ──► "product id N not found" ──► ROLLBACK         │
//! │   │     subtotal = qty × price, total += subtotal                       │
//! │   │                                                                     │
//! │   ├─ INSERT transactions (total_amount) RETURNING id, created_at        │
//! │   │                                                                     │
//! │   ├─ INSERT transaction_details × N (name snapshot)                     │
//! │   │                                                                     │
//! │  COMMIT ──► Transaction { details }                                     │
//! │                                                                         │
//! │  Any `?` before COMMIT drops the tx ──► ROLLBACK, nothing persisted    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stock decrement is the first statement touching a product row, so
//! SQLite's single writer lock orders concurrent checkouts and no update is
//! lost. Stock is allowed to go negative.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult, DbResultExt};
use kasir_core::validation::validate_checkout_items;
use kasir_core::{
    CheckoutItem, CoreError, Money, ReportPeriod, SalesReport, TopProduct, Transaction,
    TransactionDetail, ValidationError, REPORT_DATE_FORMAT,
};

/// Repository for checkout and report queries.
///
/// ## Usage
/// ```rust,ignore
/// let repo = TransactionRepository::new(pool);
///
/// let tx = repo.create_transaction(&[CheckoutItem { product_id: 1, quantity: 2 }]).await?;
/// let today = repo.get_today_report().await?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Performs a checkout as one all-or-nothing unit.
    ///
    /// ## Returns
    /// The committed transaction with one detail per item, in input order.
    ///
    /// ## Errors
    /// - `DbError::Validation` for an empty list, bad ids or quantities,
    ///   or an amount overflow (nothing touched)
    /// - `DbError::Validation` when any product id does not exist
    ///   (whole checkout rolled back)
    pub async fn create_transaction(&self, items: &[CheckoutItem]) -> DbResult<Transaction> {
        validate_checkout_items(items)?;

        debug!(items = items.len(), "Starting checkout");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut lines = Vec::with_capacity(items.len());
        let mut total = Money::zero();

        for item in items {
            let row: Option<(String, i64)> = sqlx::query_as(
                r#"
                UPDATE products
                SET stock = stock - ?1
                WHERE id = ?2
                RETURNING name, price
                "#,
            )
            .bind(item.quantity)
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await
            .context("decrement_stock")?;

            let (name, price) =
                row.ok_or_else(|| ValidationError::unknown_reference("product", item.product_id))?;

            let subtotal = item.subtotal(Money::from_units(price))?;
            total = total
                .checked_add(subtotal)
                .ok_or_else(|| CoreError::AmountOverflow {
                    context: "checkout total".to_string(),
                })?;

            debug!(product_id = %item.product_id, quantity = %item.quantity, subtotal = %subtotal, "Line priced");
            lines.push((item, name, subtotal));
        }

        let (transaction_id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO transactions (total_amount)
            VALUES (?1)
            RETURNING id, created_at
            "#,
        )
        .bind(total.units())
        .fetch_one(&mut *tx)
        .await
        .context("insert_transaction")?;

        let mut details = Vec::with_capacity(lines.len());

        for (item, product_name, subtotal) in lines {
            let detail_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO transaction_details
                    (transaction_id, product_id, product_name, quantity, subtotal)
                VALUES (?1, ?2, ?3, ?4, ?5)
                RETURNING id
                "#,
            )
            .bind(transaction_id)
            .bind(item.product_id)
            .bind(&product_name)
            .bind(item.quantity)
            .bind(subtotal.units())
            .fetch_one(&mut *tx)
            .await
            .context("insert_transaction_detail")?;

            details.push(TransactionDetail {
                id: detail_id,
                transaction_id,
                product_id: item.product_id,
                product_name,
                quantity: item.quantity,
                subtotal: subtotal.units(),
            });
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            transaction_id = %transaction_id,
            total = %total,
            items = details.len(),
            "Checkout committed"
        );

        Ok(Transaction {
            id: transaction_id,
            total_amount: total.units(),
            created_at,
            details,
        })
    }

    /// Loads a committed transaction with its details (ordered by detail id).
    pub async fn get_by_id(&self, id: i64) -> DbResult<Transaction> {
        debug!(id = %id, "Fetching transaction");

        let header: Option<(i64, i64, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("get_transaction")?;

        let (id, total_amount, created_at) =
            header.ok_or_else(|| DbError::not_found("Transaction", id))?;

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .context("get_transaction_details")?;

        Ok(Transaction {
            id,
            total_amount,
            created_at,
            details,
        })
    }

    /// Sales report for the current UTC calendar day.
    pub async fn get_today_report(&self) -> DbResult<SalesReport> {
        let today = Utc::now().date_naive();
        self.report(ReportPeriod::single_day(today), "get_today_report")
            .await
    }

    /// Sales report over an inclusive calendar-date window.
    ///
    /// No sales in the window gives a zeroed report, not an error.
    pub async fn get_report_by_date_range(&self, period: ReportPeriod) -> DbResult<SalesReport> {
        self.report(period, "get_report_by_date_range").await
    }

    async fn report(&self, period: ReportPeriod, operation: &str) -> DbResult<SalesReport> {
        let start = period.start().format(REPORT_DATE_FORMAT).to_string();
        let end = period.end().format(REPORT_DATE_FORMAT).to_string();

        debug!(start = %start, end = %end, "Building sales report");

        let (total_revenue, total_transactions): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(total_amount), 0),
                COUNT(*)
            FROM transactions
            WHERE date(created_at) BETWEEN ?1 AND ?2
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_one(&self.pool)
        .await
        .context(operation)?;

        // With MAX(td.id), SQLite takes the bare product_name from the latest
        // sale in the window.
        let top: Option<(String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT
                td.product_name,
                SUM(td.quantity) AS qty_sold,
                MAX(td.id)
            FROM transaction_details td
            INNER JOIN transactions t ON t.id = td.transaction_id
            WHERE date(t.created_at) BETWEEN ?1 AND ?2
            GROUP BY td.product_id
            ORDER BY qty_sold DESC, td.product_id ASC
            LIMIT 1
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_optional(&self.pool)
        .await
        .context(operation)?;

        let top_product = top
            .map(|(name, qty_sold, _)| TopProduct { name, qty_sold })
            .unwrap_or_default();

        Ok(SalesReport {
            total_revenue,
            total_transactions,
            top_product,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
