//! Checkout and report service.

use serde::Deserialize;

use crate::error::ApiResult;
use kasir_core::validation::{parse_report_date, validate_checkout_items};
use kasir_core::{CheckoutItem, ReportPeriod, SalesReport, Transaction};
use kasir_db::Database;

/// Body of `POST /api/checkout`.
///
/// ```json
/// { "items": [ { "product_id": 1, "quantity": 2 } ] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

pub async fn checkout(db: &Database, request: CheckoutRequest) -> ApiResult<Transaction> {
    validate_checkout_items(&request.items)?;
    Ok(db.transactions().create_transaction(&request.items).await?)
}

pub async fn get_transaction(db: &Database, id: i64) -> ApiResult<Transaction> {
    Ok(db.transactions().get_by_id(id).await?)
}

pub async fn today_report(db: &Database) -> ApiResult<SalesReport> {
    Ok(db.transactions().get_today_report().await?)
}

/// Report over `[start, end]`, both `YYYY-MM-DD` and inclusive.
pub async fn range_report(
    db: &Database,
    start: Option<&str>,
    end: Option<&str>,
) -> ApiResult<SalesReport> {
    let period = parse_period(start, end)?;
    Ok(db.transactions().get_report_by_date_range(period).await?)
}

fn parse_period(start: Option<&str>, end: Option<&str>) -> ApiResult<ReportPeriod> {
    let start = parse_report_date("start_date", start.unwrap_or_default())?;
    let end = parse_report_date("end_date", end.unwrap_or_default())?;

    Ok(ReportPeriod::new(start, end)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        let period = parse_period(Some("2026-01-01"), Some("2026-01-31")).unwrap();
        assert_eq!(period.start().to_string(), "2026-01-01");
        assert_eq!(period.end().to_string(), "2026-01-31");

        let err = parse_period(None, Some("2026-01-31")).unwrap_err();
        assert_eq!(err.message, "start_date is required");

        assert!(parse_period(Some("2026-02-01"), Some("2026-01-01")).is_err());
        assert!(parse_period(Some("2026/01/01"), Some("2026-01-31")).is_err());
    }

    #[test]
    fn test_checkout_request_without_items_decodes_empty() {
        let request: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(request.items.is_empty());
    }
}
