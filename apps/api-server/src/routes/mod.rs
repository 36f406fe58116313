//! # HTTP Routes
//!
//! ```text
//! GET    /health                      liveness
//! GET    /health/ready                store ping (503 when down)
//!
//! GET    /api/products[?name=]        list / search
//! POST   /api/products                create            201
//! GET    /api/products/{id}
//! PUT    /api/products/{id}
//! DELETE /api/products/{id}                             200 + message
//!        (/api/product, /api/product/{id} are aliases)
//!
//! GET    /api/categories              same shape as products
//! ...    /api/categories/{id}         (/api/category aliases)
//!
//! POST   /api/checkout                                  201
//! GET    /api/transactions/{id}
//! GET    /api/report/today
//! GET    /api/report?start_date=&end_date=
//! ```
//!
//! Any other method on a known path answers 405; unknown paths answer 404.
//! Both use the JSON error body.

mod categories;
mod checkout;
mod health;
mod products;
mod reports;

use axum::routing::{get, post};
use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the API router (without middleware layers).
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        // Products
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/api/product",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/product/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Categories
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/api/category",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/category/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Checkout + reports
        .route("/api/checkout", post(checkout::checkout))
        .route("/api/transactions/{id}", get(checkout::get_transaction))
        .route("/api/report/today", get(reports::today_report))
        .route("/api/report", get(reports::range_report))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Parses a numeric path id; anything else is a 400.
fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("invalid {} id", entity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "product").unwrap(), 42);

        let err = parse_id("abc", "product").unwrap_err();
        assert_eq!(err.message, "invalid product id");
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
