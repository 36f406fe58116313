use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use kasir_api::{build_app, AppState};
use kasir_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app backed by a fresh in-memory database
async fn setup_test_app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("Failed to init DB");
    (build_app(AppState::new(db.clone())), db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

// Helper to create a category + product, returning (category_id, product_id)
async fn seed_product(app: &Router, name: &str, price: i64, stock: i64) -> (i64, i64) {
    let (status, category) = send(
        app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Makanan", "description": "Instant food" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["id"].as_i64().unwrap();

    let (status, product) = send(
        app,
        "POST",
        "/api/products",
        Some(json!({ "name": name, "price": price, "stock": stock, "category_id": category_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (category_id, product["id"].as_i64().unwrap())
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup_test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "OK", "message": "API Running" }));

    let (status, body) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_readiness_reports_closed_database() {
    let (app, db) = setup_test_app().await;
    db.close().await;

    let (status, _) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_readiness_reports_pending_migrations() {
    let db = Database::new(DbConfig::in_memory().run_migrations(false))
        .await
        .expect("Failed to init DB");
    let app = build_app(AppState::new(db));

    let (status, body) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["migrations"]["applied"], 0);
}

#[tokio::test]
async fn test_product_crud_round_trip() {
    let (app, _) = setup_test_app().await;
    let (category_id, product_id) = seed_product(&app, "Indomie Goreng", 3500, 40).await;

    let (status, product) = send(&app, "GET", &format!("/api/products/{}", product_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "Indomie Goreng");
    assert_eq!(product["price"], 3500);
    assert_eq!(product["stock"], 40);
    assert_eq!(product["category_id"], category_id);
    assert_eq!(product["category"]["name"], "Makanan");

    // Nested category reference is accepted on update
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/product/{}", product_id),
        Some(json!({ "name": "Indomie Soto", "price": 3300, "stock": 12, "category": { "id": category_id } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Indomie Soto");
    assert_eq!(updated["stock"], 12);

    let (status, list) = send(&app, "GET", "/api/products?name=SOTO", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, list) = send(&app, "GET", "/api/products?name=goreng", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());

    let (status, body) = send(&app, "DELETE", &format!("/api/products/{}", product_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, body) = send(&app, "GET", &format!("/api/products/{}", product_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_product_validation_errors() {
    let (app, _) = setup_test_app().await;

    // No category reference at all
    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Teh Botol", "price": 5000, "stock": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Category that does not exist
    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Teh Botol", "price": 5000, "stock": 1, "category_id": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Malformed JSON
    let req = Request::builder()
        .uri("/api/products")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Non-numeric id
    let (status, body) = send(&app, "GET", "/api/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid product id");
}

#[tokio::test]
async fn test_missing_rows_are_404() {
    let (app, _) = setup_test_app().await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/categories/5",
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/category/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/transactions/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_category_in_use_is_conflict() {
    let (app, _) = setup_test_app().await;
    let (category_id, _) = seed_product(&app, "Aqua 600ml", 4000, 24).await;

    let (status, body) = send(&app, "DELETE", &format!("/api/categories/{}", category_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_method_not_allowed() {
    let (app, _) = setup_test_app().await;

    let (status, body) = send(&app, "PATCH", "/api/products", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], "METHOD_NOT_ALLOWED");

    let (status, _) = send(&app, "GET", "/api/checkout", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_checkout_flow_and_reports() {
    let (app, _) = setup_test_app().await;
    let (_, product_id) = seed_product(&app, "Teh Botol", 5000, 10).await;

    let (status, tx) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": product_id, "quantity": 3 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tx["total_amount"], 15000);
    assert_eq!(tx["details"][0]["product_name"], "Teh Botol");
    assert_eq!(tx["details"][0]["subtotal"], 15000);

    let (_, product) = send(&app, "GET", &format!("/api/products/{}", product_id), None).await;
    assert_eq!(product["stock"], 7);

    let (status, stored) = send(&app, "GET", &format!("/api/transactions/{}", tx["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["details"].as_array().unwrap().len(), 1);

    let (status, report) = send(&app, "GET", "/api/report/today", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_revenue"], 15000);
    assert_eq!(report["total_transactions"], 1);
    assert_eq!(report["top_product"]["name"], "Teh Botol");
    assert_eq!(report["top_product"]["qty_sold"], 3);
}

#[tokio::test]
async fn test_checkout_failures_leave_no_trace() {
    let (app, _) = setup_test_app().await;
    let (_, product_id) = seed_product(&app, "Teh Botol", 5000, 10).await;

    let (status, body) = send(&app, "POST", "/api/checkout", Some(json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [
            { "product_id": product_id, "quantity": 2 },
            { "product_id": 999, "quantity": 1 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "product id 999 not found");

    let (_, product) = send(&app, "GET", &format!("/api/products/{}", product_id), None).await;
    assert_eq!(product["stock"], 10);

    let (_, report) = send(&app, "GET", "/api/report/today", None).await;
    assert_eq!(report["total_transactions"], 0);
    assert_eq!(report["top_product"]["name"], "");
}

#[tokio::test]
async fn test_checkout_of_unknown_product_is_400() {
    let (app, _) = setup_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": 999, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "product id 999 not found");

    // The read endpoint still reports a missing product as 404.
    let (status, body) = send(&app, "GET", "/api/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_range_report_parameters() {
    let (app, _) = setup_test_app().await;

    let (status, report) = send(
        &app,
        "GET",
        "/api/report?start_date=2026-01-01&end_date=2026-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_revenue"], 0);

    let (status, _) = send(&app, "GET", "/api/report?start=2026-01-01&end=2026-01-31", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/report?start_date=2026-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "end_date is required");

    let (status, _) = send(
        &app,
        "GET",
        "/api/report?start_date=2026-02-01&end_date=2026-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
