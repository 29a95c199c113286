mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use common::TestApp;

fn parse_ts(value: &Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().expect("timestamp was not a string"))
        .expect("timestamp was not RFC 3339")
        .with_timezone(&Utc)
}

async fn create_customer(app: &TestApp, first: &str, last: &str) -> Value {
    let (status, body) = app
        .post(
            "/api/v1/customers",
            json!({
                "store_id": 1,
                "first_name": first,
                "last_name": last,
                "email": format!("{}.{}@sakilacustomer.org", first.to_lowercase(), last.to_lowercase()),
                "address_id": 5
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn create_customer_returns_persisted_row() {
    let app = TestApp::new().await;

    let body = create_customer(&app, "Ana", "Diaz").await;

    assert!(body["customer_id"].as_i64().unwrap() >= 1);
    assert_eq!(body["first_name"], "Ana");
    assert_eq!(body["last_name"], "Diaz");
    assert_eq!(body["email"], "ana.diaz@sakilacustomer.org");
    assert_eq!(body["store_id"], 1);
    assert_eq!(body["address_id"], 5);
    // active defaults to 1 when omitted
    assert_eq!(body["active"], 1);
    parse_ts(&body["create_date"]);
    parse_ts(&body["last_update"]);
}

#[tokio::test]
async fn create_customer_rejects_bad_email() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/v1/customers",
            json!({
                "store_id": 1,
                "first_name": "Ana",
                "last_name": "Diaz",
                "email": "not-an-email",
                "address_id": 5
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn get_customer_round_trips() {
    let app = TestApp::new().await;

    let created = create_customer(&app, "Ana", "Diaz").await;
    let id = created["customer_id"].as_i64().unwrap();

    let (status, fetched) = app.get(&format!("/api/v1/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_customer_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/customers/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Customer not found");
}

#[tokio::test]
async fn update_overwrites_mutable_fields_only() {
    let app = TestApp::new().await;

    let created = create_customer(&app, "Ana", "Diaz").await;
    let id = created["customer_id"].as_i64().unwrap();
    let created_ts = parse_ts(&created["create_date"]);
    let first_update = parse_ts(&created["last_update"]);

    let (status, updated) = app
        .put(
            &format!("/api/v1/customers/{id}"),
            Some(json!({
                "store_id": 2,
                "first_name": "Anna",
                "last_name": "Diaz-Lopez",
                "email": null,
                "address_id": 9,
                "active": 0
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["customer_id"].as_i64().unwrap(), id);
    assert_eq!(updated["store_id"], 2);
    assert_eq!(updated["first_name"], "Anna");
    assert_eq!(updated["last_name"], "Diaz-Lopez");
    assert!(updated["email"].is_null());
    assert_eq!(updated["address_id"], 9);
    assert_eq!(updated["active"], 0);

    // create_date survives the overwrite, last_update moves forward
    assert_eq!(parse_ts(&updated["create_date"]), created_ts);
    assert!(parse_ts(&updated["last_update"]) >= first_update);
}

#[tokio::test]
async fn update_unknown_customer_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app
        .put(
            "/api/v1/customers/9999",
            Some(json!({
                "store_id": 1,
                "first_name": "Ana",
                "last_name": "Diaz",
                "email": null,
                "address_id": 5,
                "active": 1
            })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Customer not found");
}

#[tokio::test]
async fn delete_customer_then_get_is_404() {
    let app = TestApp::new().await;

    let created = create_customer(&app, "Ana", "Diaz").await;
    let id = created["customer_id"].as_i64().unwrap();

    let (status, body) = app.delete(&format!("/api/v1/customers/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&format!("/api/v1/customers/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_customer_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.delete("/api/v1/customers/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Customer not found");
}

#[tokio::test]
async fn list_customers_orders_by_id_and_paginates() {
    let app = TestApp::new().await;

    for (first, last) in [("Ana", "Diaz"), ("Ben", "Okafor"), ("Cora", "Lindt")] {
        create_customer(&app, first, last).await;
    }

    let (status, body) = app.get("/api/v1/customers").await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 3);
    let ids: Vec<i64> = all
        .iter()
        .map(|c| c["customer_id"].as_i64().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    // offset slices the same ordering
    let (status, body) = app.get("/api/v1/customers?limit=1&offset=1").await;
    assert_eq!(status, StatusCode::OK);
    let page = body.as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["customer_id"].as_i64().unwrap(), ids[1]);
}

#[tokio::test]
async fn list_customers_clamps_out_of_range_limits() {
    let app = TestApp::new().await;
    create_customer(&app, "Ana", "Diaz").await;

    // limit=0 is raised to the minimum of 1, not an error
    let (status, body) = app.get("/api/v1/customers?limit=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // absurd limits are capped instead of rejected
    let (status, _) = app.get("/api/v1/customers?limit=50000").await;
    assert_eq!(status, StatusCode::OK);
}
