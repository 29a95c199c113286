// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, Set, Statement,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use sakila_rental_api::{
    config::AppConfig,
    db::{self, DbConfig},
    entities::{inventory, staff},
    AppState,
};

/// Helper harness backed by a throwaway SQLite database file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _tmp: TempDir,
}

impl TestApp {
    /// Construct a test application with a fresh database and schema.
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let db_path = tmp.path().join("sakila_test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        // A single connection keeps SQLite's writer serialization honest and
        // mirrors how transactions queue against one another.
        let db_cfg = DbConfig {
            url: url.clone(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
            acquire_timeout: Duration::from_secs(30),
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");

        create_schema(&pool).await;

        let cfg = AppConfig::new(url, "test");
        let state = AppState::new(Arc::new(pool), cfg);
        let router = sakila_rental_api::app_router(state.clone());

        Self {
            router,
            state,
            _tmp: tmp,
        }
    }

    /// Insert an inventory row and return its id.
    pub async fn seed_inventory(&self) -> i32 {
        let model = inventory::ActiveModel {
            film_id: Set(1),
            store_id: Set(1),
            last_update: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(&*self.state.db)
            .await
            .expect("failed to seed inventory")
            .inventory_id
    }

    /// Insert a staff row and return its id.
    pub async fn seed_staff(&self) -> i32 {
        let model = staff::ActiveModel {
            first_name: Set("Mike".to_string()),
            last_name: Set("Hillyer".to_string()),
            address_id: Set(1),
            store_id: Set(1),
            active: Set(1),
            username: Set("mike".to_string()),
            last_update: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(&*self.state.db)
            .await
            .expect("failed to seed staff")
            .staff_id
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                builder.body(Body::from(json.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };

        (status, json)
    }
}

async fn create_schema(pool: &sea_orm::DatabaseConnection) {
    let statements = [
        "CREATE TABLE customer (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT,
            address_id INTEGER NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            create_date TEXT NOT NULL,
            last_update TEXT
        );",
        "CREATE TABLE inventory (
            inventory_id INTEGER PRIMARY KEY AUTOINCREMENT,
            film_id INTEGER NOT NULL,
            store_id INTEGER NOT NULL,
            last_update TEXT NOT NULL
        );",
        "CREATE TABLE staff (
            staff_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            address_id INTEGER NOT NULL,
            store_id INTEGER NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            username TEXT NOT NULL,
            last_update TEXT NOT NULL
        );",
        "CREATE TABLE rental (
            rental_id INTEGER PRIMARY KEY AUTOINCREMENT,
            rental_date TEXT NOT NULL,
            inventory_id INTEGER NOT NULL,
            customer_id INTEGER NOT NULL,
            return_date TEXT,
            staff_id INTEGER NOT NULL,
            last_update TEXT NOT NULL
        );",
    ];

    for sql in statements {
        pool.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await
        .expect("failed to create test schema");
    }
}
