//! Sakila Rental API
//!
//! REST service over the Sakila video-rental schema: customer CRUD plus an
//! atomic rental check-out/return workflow.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;

use db::DbPool;
use services::{customers::CustomerService, rentals::RentalService};

/// Shared application state. The pool is constructed once at startup and
/// injected here; services clone the `Arc`, never re-connect.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub customers: CustomerService,
    pub rentals: RentalService,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Self {
        let customers = CustomerService::new(db.clone());
        let rentals = RentalService::new(db.clone());
        Self {
            db,
            config,
            customers,
            rentals,
        }
    }
}

/// Routes mounted under `/api/v1`.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/rentals", handlers::rentals::rental_routes())
}

/// Full application router: banner, health probe, versioned API, swagger UI.
/// Middleware layers (CORS, compression, tracing) are applied by the binary.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "sakila-rental-api up" }))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .with_state(state)
}
