use crate::errors::ServiceError;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::time::Instant;

/// Health probe: pings the database and reports the result. A failed probe
/// surfaces as a 500 with the generic database-error body.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service up, database reachable"),
        (status = 500, description = "Database unreachable")
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let probe_start = Instant::now();
    crate::db::check_connection(&state.db).await?;
    let latency_ms = probe_start.elapsed().as_millis() as u64;

    Ok(Json(json!({
        "status": "ok",
        "database": "up",
        "db_latency_ms": latency_ms,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
