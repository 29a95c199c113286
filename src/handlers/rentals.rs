use super::common::PaginationParams;
use crate::entities::rental::Model as Rental;
use crate::errors::ServiceError;
use crate::services::rentals::CreateRentalRequest;
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

#[utoipa::path(
    post,
    path = "/api/v1/rentals",
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Rental created with no return date", body = Rental),
        (status = 400, description = "Unknown inventory/customer/staff, or inventory already rented"),
        (status = 500, description = "Store fault")
    ),
    tag = "rentals"
)]
pub(crate) async fn create_rental(
    State(state): State<AppState>,
    Json(payload): Json<CreateRentalRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let rental = state.rentals.create_rental(payload).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals",
    params(PaginationParams),
    responses(
        (status = 200, description = "Rentals, most recent first", body = [Rental]),
        (status = 500, description = "Store fault")
    ),
    tag = "rentals"
)]
pub(crate) async fn list_rentals(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (limit, offset) = params.clamped();
    let rentals = state.rentals.list_rentals(limit, offset).await?;
    Ok(Json(rentals))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/{id}",
    params(("id" = i32, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental detail", body = Rental),
        (status = 404, description = "Unknown rental"),
        (status = 500, description = "Store fault")
    ),
    tag = "rentals"
)]
pub(crate) async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let rental = state.rentals.get_rental(id).await?;
    Ok(Json(rental))
}

#[utoipa::path(
    put,
    path = "/api/v1/rentals/{id}/return",
    params(("id" = i32, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental marked returned", body = Rental),
        (status = 400, description = "Rental already returned"),
        (status = 404, description = "Unknown rental"),
        (status = 500, description = "Store fault")
    ),
    tag = "rentals"
)]
pub(crate) async fn return_rental(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let rental = state.rentals.return_rental(id).await?;
    Ok(Json(rental))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/customer/{customer_id}",
    params(
        ("customer_id" = i32, Path, description = "Customer id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "The customer's rentals, most recent first", body = [Rental]),
        (status = 404, description = "Unknown customer"),
        (status = 500, description = "Store fault")
    ),
    tag = "rentals"
)]
pub(crate) async fn list_rentals_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (limit, offset) = params.clamped();
    let rentals = state
        .rentals
        .list_rentals_by_customer(customer_id, limit, offset)
        .await?;
    Ok(Json(rentals))
}

pub fn rental_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rental))
        .route("/", get(list_rentals))
        .route("/:id", get(get_rental))
        .route("/:id/return", put(return_rental))
        .route("/customer/:customer_id", get(list_rentals_by_customer))
}
