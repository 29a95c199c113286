use super::common::PaginationParams;
use crate::entities::customer::Model as Customer;
use crate::errors::ServiceError;
use crate::services::customers::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Store fault")
    ),
    tag = "customers"
)]
pub(crate) async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.create_customer(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Customers ordered by ascending id", body = [Customer]),
        (status = 500, description = "Store fault")
    ),
    tag = "customers"
)]
pub(crate) async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (limit, offset) = params.clamped();
    let customers = state.customers.list_customers(limit, offset).await?;
    Ok(Json(customers))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer detail", body = Customer),
        (status = 404, description = "Unknown customer"),
        (status = 500, description = "Store fault")
    ),
    tag = "customers"
)]
pub(crate) async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.get_customer(id).await?;
    Ok(Json(customer))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 404, description = "Unknown customer"),
        (status = 500, description = "Store fault")
    ),
    tag = "customers"
)]
pub(crate) async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.update_customer(id, payload).await?;
    Ok(Json(customer))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Unknown customer"),
        (status = 500, description = "Store fault")
    ),
    tag = "customers"
)]
pub(crate) async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer))
        .route("/", get(list_customers))
        .route("/:id", get(get_customer))
        .route("/:id", put(update_customer))
        .route("/:id", delete(delete_customer))
}
