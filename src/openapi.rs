use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sakila Rental API",
        description = r#"
REST API over the Sakila video-rental schema.

- **Customers**: create, read, update, delete, paginated listing
- **Rentals**: check-out with referential and double-booking gates,
  return transition, paginated listings (global and per customer)

Every failure returns a JSON body with a human-readable `detail` message.
List endpoints take `limit` (default 100, bounded [1, 1000]) and `offset`
(default 0) query parameters.
"#
    ),
    paths(
        crate::handlers::customers::create_customer,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,
        crate::handlers::rentals::create_rental,
        crate::handlers::rentals::list_rentals,
        crate::handlers::rentals::get_rental,
        crate::handlers::rentals::return_rental,
        crate::handlers::rentals::list_rentals_by_customer,
        crate::handlers::health::health_check,
    ),
    components(schemas(
        crate::entities::customer::Model,
        crate::entities::rental::Model,
        crate::services::customers::CreateCustomerRequest,
        crate::services::customers::UpdateCustomerRequest,
        crate::services::rentals::CreateRentalRequest,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "customers", description = "Customer CRUD"),
        (name = "rentals", description = "Rental check-out and return workflow"),
        (name = "health", description = "Liveness and database probe")
    )
)]
pub struct ApiDoc;

/// Swagger UI at /docs, schema at /api-docs/openapi.json
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
