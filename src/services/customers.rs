use crate::{
    db::DbPool,
    entities::customer::{self, Entity as CustomerEntity, Model as Customer},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Payload for creating a customer. Mirrors the mutable columns of the
/// `customer` table; `customer_id` and `create_date` are store-assigned.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(range(min = 1))]
    pub store_id: i32,
    #[validate(length(min = 1, max = 45))]
    pub first_name: String,
    #[validate(length(min = 1, max = 45))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 1))]
    pub address_id: i32,
    #[serde(default = "default_active")]
    pub active: i32,
}

/// Full overwrite of every mutable field. `create_date` is never touched.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
    #[validate(range(min = 1))]
    pub store_id: i32,
    #[validate(length(min = 1, max = 45))]
    pub first_name: String,
    #[validate(length(min = 1, max = 45))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 1))]
    pub address_id: i32,
    #[serde(default = "default_active")]
    pub active: i32,
}

fn default_active() -> i32 {
    1
}

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

impl CustomerService {
    /// Creates a new customer service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a new customer and returns the persisted row.
    #[instrument(skip(self, request), fields(first_name = %request.first_name, last_name = %request.last_name))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let active_model = customer::ActiveModel {
            store_id: Set(request.store_id),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            email: Set(request.email),
            address_id: Set(request.address_id),
            active: Set(request.active),
            create_date: Set(now),
            last_update: Set(Some(now)),
            ..Default::default()
        };

        let inserted = active_model.insert(db).await?;

        // Re-read so the caller sees store-assigned values, not our input.
        let persisted = CustomerEntity::find_by_id(inserted.customer_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "customer {} missing immediately after insert",
                    inserted.customer_id
                ))
            })?;

        info!(customer_id = persisted.customer_id, "Customer created");
        Ok(persisted)
    }

    /// Gets a customer by ID
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: i32) -> Result<Customer, ServiceError> {
        let db = &*self.db_pool;
        CustomerEntity::find_by_id(customer_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))
    }

    /// Lists customers ordered by ascending customer_id
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Customer>, ServiceError> {
        let db = &*self.db_pool;
        let customers = CustomerEntity::find()
            .order_by_asc(customer::Column::CustomerId)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await?;

        Ok(customers)
    }

    /// Overwrites every mutable field of an existing customer and re-stamps
    /// `last_update`; returns the persisted row.
    #[instrument(skip(self, request), fields(customer_id = customer_id))]
    pub async fn update_customer(
        &self,
        customer_id: i32,
        request: UpdateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;

        let existing = CustomerEntity::find_by_id(customer_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                warn!(customer_id, "Customer not found for update");
                ServiceError::NotFound("Customer not found".to_string())
            })?;

        let mut active_model: customer::ActiveModel = existing.into();
        active_model.store_id = Set(request.store_id);
        active_model.first_name = Set(request.first_name);
        active_model.last_name = Set(request.last_name);
        active_model.email = Set(request.email);
        active_model.address_id = Set(request.address_id);
        active_model.active = Set(request.active);
        active_model.last_update = Set(Some(Utc::now()));

        active_model.update(db).await?;

        let persisted = CustomerEntity::find_by_id(customer_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "customer {} missing immediately after update",
                    customer_id
                ))
            })?;

        info!(customer_id, "Customer updated");
        Ok(persisted)
    }

    /// Deletes a customer by ID
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let result = CustomerEntity::delete_by_id(customer_id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Customer not found".to_string()));
        }

        info!(customer_id, "Customer deleted");
        Ok(())
    }
}
