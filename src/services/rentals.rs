use crate::{
    db::DbPool,
    entities::{
        customer::Entity as CustomerEntity,
        inventory::Entity as InventoryEntity,
        rental::{self, Entity as RentalEntity, Model as Rental},
        staff::Entity as StaffEntity,
    },
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRentalRequest {
    #[validate(range(min = 1))]
    pub inventory_id: i32,
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(range(min = 1))]
    pub staff_id: i32,
}

/// Service orchestrating the rental check-out and return workflows.
#[derive(Clone)]
pub struct RentalService {
    db_pool: Arc<DbPool>,
}

impl RentalService {
    /// Creates a new rental service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Checks out an inventory item to a customer.
    ///
    /// The four precondition gates run in a fixed order so the caller always
    /// learns the most fundamental problem first: referential integrity
    /// (inventory, customer, staff) before the business-rule conflict.
    ///
    /// The whole sequence, checks plus insert plus re-read, runs in a single
    /// transaction. The inventory row is read with an exclusive lock, so two
    /// concurrent check-outs of the same item serialize at the database and
    /// the loser sees the winner's open rental in gate 4.
    #[instrument(skip(self, request), fields(inventory_id = request.inventory_id, customer_id = request.customer_id, staff_id = request.staff_id))]
    pub async fn create_rental(&self, request: CreateRentalRequest) -> Result<Rental, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let txn = db.begin().await?;

        // Gate 1: the inventory item must exist. Locked FOR UPDATE to
        // serialize concurrent check-outs of the same item.
        InventoryEntity::find_by_id(request.inventory_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                warn!(inventory_id = request.inventory_id, "Rental rejected: unknown inventory");
                ServiceError::ValidationError("Inventory not found".to_string())
            })?;

        // Gate 2: the customer must exist.
        CustomerEntity::find_by_id(request.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                warn!(customer_id = request.customer_id, "Rental rejected: unknown customer");
                ServiceError::ValidationError("Customer not found".to_string())
            })?;

        // Gate 3: the staff member must exist.
        StaffEntity::find_by_id(request.staff_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                warn!(staff_id = request.staff_id, "Rental rejected: unknown staff");
                ServiceError::ValidationError("Staff not found".to_string())
            })?;

        // Gate 4: at most one open rental per inventory item.
        let open_rental = RentalEntity::find()
            .filter(rental::Column::InventoryId.eq(request.inventory_id))
            .filter(rental::Column::ReturnDate.is_null())
            .one(&txn)
            .await?;

        if let Some(existing) = open_rental {
            warn!(
                inventory_id = request.inventory_id,
                open_rental_id = existing.rental_id,
                "Rental rejected: inventory already checked out"
            );
            return Err(ServiceError::InvalidOperation(
                "Inventory is already rented (open rental exists)".to_string(),
            ));
        }

        let active_model = rental::ActiveModel {
            rental_date: Set(now),
            inventory_id: Set(request.inventory_id),
            customer_id: Set(request.customer_id),
            return_date: Set(None),
            staff_id: Set(request.staff_id),
            last_update: Set(now),
            ..Default::default()
        };

        let inserted = active_model.insert(&txn).await?;

        // Re-read inside the transaction so the response reflects exactly
        // what the store persisted (generated id, timestamp defaults).
        let persisted = RentalEntity::find_by_id(inserted.rental_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "rental {} missing immediately after insert",
                    inserted.rental_id
                ))
            })?;

        txn.commit().await?;

        info!(
            rental_id = persisted.rental_id,
            inventory_id = persisted.inventory_id,
            "Rental created"
        );
        Ok(persisted)
    }

    /// Marks a rental as returned (sets `return_date` to now).
    ///
    /// Runs in a transaction with the rental row locked, so a concurrent
    /// duplicate return observes the first one's `return_date` and fails
    /// cleanly instead of re-stamping it.
    #[instrument(skip(self))]
    pub async fn return_rental(&self, rental_id: i32) -> Result<Rental, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let txn = db.begin().await?;

        let existing = RentalEntity::find_by_id(rental_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                warn!(rental_id, "Return rejected: unknown rental");
                ServiceError::NotFound("Rental not found".to_string())
            })?;

        if existing.return_date.is_some() {
            warn!(rental_id, "Return rejected: rental already returned");
            return Err(ServiceError::InvalidOperation(
                "Rental already returned".to_string(),
            ));
        }

        let mut active_model: rental::ActiveModel = existing.into();
        active_model.return_date = Set(Some(now));
        active_model.last_update = Set(now);
        active_model.update(&txn).await?;

        let persisted = RentalEntity::find_by_id(rental_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "rental {} missing immediately after return",
                    rental_id
                ))
            })?;

        txn.commit().await?;

        info!(rental_id, "Rental returned");
        Ok(persisted)
    }

    /// Gets a rental by ID
    #[instrument(skip(self))]
    pub async fn get_rental(&self, rental_id: i32) -> Result<Rental, ServiceError> {
        let db = &*self.db_pool;
        RentalEntity::find_by_id(rental_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Rental not found".to_string()))
    }

    /// Lists rentals, most recent first. Ties on `rental_date` break by
    /// descending `rental_id` so paging is deterministic.
    #[instrument(skip(self))]
    pub async fn list_rentals(&self, limit: u64, offset: u64) -> Result<Vec<Rental>, ServiceError> {
        let db = &*self.db_pool;
        let rentals = RentalEntity::find()
            .order_by_desc(rental::Column::RentalDate)
            .order_by_desc(rental::Column::RentalId)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await?;

        Ok(rentals)
    }

    /// Lists a customer's rentals, most recent first. The customer must
    /// exist; an unknown id is NotFound rather than an empty list.
    #[instrument(skip(self))]
    pub async fn list_rentals_by_customer(
        &self,
        customer_id: i32,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Rental>, ServiceError> {
        let db = &*self.db_pool;

        CustomerEntity::find_by_id(customer_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))?;

        let rentals = RentalEntity::find()
            .filter(rental::Column::CustomerId.eq(customer_id))
            .order_by_desc(rental::Column::RentalDate)
            .order_by_desc(rental::Column::RentalId)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await?;

        Ok(rentals)
    }
}
