//! Supplier repository.
//!
//! Suppliers are creator-owned: regular users only see and mutate the
//! ones they created, admins see everything.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use gasto_core::policy::{self, Actor};

use crate::entities::suppliers;

/// Error types for supplier operations.
#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    /// Supplier not found.
    #[error("Supplier not found: {0}")]
    NotFound(Uuid),

    /// Actor is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a supplier.
#[derive(Debug, Clone)]
pub struct CreateSupplierInput {
    /// Supplier name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Patch for updating a supplier.
#[derive(Debug, Clone, Default)]
pub struct UpdateSupplierInput {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<Option<String>>,
    /// New phone.
    pub phone: Option<Option<String>>,
    /// New address.
    pub address: Option<Option<String>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Supplier repository.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: DatabaseConnection,
}

impl SupplierRepository {
    /// Creates a new supplier repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a supplier owned by the actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateSupplierInput,
    ) -> Result<suppliers::Model, SupplierError> {
        let now = Utc::now().into();
        let supplier = suppliers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            is_active: Set(true),
            created_by: Set(actor.id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = supplier.insert(&self.db).await?;
        Ok(created)
    }

    /// Lists suppliers visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(&self, actor: &Actor) -> Result<Vec<suppliers::Model>, SupplierError> {
        let mut query = suppliers::Entity::find();

        if !actor.is_admin() {
            query = query.filter(suppliers::Column::CreatedBy.eq(actor.id));
        }

        let rows = query
            .order_by_asc(suppliers::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier is missing, the actor is not
    /// its creator or an admin, or the operation fails.
    pub async fn update(
        &self,
        supplier_id: Uuid,
        actor: &Actor,
        input: UpdateSupplierInput,
    ) -> Result<suppliers::Model, SupplierError> {
        let supplier = suppliers::Entity::find_by_id(supplier_id)
            .one(&self.db)
            .await?
            .ok_or(SupplierError::NotFound(supplier_id))?;

        if !policy::can_modify_owned(actor, supplier.created_by) {
            return Err(SupplierError::Forbidden(
                "only the creator or an administrator can update this supplier".to_string(),
            ));
        }

        let mut active: suppliers::ActiveModel = supplier.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier is missing, the actor is not
    /// its creator or an admin, or the operation fails.
    pub async fn delete(&self, supplier_id: Uuid, actor: &Actor) -> Result<(), SupplierError> {
        let supplier = suppliers::Entity::find_by_id(supplier_id)
            .one(&self.db)
            .await?
            .ok_or(SupplierError::NotFound(supplier_id))?;

        if !policy::can_modify_owned(actor, supplier.created_by) {
            return Err(SupplierError::Forbidden(
                "only the creator or an administrator can delete this supplier".to_string(),
            ));
        }

        suppliers::Entity::delete_by_id(supplier_id)
            .exec(&self.db)
            .await?;

        Ok(())
    }
}
