//! Client repository.
//!
//! Clients mirror suppliers: creator-owned contact entities with an
//! active flag. Unlike suppliers they carry no delete operation.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use gasto_core::policy::{self, Actor};

use crate::entities::clients;

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("Client not found: {0}")]
    NotFound(Uuid),

    /// Actor is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a client.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Client name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Patch for updating a client.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientInput {
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

/// Client repository.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a client owned by the actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateClientInput,
    ) -> Result<clients::Model, ClientError> {
        let now = Utc::now().into();
        let client = clients::ActiveModel {
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

        let created = client.insert(&self.db).await?;
        Ok(created)
    }

    /// Lists clients visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(&self, actor: &Actor) -> Result<Vec<clients::Model>, ClientError> {
        let mut query = clients::Entity::find();

        if !actor.is_admin() {
            query = query.filter(clients::Column::CreatedBy.eq(actor.id));
        }

        let rows = query
            .order_by_asc(clients::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is missing, the actor is not its
    /// creator or an admin, or the operation fails.
    pub async fn update(
        &self,
        client_id: Uuid,
        actor: &Actor,
        input: UpdateClientInput,
    ) -> Result<clients::Model, ClientError> {
        let client = clients::Entity::find_by_id(client_id)
            .one(&self.db)
            .await?
            .ok_or(ClientError::NotFound(client_id))?;

        if !policy::can_modify_owned(actor, client.created_by) {
            return Err(ClientError::Forbidden(
                "only the creator or an administrator can update this client".to_string(),
            ));
        }

        let mut active: clients::ActiveModel = client.into();

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
}
