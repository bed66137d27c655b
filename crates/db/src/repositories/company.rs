//! Company repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{companies, sea_orm_active_enums::CompanySize, users};

/// Error types for company operations.
#[derive(Debug, thiserror::Error)]
pub enum CompanyError {
    /// Company not found.
    #[error("Company not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Patch for updating a company.
#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyInput {
    /// New name.
    pub name: Option<String>,
    /// New contact email.
    pub contact_email: Option<String>,
    /// New phone.
    pub phone: Option<Option<String>>,
    /// New size bucket.
    pub size: Option<CompanySize>,
}

/// Company repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a company by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the company is not found or the query fails.
    pub async fn find_by_id(&self, company_id: Uuid) -> Result<companies::Model, CompanyError> {
        companies::Entity::find_by_id(company_id)
            .one(&self.db)
            .await?
            .ok_or(CompanyError::NotFound(company_id))
    }

    /// Counts users of a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn user_count(&self, company_id: Uuid) -> Result<u64, CompanyError> {
        let count = users::Entity::find()
            .filter(users::Column::CompanyId.eq(company_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// Updates a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the company is not found or the operation fails.
    pub async fn update(
        &self,
        company_id: Uuid,
        input: UpdateCompanyInput,
    ) -> Result<companies::Model, CompanyError> {
        let company = self.find_by_id(company_id).await?;

        let mut active: companies::ActiveModel = company.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(contact_email) = input.contact_email {
            active.contact_email = Set(contact_email);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(size) = input.size {
            active.size = Set(size);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
