//! Department repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{departments, users};

/// Error types for department operations.
#[derive(Debug, thiserror::Error)]
pub enum DepartmentError {
    /// Department not found.
    #[error("Department not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a department.
#[derive(Debug, Clone)]
pub struct CreateDepartmentInput {
    /// Owning company.
    pub company_id: Uuid,
    /// Department name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Patch for updating a department.
#[derive(Debug, Clone, Default)]
pub struct UpdateDepartmentInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// A department with its user count.
#[derive(Debug, Clone)]
pub struct DepartmentWithUserCount {
    /// Department row.
    pub department: departments::Model,
    /// Number of users assigned to it.
    pub user_count: u64,
}

/// Department repository.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    db: DatabaseConnection,
}

impl DepartmentRepository {
    /// Creates a new department repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateDepartmentInput,
    ) -> Result<departments::Model, DepartmentError> {
        let now = Utc::now().into();
        let department = departments::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            name: Set(input.name),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = department.insert(&self.db).await?;
        Ok(created)
    }

    /// Finds a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the department is not found or the query fails.
    pub async fn find_by_id(
        &self,
        department_id: Uuid,
    ) -> Result<departments::Model, DepartmentError> {
        departments::Entity::find_by_id(department_id)
            .one(&self.db)
            .await?
            .ok_or(DepartmentError::NotFound(department_id))
    }

    /// Lists a company's departments with user counts.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_with_user_counts(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<DepartmentWithUserCount>, DepartmentError> {
        let department_rows = departments::Entity::find()
            .filter(departments::Column::CompanyId.eq(company_id))
            .order_by_asc(departments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut result = Vec::with_capacity(department_rows.len());
        for department in department_rows {
            let user_count = users::Entity::find()
                .filter(users::Column::DepartmentId.eq(department.id))
                .count(&self.db)
                .await?;

            result.push(DepartmentWithUserCount {
                department,
                user_count,
            });
        }

        Ok(result)
    }

    /// Updates a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the department is not found or the operation
    /// fails.
    pub async fn update(
        &self,
        department_id: Uuid,
        input: UpdateDepartmentInput,
    ) -> Result<departments::Model, DepartmentError> {
        let department = self.find_by_id(department_id).await?;

        let mut active: departments::ActiveModel = department.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the department is not found or the operation
    /// fails.
    pub async fn delete(&self, department_id: Uuid) -> Result<(), DepartmentError> {
        let result = departments::Entity::delete_by_id(department_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DepartmentError::NotFound(department_id));
        }

        Ok(())
    }
}
