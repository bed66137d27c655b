//! Category repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{categories, sea_orm_active_enums::CategoryKind};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Owning company.
    pub company_id: Uuid,
    /// Department the category belongs to, when any.
    pub department_id: Option<Uuid>,
    /// Category name.
    pub name: String,
    /// Category kind.
    pub kind: CategoryKind,
}

/// Patch for updating a category.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// New name.
    pub name: Option<String>,
    /// New kind.
    pub kind: Option<CategoryKind>,
    /// New department link.
    pub department_id: Option<Option<Uuid>>,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let now = Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            department_id: Set(input.department_id),
            name: Set(input.name),
            kind: Set(input.kind),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = category.insert(&self.db).await?;
        Ok(created)
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the query fails.
    pub async fn find_by_id(&self, category_id: Uuid) -> Result<categories::Model, CategoryError> {
        categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(category_id))
    }

    /// Lists categories of a company.
    ///
    /// Open to every authenticated member of the company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, company_id: Uuid) -> Result<Vec<categories::Model>, CategoryError> {
        let rows = categories::Entity::find()
            .filter(categories::Column::CompanyId.eq(company_id))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the operation
    /// fails.
    pub async fn update(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let category = self.find_by_id(category_id).await?;

        let mut active: categories::ActiveModel = category.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        if let Some(department_id) = input.department_id {
            active.department_id = Set(department_id);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the operation
    /// fails.
    pub async fn delete(&self, category_id: Uuid) -> Result<(), CategoryError> {
        let result = categories::Entity::delete_by_id(category_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound(category_id));
        }

        Ok(())
    }
}
