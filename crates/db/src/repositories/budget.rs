//! Budget repository for budget allocations and availability queries.
//!
//! Availability is always recomputed from the underlying rows on every
//! call. New budgets, new approvals, and deletions can happen
//! concurrently, so no running total is ever cached.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use gasto_core::ledger::{Availability, LedgerService};
use gasto_shared::AppError;

use crate::entities::{
    budget_requests, budgets, categories, departments,
    sea_orm_active_enums::{BudgetStatus, RequestStatus},
};

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Department not found.
    #[error("Department not found: {0}")]
    DepartmentNotFound(Uuid),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// End date must not precede the start date.
    #[error("End date must be on or after the start date")]
    InvalidPeriod,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BudgetError> for AppError {
    fn from(e: BudgetError) -> Self {
        match e {
            BudgetError::NotFound(id) => Self::NotFound(format!("Budget not found: {id}")),
            BudgetError::CategoryNotFound(id) => {
                Self::Validation(format!("Category not found: {id}"))
            }
            BudgetError::DepartmentNotFound(id) => {
                Self::Validation(format!("Department not found: {id}"))
            }
            BudgetError::NegativeAmount => {
                Self::Validation("Amount cannot be negative".to_string())
            }
            BudgetError::InvalidPeriod => {
                Self::Validation("End date must be on or after the start date".to_string())
            }
            BudgetError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Category the ceiling applies to.
    pub category_id: Uuid,
    /// User creating the budget.
    pub user_id: Uuid,
    /// Allocated spending ceiling.
    pub max_amount: Decimal,
    /// Period start.
    pub start_date: chrono::NaiveDate,
    /// Period end (inclusive).
    pub end_date: chrono::NaiveDate,
    /// Initial status; defaults to active.
    pub status: Option<BudgetStatus>,
}

/// Input for updating a budget.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    /// New category.
    pub category_id: Option<Uuid>,
    /// New ceiling.
    pub max_amount: Option<Decimal>,
    /// New period start.
    pub start_date: Option<chrono::NaiveDate>,
    /// New period end.
    pub end_date: Option<chrono::NaiveDate>,
    /// New status.
    pub status: Option<BudgetStatus>,
}

/// Filters for listing budgets.
#[derive(Debug, Clone, Default)]
pub struct BudgetFilter {
    /// Only budgets created by this user.
    pub user_id: Option<Uuid>,
    /// Only budgets of this category.
    pub category_id: Option<Uuid>,
    /// Only budgets with this status.
    pub status: Option<BudgetStatus>,
}

/// Category availability response.
#[derive(Debug, Clone)]
pub struct CategoryAvailability {
    /// The category queried.
    pub category_id: Uuid,
    /// Allocated vs approved totals.
    pub availability: Availability,
}

/// Department availability response.
#[derive(Debug, Clone)]
pub struct DepartmentAvailability {
    /// The department queried.
    pub department_id: Uuid,
    /// Department name, for display.
    pub department_name: String,
    /// Allocated vs approved totals over the department's categories.
    pub availability: Availability,
}

/// Computes availability for a category on any connection.
///
/// Shared with the approval path, which runs the same sums inside its
/// serializable transaction.
pub(crate) async fn category_availability<C: ConnectionTrait>(
    conn: &C,
    category_id: Uuid,
) -> Result<Availability, DbErr> {
    let allocated = budgets::Entity::find()
        .filter(budgets::Column::CategoryId.eq(category_id))
        .filter(budgets::Column::Status.eq(BudgetStatus::Active))
        .all(conn)
        .await?
        .into_iter()
        .map(|b| b.max_amount);

    let approved = budget_requests::Entity::find()
        .filter(budget_requests::Column::CategoryId.eq(category_id))
        .filter(budget_requests::Column::Status.eq(RequestStatus::Approved))
        .all(conn)
        .await?
        .into_iter()
        .map(|r| r.requested_amount);

    Ok(LedgerService::availability(allocated, approved))
}

/// Computes availability for a department on any connection.
///
/// Scopes by the categories belonging to the department; the
/// category-to-department link is the canonical one.
pub(crate) async fn department_availability<C: ConnectionTrait>(
    conn: &C,
    department_id: Uuid,
) -> Result<Availability, DbErr> {
    let category_ids: Vec<Uuid> = categories::Entity::find()
        .filter(categories::Column::DepartmentId.eq(department_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    if category_ids.is_empty() {
        return Ok(Availability::new(Decimal::ZERO, Decimal::ZERO));
    }

    let allocated = budgets::Entity::find()
        .filter(budgets::Column::CategoryId.is_in(category_ids.clone()))
        .filter(budgets::Column::Status.eq(BudgetStatus::Active))
        .all(conn)
        .await?
        .into_iter()
        .map(|b| b.max_amount);

    let approved = budget_requests::Entity::find()
        .filter(budget_requests::Column::CategoryId.is_in(category_ids))
        .filter(budget_requests::Column::Status.eq(RequestStatus::Approved))
        .all(conn)
        .await?
        .into_iter()
        .map(|r| r.requested_amount);

    Ok(LedgerService::availability(allocated, approved))
}

/// Budget repository for allocations and availability.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist, the amount is
    /// negative, the period is inverted, or the database operation fails.
    pub async fn create_budget(
        &self,
        input: CreateBudgetInput,
    ) -> Result<budgets::Model, BudgetError> {
        if input.max_amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }
        if input.end_date < input.start_date {
            return Err(BudgetError::InvalidPeriod);
        }

        let _category = categories::Entity::find_by_id(input.category_id)
            .one(&self.db)
            .await?
            .ok_or(BudgetError::CategoryNotFound(input.category_id))?;

        let now = Utc::now().into();
        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(input.category_id),
            user_id: Set(input.user_id),
            max_amount: Set(input.max_amount),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            status: Set(input.status.unwrap_or(BudgetStatus::Active)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = budget.insert(&self.db).await?;
        Ok(result)
    }

    /// Gets a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found or the query fails.
    pub async fn get_budget(&self, budget_id: Uuid) -> Result<budgets::Model, BudgetError> {
        budgets::Entity::find_by_id(budget_id)
            .one(&self.db)
            .await?
            .ok_or(BudgetError::NotFound(budget_id))
    }

    /// Lists budgets with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_budgets(
        &self,
        filter: BudgetFilter,
    ) -> Result<Vec<budgets::Model>, BudgetError> {
        let mut query = budgets::Entity::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(budgets::Column::UserId.eq(user_id));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(budgets::Column::CategoryId.eq(category_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(budgets::Column::Status.eq(status));
        }

        let budgets_list = query
            .order_by_desc(budgets::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(budgets_list)
    }

    /// Updates a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found, a changed field is
    /// invalid, or the database operation fails.
    pub async fn update_budget(
        &self,
        budget_id: Uuid,
        input: UpdateBudgetInput,
    ) -> Result<budgets::Model, BudgetError> {
        let budget = self.get_budget(budget_id).await?;

        let start = input.start_date.unwrap_or(budget.start_date);
        let end = input.end_date.unwrap_or(budget.end_date);
        if end < start {
            return Err(BudgetError::InvalidPeriod);
        }

        if let Some(amount) = input.max_amount
            && amount < Decimal::ZERO
        {
            return Err(BudgetError::NegativeAmount);
        }

        if let Some(category_id) = input.category_id {
            let _category = categories::Entity::find_by_id(category_id)
                .one(&self.db)
                .await?
                .ok_or(BudgetError::CategoryNotFound(category_id))?;
        }

        let mut active: budgets::ActiveModel = budget.into();

        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(amount) = input.max_amount {
            active.max_amount = Set(amount);
        }
        active.start_date = Set(start);
        active.end_date = Set(end);
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found or the operation fails.
    pub async fn delete_budget(&self, budget_id: Uuid) -> Result<(), BudgetError> {
        let result = budgets::Entity::delete_by_id(budget_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound(budget_id));
        }

        Ok(())
    }

    /// Computes available budget for a category.
    ///
    /// total = Σ `max_amount` over active budgets; approved = Σ
    /// `requested_amount` over approved requests; available = total −
    /// approved. The raw figure may be negative; callers display the
    /// floored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the query fails.
    pub async fn available_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<CategoryAvailability, BudgetError> {
        let _category = categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or(BudgetError::CategoryNotFound(category_id))?;

        let availability = category_availability(&self.db, category_id).await?;

        Ok(CategoryAvailability {
            category_id,
            availability,
        })
    }

    /// Computes available budget for a department.
    ///
    /// The scope is the set of categories linked to the department.
    ///
    /// # Errors
    ///
    /// Returns an error if the department does not exist or the query fails.
    pub async fn available_for_department(
        &self,
        department_id: Uuid,
    ) -> Result<DepartmentAvailability, BudgetError> {
        let department = departments::Entity::find_by_id(department_id)
            .one(&self.db)
            .await?
            .ok_or(BudgetError::DepartmentNotFound(department_id))?;

        let availability = department_availability(&self.db, department_id).await?;

        Ok(DepartmentAvailability {
            department_id,
            department_name: department.name,
            availability,
        })
    }
}
