//! Budget request repository and approval orchestration.
//!
//! Approval loads the request, checks authorization, recomputes
//! category (and, when linked, department) availability, and persists
//! the transition inside one serializable transaction, so two
//! concurrent approvals against the same category cannot both pass the
//! availability check.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IsolationLevel,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use gasto_core::approval::{ApprovalError, ApprovalService, validate_amount, validate_description};
use gasto_core::ledger::{BudgetSnapshot, LedgerError, LedgerService};
use gasto_core::policy::{self, Action, Actor};
use gasto_shared::AppError;

use crate::entities::{
    budget_requests, categories, departments, sea_orm_active_enums::RequestStatus, users,
};
use crate::repositories::budget::{category_availability, department_availability};

/// Error types for budget request operations.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Budget request not found.
    #[error("Budget request not found: {0}")]
    NotFound(Uuid),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Department behind the category is gone.
    #[error("Department not found: {0}")]
    DepartmentNotFound(Uuid),

    /// Actor is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Transition or validation failure from the approval engine.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// The draw does not fit the remaining budget.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        match e {
            RequestError::NotFound(id) => Self::NotFound(format!("Budget request not found: {id}")),
            RequestError::CategoryNotFound(id) => {
                Self::Validation(format!("Category not found: {id}"))
            }
            RequestError::DepartmentNotFound(id) => {
                Self::Validation(format!("Department not found: {id}"))
            }
            RequestError::Forbidden(message) => Self::Forbidden(message),
            RequestError::Approval(e) => e.into(),
            RequestError::Ledger(e) => e.into(),
            RequestError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a budget request.
#[derive(Debug, Clone)]
pub struct CreateRequestInput {
    /// Requesting user.
    pub user_id: Uuid,
    /// Category to draw from.
    pub category_id: Uuid,
    /// Requested amount (positive, at most 2dp).
    pub requested_amount: Decimal,
    /// Free-text justification; markup is stripped before validation.
    pub description: String,
}

/// Patch for updating a budget request.
///
/// A `status` carried by a non-admin actor is silently dropped rather
/// than rejected; the other fields still apply.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequestInput {
    /// New category.
    pub category_id: Option<Uuid>,
    /// New amount.
    pub requested_amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New status (admin only; dropped for other actors).
    pub status: Option<RequestStatus>,
}

/// Department portion of the approval response.
#[derive(Debug, Clone)]
pub struct DepartmentBudgetInfo {
    /// Department name.
    pub name: String,
    /// Remaining department budget before the approval.
    pub before: Decimal,
    /// Remaining department budget after the approval.
    pub after: Decimal,
}

/// Before/after budget context returned with an approval.
#[derive(Debug, Clone)]
pub struct BudgetInfo {
    /// The amount that was approved.
    pub requested_amount: Decimal,
    /// Category-level remaining budget around the approval.
    pub total_budget: BudgetSnapshot,
    /// Department-level remaining budget, when the category maps to one.
    pub department_budget: Option<DepartmentBudgetInfo>,
}

/// An approved request plus its budget context.
#[derive(Debug, Clone)]
pub struct ApprovedRequest {
    /// The updated request row.
    pub request: budget_requests::Model,
    /// Budget snapshots taken inside the approval transaction.
    pub budget_info: BudgetInfo,
}

/// Budget request repository.
#[derive(Debug, Clone)]
pub struct BudgetRequestRepository {
    db: DatabaseConnection,
}

impl BudgetRequestRepository {
    /// Creates a new budget request repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a budget request in `pending` state.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount or description fails validation,
    /// the category does not exist, or the database operation fails.
    pub async fn create(
        &self,
        input: CreateRequestInput,
    ) -> Result<budget_requests::Model, RequestError> {
        validate_amount(input.requested_amount)?;
        let description = validate_description(&input.description)?;

        let _category = categories::Entity::find_by_id(input.category_id)
            .one(&self.db)
            .await?
            .ok_or(RequestError::CategoryNotFound(input.category_id))?;

        let now = Utc::now();
        let request = budget_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            category_id: Set(input.category_id),
            requested_amount: Set(input.requested_amount),
            description: Set(description),
            request_date: Set(now.date_naive()),
            status: Set(RequestStatus::Pending),
            reviewed_by: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = request.insert(&self.db).await?;

        info!(
            request_id = %created.id,
            category_id = %created.category_id,
            amount = %created.requested_amount,
            "Budget request created"
        );

        Ok(created)
    }

    /// Gets a request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is not found or the query fails.
    pub async fn get(&self, request_id: Uuid) -> Result<budget_requests::Model, RequestError> {
        budget_requests::Entity::find_by_id(request_id)
            .one(&self.db)
            .await?
            .ok_or(RequestError::NotFound(request_id))
    }

    /// Lists requests created by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<budget_requests::Model>, RequestError> {
        let requests = budget_requests::Entity::find()
            .filter(budget_requests::Column::UserId.eq(user_id))
            .order_by_desc(budget_requests::Column::RequestDate)
            .all(&self.db)
            .await?;
        Ok(requests)
    }

    /// Lists pending requests across a company, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<budget_requests::Model>, RequestError> {
        let requests = budget_requests::Entity::find()
            .filter(budget_requests::Column::Status.eq(RequestStatus::Pending))
            .join(JoinType::InnerJoin, budget_requests::Relation::Users.def())
            .filter(users::Column::CompanyId.eq(company_id))
            .order_by_asc(budget_requests::Column::RequestDate)
            .all(&self.db)
            .await?;
        Ok(requests)
    }

    /// Approves a pending request.
    ///
    /// The status check, both availability checks, and the write run in
    /// a single serializable transaction.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the reviewer is not an admin
    /// - `NotFound` when the request does not exist
    /// - `Approval` when the request already left `pending`
    /// - `Ledger` when the category or department budget cannot absorb
    ///   the draw (nothing is written in that case)
    pub async fn approve(
        &self,
        request_id: Uuid,
        reviewer: &Actor,
    ) -> Result<ApprovedRequest, RequestError> {
        if !policy::can(reviewer, Action::ApproveRequest) {
            return Err(RequestError::Forbidden(
                "only administrators can approve budget requests".to_string(),
            ));
        }

        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        let request = budget_requests::Entity::find_by_id(request_id)
            .one(&txn)
            .await?
            .ok_or(RequestError::NotFound(request_id))?;

        let action = ApprovalService::approve(request.status.clone().into(), reviewer.id)?;

        let category = categories::Entity::find_by_id(request.category_id)
            .one(&txn)
            .await?
            .ok_or(RequestError::CategoryNotFound(request.category_id))?;

        let availability = category_availability(&txn, category.id).await?;
        let total_budget =
            LedgerService::check_category_draw(&availability, request.requested_amount)?;

        let department_budget = match category.department_id {
            Some(department_id) => {
                let department = departments::Entity::find_by_id(department_id)
                    .one(&txn)
                    .await?
                    .ok_or(RequestError::DepartmentNotFound(department_id))?;

                let dept_availability = department_availability(&txn, department_id).await?;
                let snapshot = LedgerService::check_department_draw(
                    &dept_availability,
                    request.requested_amount,
                    &department.name,
                )?;

                Some(DepartmentBudgetInfo {
                    name: department.name,
                    before: snapshot.before,
                    after: snapshot.after,
                })
            }
            None => None,
        };

        let requested_amount = request.requested_amount;
        let mut active: budget_requests::ActiveModel = request.into();
        active.status = Set(action.new_status().into());
        active.reviewed_by = Set(Some(action.reviewed_by()));
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(
            request_id = %updated.id,
            reviewer = %reviewer.id,
            amount = %requested_amount,
            remaining = %total_budget.after,
            "Budget request approved"
        );

        Ok(ApprovedRequest {
            request: updated,
            budget_info: BudgetInfo {
                requested_amount,
                total_budget,
                department_budget,
            },
        })
    }

    /// Rejects a pending request.
    ///
    /// Budget requests store no rejection reason (requisitions do).
    /// Rejecting an approved request always fails; approval is one-way.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::approve`], minus the ledger checks.
    pub async fn reject(
        &self,
        request_id: Uuid,
        reviewer: &Actor,
    ) -> Result<budget_requests::Model, RequestError> {
        if !policy::can(reviewer, Action::RejectRequest) {
            return Err(RequestError::Forbidden(
                "only administrators can reject budget requests".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let request = budget_requests::Entity::find_by_id(request_id)
            .one(&txn)
            .await?
            .ok_or(RequestError::NotFound(request_id))?;

        let action = ApprovalService::reject(request.status.clone().into(), reviewer.id, None)?;

        let mut active: budget_requests::ActiveModel = request.into();
        active.status = Set(action.new_status().into());
        active.reviewed_by = Set(Some(action.reviewed_by()));
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(
            request_id = %updated.id,
            reviewer = %reviewer.id,
            "Budget request rejected"
        );

        Ok(updated)
    }

    /// Updates a request.
    ///
    /// Only the original requester or an admin may update. A non-admin
    /// patch carrying `status` has that field dropped silently; changed
    /// fields are re-validated under the create rules. Amount changes do
    /// not re-trigger availability checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not touch the request, a
    /// changed field fails validation, or the database operation fails.
    pub async fn update(
        &self,
        request_id: Uuid,
        actor: &Actor,
        mut patch: UpdateRequestInput,
    ) -> Result<budget_requests::Model, RequestError> {
        let request = self.get(request_id).await?;

        if !policy::can_modify_owned(actor, request.user_id) {
            return Err(RequestError::Forbidden(
                "only the requester or an administrator can update this request".to_string(),
            ));
        }

        // Non-admin actors may not touch the status; the field is
        // dropped from the patch, not rejected.
        if !actor.is_admin() {
            patch.status = None;
        }

        if let Some(amount) = patch.requested_amount {
            validate_amount(amount)?;
        }

        let sanitized_description = match patch.description {
            Some(ref description) => Some(validate_description(description)?),
            None => None,
        };

        if let Some(category_id) = patch.category_id {
            let _category = categories::Entity::find_by_id(category_id)
                .one(&self.db)
                .await?
                .ok_or(RequestError::CategoryNotFound(category_id))?;
        }

        let mut active: budget_requests::ActiveModel = request.into();

        if let Some(category_id) = patch.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(amount) = patch.requested_amount {
            active.requested_amount = Set(amount);
        }
        if let Some(description) = sanitized_description {
            active.description = Set(description);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Hard-deletes a request.
    ///
    /// Only the original requester or an admin may delete. No
    /// notification is emitted for deletions.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not touch the request, the
    /// request does not exist, or the database operation fails.
    pub async fn delete(&self, request_id: Uuid, actor: &Actor) -> Result<(), RequestError> {
        let request = self.get(request_id).await?;

        if !policy::can_modify_owned(actor, request.user_id) {
            return Err(RequestError::Forbidden(
                "only the requester or an administrator can delete this request".to_string(),
            ));
        }

        budget_requests::Entity::delete_by_id(request_id)
            .exec(&self.db)
            .await?;

        Ok(())
    }
}
