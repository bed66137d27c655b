//! Requisition (purchase request) repository.
//!
//! Requisitions reuse the approval state machine of budget requests but
//! are a distinct entity: they carry line items, attachments, a
//! priority, a stored rejection reason, and a human-readable UID whose
//! sequence number is allocated per department per calendar year from a
//! persistent counter. Counters only ever increase, so sequence numbers
//! are never reused even after requisitions are deleted.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use gasto_core::approval::{
    ApprovalError, ApprovalService, requisition_uid, validate_amount, validate_description,
};
use gasto_core::policy::{self, Action, Actor};
use gasto_shared::AppError;

use crate::entities::{
    departments, purchase_request_attachments, purchase_request_items, purchase_requests,
    requisition_sequences,
    sea_orm_active_enums::{RequestStatus, RequisitionPriority},
    users,
};

/// Error types for requisition operations.
#[derive(Debug, thiserror::Error)]
pub enum RequisitionError {
    /// Requisition not found.
    #[error("Requisition not found: {0}")]
    NotFound(Uuid),

    /// Requester has no department assigned.
    #[error("User has no department assigned")]
    NoDepartment,

    /// Department not found.
    #[error("Department not found: {0}")]
    DepartmentNotFound(Uuid),

    /// Requisitions require an active department.
    #[error("Department is inactive: {name}")]
    DepartmentInactive {
        /// The inactive department's name.
        name: String,
    },

    /// Actor is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Transition or validation failure from the approval engine.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RequisitionError> for AppError {
    fn from(e: RequisitionError) -> Self {
        match e {
            RequisitionError::NotFound(id) => {
                Self::NotFound(format!("Requisition not found: {id}"))
            }
            RequisitionError::NoDepartment => {
                Self::Validation("User has no department assigned".to_string())
            }
            RequisitionError::DepartmentNotFound(id) => {
                Self::Validation(format!("Department not found: {id}"))
            }
            RequisitionError::DepartmentInactive { name } => Self::DepartmentInactive(name),
            RequisitionError::Forbidden(message) => Self::Forbidden(message),
            RequisitionError::Approval(e) => e.into(),
            RequisitionError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One line item of a requisition.
#[derive(Debug, Clone)]
pub struct RequisitionItemInput {
    /// What is being purchased.
    pub description: String,
    /// How many units.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// Input for creating a requisition.
#[derive(Debug, Clone)]
pub struct CreateRequisitionInput {
    /// Short title.
    pub title: String,
    /// Total amount (positive, at most 2dp).
    pub total_amount: Decimal,
    /// Free-text justification; markup is stripped before validation.
    pub justification: String,
    /// Priority bucket.
    pub priority: RequisitionPriority,
    /// Optional supplier.
    pub supplier_id: Option<Uuid>,
    /// Optional client.
    pub client_id: Option<Uuid>,
    /// Ordered line items.
    pub items: Vec<RequisitionItemInput>,
    /// Attachment file references.
    pub attachments: Vec<String>,
}

/// Patch for updating a requisition.
///
/// As with budget requests, a `status` carried by a non-admin actor is
/// dropped silently.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequisitionInput {
    /// New title.
    pub title: Option<String>,
    /// New total amount.
    pub total_amount: Option<Decimal>,
    /// New justification.
    pub justification: Option<String>,
    /// New priority.
    pub priority: Option<RequisitionPriority>,
    /// New supplier.
    pub supplier_id: Option<Option<Uuid>>,
    /// New client.
    pub client_id: Option<Option<Uuid>>,
    /// New status (admin only; dropped for other actors).
    pub status: Option<RequestStatus>,
}

/// A requisition with its line items and attachments.
#[derive(Debug, Clone)]
pub struct RequisitionWithDetails {
    /// The requisition row.
    pub requisition: purchase_requests::Model,
    /// Line items in order.
    pub items: Vec<purchase_request_items::Model>,
    /// Attachment references.
    pub attachments: Vec<purchase_request_attachments::Model>,
}

/// Requisition repository.
#[derive(Debug, Clone)]
pub struct RequisitionRepository {
    db: DatabaseConnection,
}

impl RequisitionRepository {
    /// Creates a new requisition repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Allocates the next UID sequence number for a department/year.
    ///
    /// Runs inside the creating transaction. The counter row is upserted
    /// and only ever incremented.
    async fn next_sequence(
        txn: &DatabaseTransaction,
        department_id: Uuid,
        year: i32,
    ) -> Result<i32, DbErr> {
        let existing = requisition_sequences::Entity::find_by_id((department_id, year))
            .one(txn)
            .await?;

        match existing {
            Some(counter) => {
                let next = counter.last_value + 1;
                let mut active: requisition_sequences::ActiveModel = counter.into();
                active.last_value = Set(next);
                active.update(txn).await?;
                Ok(next)
            }
            None => {
                let counter = requisition_sequences::ActiveModel {
                    department_id: Set(department_id),
                    year: Set(year),
                    last_value: Set(1),
                };
                counter.insert(txn).await?;
                Ok(1)
            }
        }
    }

    /// Creates a requisition in `pending` state.
    ///
    /// The requester must belong to an active department; the UID
    /// sequence is allocated inside the same transaction as the insert.
    ///
    /// # Errors
    ///
    /// - `NoDepartment` when the requester has no department
    /// - `DepartmentInactive` when the department is disabled (no row
    ///   is created)
    /// - `Approval` when the amount or justification fails validation
    pub async fn create(
        &self,
        requester: &users::Model,
        input: CreateRequisitionInput,
    ) -> Result<RequisitionWithDetails, RequisitionError> {
        validate_amount(input.total_amount)?;
        let justification = validate_description(&input.justification)?;

        let department_id = requester
            .department_id
            .ok_or(RequisitionError::NoDepartment)?;

        let department = departments::Entity::find_by_id(department_id)
            .one(&self.db)
            .await?
            .ok_or(RequisitionError::DepartmentNotFound(department_id))?;

        if !department.is_active {
            return Err(RequisitionError::DepartmentInactive {
                name: department.name,
            });
        }

        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        let now = Utc::now();
        let year = now.year();
        let sequence = Self::next_sequence(&txn, department_id, year).await?;
        #[allow(clippy::cast_sign_loss)]
        let uid = requisition_uid(&department.name, year, sequence as u32);

        let requisition = purchase_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            requisition_uid: Set(uid),
            title: Set(input.title),
            total_amount: Set(input.total_amount),
            justification: Set(justification),
            request_date: Set(now.date_naive()),
            priority: Set(input.priority),
            status: Set(RequestStatus::Pending),
            rejection_reason: Set(None),
            user_id: Set(requester.id),
            department_id: Set(department_id),
            supplier_id: Set(input.supplier_id),
            client_id: Set(input.client_id),
            reviewed_by: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = requisition.insert(&txn).await?;

        let mut items = Vec::with_capacity(input.items.len());
        for (position, item) in input.items.into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let item = purchase_request_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_request_id: Set(created.id),
                position: Set(position as i32),
                description: Set(item.description),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                created_at: Set(now.into()),
            };
            items.push(item.insert(&txn).await?);
        }

        let mut attachments = Vec::with_capacity(input.attachments.len());
        for file_url in input.attachments {
            let attachment = purchase_request_attachments::ActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_request_id: Set(created.id),
                file_url: Set(file_url),
                created_at: Set(now.into()),
            };
            attachments.push(attachment.insert(&txn).await?);
        }

        txn.commit().await?;

        info!(
            requisition_id = %created.id,
            uid = %created.requisition_uid,
            department_id = %department_id,
            "Requisition created"
        );

        Ok(RequisitionWithDetails {
            requisition: created,
            items,
            attachments,
        })
    }

    /// Gets a requisition by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the requisition is not found or the query fails.
    pub async fn get(
        &self,
        requisition_id: Uuid,
    ) -> Result<purchase_requests::Model, RequisitionError> {
        purchase_requests::Entity::find_by_id(requisition_id)
            .one(&self.db)
            .await?
            .ok_or(RequisitionError::NotFound(requisition_id))
    }

    /// Gets a requisition with its items and attachments.
    ///
    /// # Errors
    ///
    /// Returns an error if the requisition is not found or a query fails.
    pub async fn get_with_details(
        &self,
        requisition_id: Uuid,
    ) -> Result<RequisitionWithDetails, RequisitionError> {
        let requisition = self.get(requisition_id).await?;

        let items = purchase_request_items::Entity::find()
            .filter(purchase_request_items::Column::PurchaseRequestId.eq(requisition_id))
            .order_by_asc(purchase_request_items::Column::Position)
            .all(&self.db)
            .await?;

        let attachments = purchase_request_attachments::Entity::find()
            .filter(purchase_request_attachments::Column::PurchaseRequestId.eq(requisition_id))
            .all(&self.db)
            .await?;

        Ok(RequisitionWithDetails {
            requisition,
            items,
            attachments,
        })
    }

    /// Lists requisitions visible to an actor, oldest first.
    ///
    /// Admins see every requisition; regular users only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(
        &self,
        actor: &Actor,
    ) -> Result<Vec<purchase_requests::Model>, RequisitionError> {
        let mut query = purchase_requests::Entity::find();

        if !actor.is_admin() {
            query = query.filter(purchase_requests::Column::UserId.eq(actor.id));
        }

        let requisitions = query
            .order_by_asc(purchase_requests::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(requisitions)
    }

    /// Approves a pending requisition.
    ///
    /// Requisitions draw no category budget, so approval is an
    /// authorization plus state transition.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the reviewer is not an admin
    /// - `NotFound` when the requisition does not exist
    /// - `Approval` when the requisition already left `pending`
    pub async fn approve(
        &self,
        requisition_id: Uuid,
        reviewer: &Actor,
    ) -> Result<purchase_requests::Model, RequisitionError> {
        if !policy::can(reviewer, Action::ApproveRequest) {
            return Err(RequisitionError::Forbidden(
                "only administrators can approve requisitions".to_string(),
            ));
        }

        let requisition = self.get(requisition_id).await?;
        let action = ApprovalService::approve(requisition.status.clone().into(), reviewer.id)?;

        let mut active: purchase_requests::ActiveModel = requisition.into();
        active.status = Set(action.new_status().into());
        active.reviewed_by = Set(Some(action.reviewed_by()));
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;

        info!(
            requisition_id = %updated.id,
            uid = %updated.requisition_uid,
            reviewer = %reviewer.id,
            "Requisition approved"
        );

        Ok(updated)
    }

    /// Rejects a pending requisition, storing the reason.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::approve`]; rejecting an approved
    /// requisition always fails.
    pub async fn reject(
        &self,
        requisition_id: Uuid,
        reviewer: &Actor,
        reason: Option<String>,
    ) -> Result<purchase_requests::Model, RequisitionError> {
        if !policy::can(reviewer, Action::RejectRequest) {
            return Err(RequisitionError::Forbidden(
                "only administrators can reject requisitions".to_string(),
            ));
        }

        let requisition = self.get(requisition_id).await?;
        let action =
            ApprovalService::reject(requisition.status.clone().into(), reviewer.id, reason)?;

        let mut active: purchase_requests::ActiveModel = requisition.into();
        active.status = Set(action.new_status().into());
        active.reviewed_by = Set(Some(action.reviewed_by()));
        if let gasto_core::approval::ApprovalAction::Reject { reason, .. } = action {
            active.rejection_reason = Set(reason);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;

        info!(
            requisition_id = %updated.id,
            uid = %updated.requisition_uid,
            reviewer = %reviewer.id,
            "Requisition rejected"
        );

        Ok(updated)
    }

    /// Updates a requisition.
    ///
    /// Only the original requester or an admin may update; a non-admin
    /// patch carrying `status` has that field dropped silently.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not touch the requisition, a
    /// changed field fails validation, or the database operation fails.
    pub async fn update(
        &self,
        requisition_id: Uuid,
        actor: &Actor,
        mut patch: UpdateRequisitionInput,
    ) -> Result<purchase_requests::Model, RequisitionError> {
        let requisition = self.get(requisition_id).await?;

        if !policy::can_modify_owned(actor, requisition.user_id) {
            return Err(RequisitionError::Forbidden(
                "only the requester or an administrator can update this requisition".to_string(),
            ));
        }

        if !actor.is_admin() {
            patch.status = None;
        }

        if let Some(amount) = patch.total_amount {
            validate_amount(amount)?;
        }

        let sanitized_justification = match patch.justification {
            Some(ref justification) => Some(validate_description(justification)?),
            None => None,
        };

        let mut active: purchase_requests::ActiveModel = requisition.into();

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(amount) = patch.total_amount {
            active.total_amount = Set(amount);
        }
        if let Some(justification) = sanitized_justification {
            active.justification = Set(justification);
        }
        if let Some(priority) = patch.priority {
            active.priority = Set(priority);
        }
        if let Some(supplier_id) = patch.supplier_id {
            active.supplier_id = Set(supplier_id);
        }
        if let Some(client_id) = patch.client_id {
            active.client_id = Set(client_id);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
