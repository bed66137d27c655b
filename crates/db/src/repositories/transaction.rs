//! Transaction repository.
//!
//! Transactions are soft-deleted: `deleted_at` marks logical removal
//! and every read filters deleted rows out, but the row stays for
//! audit. Monthly and department totals are pure group-by aggregations
//! with no business rule attached.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use gasto_core::policy::{self, Actor};

use crate::entities::{
    categories, departments, transactions,
    sea_orm_active_enums::{TransactionKind, TransactionStatus},
};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found (or soft-deleted).
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Actor is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning company.
    pub company_id: Uuid,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Amount (positive).
    pub amount: Decimal,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Optional supplier.
    pub supplier_id: Option<Uuid>,
    /// Optional client.
    pub client_id: Option<Uuid>,
    /// When the transaction happened.
    pub transaction_date: chrono::NaiveDate,
    /// Initial status; defaults to pending.
    pub status: Option<TransactionStatus>,
    /// Payment metadata.
    pub payment_method: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creating user.
    pub created_by: Uuid,
}

/// Patch for updating a transaction.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New status.
    pub status: Option<TransactionStatus>,
    /// New category.
    pub category_id: Option<Option<Uuid>>,
    /// New payment metadata.
    pub payment_method: Option<Option<String>>,
    /// New notes.
    pub notes: Option<Option<String>>,
}

/// Aggregated total for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Sum over completed transactions in the month.
    pub total: Decimal,
}

/// Aggregated expense total for one department.
#[derive(Debug, Clone)]
pub struct DepartmentTotal {
    /// Department ID.
    pub department_id: Uuid,
    /// Department name.
    pub department_name: String,
    /// Sum over completed expense transactions of the department's
    /// categories.
    pub total: Decimal,
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction.
    ///
    /// Validation and insert run inside one transaction boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the database
    /// operation fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        if input.amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount);
        }

        let txn = self.db.begin().await?;

        let now = Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            kind: Set(input.kind),
            amount: Set(input.amount),
            category_id: Set(input.category_id),
            supplier_id: Set(input.supplier_id),
            client_id: Set(input.client_id),
            transaction_date: Set(input.transaction_date),
            status: Set(input.status.unwrap_or(TransactionStatus::Pending)),
            payment_method: Set(input.payment_method),
            reference: Set(input.reference),
            notes: Set(input.notes),
            created_by: Set(input.created_by),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = transaction.insert(&txn).await?;
        txn.commit().await?;

        Ok(created)
    }

    /// Gets a non-deleted transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is missing, soft-deleted, or
    /// the query fails.
    pub async fn get(&self, transaction_id: Uuid) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))
    }

    /// Lists non-deleted transactions of a company, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        company_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::CompanyId.eq(company_id))
            .filter(transactions::Column::DeletedAt.is_null());

        if let Some(category_id) = category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .order_by_desc(transactions::Column::TransactionDate)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is missing, a changed field
    /// is invalid, or the database operation fails.
    pub async fn update(
        &self,
        transaction_id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction = self.get(transaction_id).await?;

        if let Some(amount) = input.amount
            && amount <= Decimal::ZERO
        {
            return Err(TransactionError::NonPositiveAmount);
        }

        let mut active: transactions::ActiveModel = transaction.into();

        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(payment_method) = input.payment_method {
            active.payment_method = Set(payment_method);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Soft-deletes a transaction.
    ///
    /// Only the creating user or an admin may delete. The row is
    /// retained with `deleted_at` set.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not touch the transaction, it
    /// is already deleted, or the database operation fails.
    pub async fn soft_delete(
        &self,
        transaction_id: Uuid,
        actor: &Actor,
    ) -> Result<(), TransactionError> {
        let transaction = self.get(transaction_id).await?;

        if !policy::can_modify_owned(actor, transaction.created_by) {
            return Err(TransactionError::Forbidden(
                "only the creator or an administrator can delete this transaction".to_string(),
            ));
        }

        let mut active: transactions::ActiveModel = transaction.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Totals completed, non-deleted transactions grouped by month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn monthly_totals(
        &self,
        company_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<MonthlyTotal>, TransactionError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::CompanyId.eq(company_id))
            .filter(transactions::Column::Status.eq(TransactionStatus::Completed))
            .filter(transactions::Column::DeletedAt.is_null());

        if let Some(kind) = kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }

        let rows = query.all(&self.db).await?;

        let mut totals: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
        for row in rows {
            let key = (row.transaction_date.year(), row.transaction_date.month());
            *totals.entry(key).or_insert(Decimal::ZERO) += row.amount;
        }

        Ok(totals
            .into_iter()
            .map(|((year, month), total)| MonthlyTotal { year, month, total })
            .collect())
    }

    /// Totals completed, non-deleted expense transactions per department.
    ///
    /// Transactions reach a department through their category's
    /// department link; uncategorized transactions are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn department_totals(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<DepartmentTotal>, TransactionError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::CompanyId.eq(company_id))
            .filter(transactions::Column::Kind.eq(TransactionKind::Expense))
            .filter(transactions::Column::Status.eq(TransactionStatus::Completed))
            .filter(transactions::Column::DeletedAt.is_null())
            .all(&self.db)
            .await?;

        let category_rows = categories::Entity::find()
            .filter(categories::Column::CompanyId.eq(company_id))
            .all(&self.db)
            .await?;
        let category_departments: BTreeMap<Uuid, Uuid> = category_rows
            .into_iter()
            .filter_map(|c| c.department_id.map(|d| (c.id, d)))
            .collect();

        let department_rows = departments::Entity::find()
            .filter(departments::Column::CompanyId.eq(company_id))
            .all(&self.db)
            .await?;

        let mut totals: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for row in rows {
            let Some(category_id) = row.category_id else {
                continue;
            };
            let Some(department_id) = category_departments.get(&category_id) else {
                continue;
            };
            *totals.entry(*department_id).or_insert(Decimal::ZERO) += row.amount;
        }

        Ok(department_rows
            .into_iter()
            .filter_map(|d| {
                totals.get(&d.id).map(|total| DepartmentTotal {
                    department_id: d.id,
                    department_name: d.name,
                    total: *total,
                })
            })
            .collect())
    }
}
