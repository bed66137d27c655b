//! Invoice repository.
//!
//! Invoices reference a transaction and an externally stored document.
//! Soft-deletable like transactions.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{
    invoices, transactions,
    sea_orm_active_enums::{InvoiceKind, InvoiceStatus},
};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// Invoice not found (or soft-deleted).
    #[error("Invoice not found: {0}")]
    NotFound(Uuid),

    /// Owning transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Owning transaction.
    pub transaction_id: Uuid,
    /// Reference to the stored document.
    pub file_url: String,
    /// Optional invoice number.
    pub invoice_number: Option<String>,
    /// Document kind.
    pub kind: InvoiceKind,
    /// Initial status; defaults to pending.
    pub status: Option<InvoiceStatus>,
    /// Optional due date.
    pub due_date: Option<chrono::NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Filters for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Only invoices of this transaction.
    pub transaction_id: Option<Uuid>,
    /// Only invoices of this kind.
    pub kind: Option<InvoiceKind>,
    /// Only invoices with this status.
    pub status: Option<InvoiceStatus>,
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning transaction does not exist or the
    /// database operation fails.
    pub async fn create(&self, input: CreateInvoiceInput) -> Result<invoices::Model, InvoiceError> {
        let _transaction = transactions::Entity::find_by_id(input.transaction_id)
            .filter(transactions::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::TransactionNotFound(input.transaction_id))?;

        let now = Utc::now().into();
        let invoice = invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            transaction_id: Set(input.transaction_id),
            file_url: Set(input.file_url),
            invoice_number: Set(input.invoice_number),
            kind: Set(input.kind),
            status: Set(input.status.unwrap_or(InvoiceStatus::Pending)),
            due_date: Set(input.due_date),
            notes: Set(input.notes),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = invoice.insert(&self.db).await?;
        Ok(created)
    }

    /// Gets a non-deleted invoice by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is missing, soft-deleted, or the
    /// query fails.
    pub async fn get(&self, invoice_id: Uuid) -> Result<invoices::Model, InvoiceError> {
        invoices::Entity::find_by_id(invoice_id)
            .filter(invoices::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))
    }

    /// Lists non-deleted invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: InvoiceFilter) -> Result<Vec<invoices::Model>, InvoiceError> {
        let mut query = invoices::Entity::find().filter(invoices::Column::DeletedAt.is_null());

        if let Some(transaction_id) = filter.transaction_id {
            query = query.filter(invoices::Column::TransactionId.eq(transaction_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(invoices::Column::Kind.eq(kind));
        }
        if let Some(status) = filter.status {
            query = query.filter(invoices::Column::Status.eq(status));
        }

        let rows = query
            .order_by_desc(invoices::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Soft-deletes an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is missing or the operation fails.
    pub async fn soft_delete(&self, invoice_id: Uuid) -> Result<(), InvoiceError> {
        let invoice = self.get(invoice_id).await?;

        let mut active: invoices::ActiveModel = invoice.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }
}
