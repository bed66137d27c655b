//! Initial database migration.
//!
//! Creates all core tables and indexes. Built with the schema builder
//! so the same migration runs on Postgres and on the SQLite databases
//! used by the integration tests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // Tenancy: companies, departments, categories, users
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Companies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::ContactEmail).string().not_null())
                    .col(ColumnDef::new(Companies::Phone).string())
                    .col(ColumnDef::new(Companies::Size).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::Description).string())
                    .col(
                        ColumnDef::new(Departments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Departments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-departments-company_id")
                            .from(Departments::Table, Departments::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Categories::DepartmentId).uuid())
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-company_id")
                            .from(Categories::Table, Categories::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-department_id")
                            .from(Categories::Table, Categories::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Users::DepartmentId).uuid())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::IsFirstUser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CreatedBy).uuid())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-company_id")
                            .from(Users::Table, Users::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-department_id")
                            .from(Users::Table, Users::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Budget pools and draw requests
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budgets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Budgets::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Budgets::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Budgets::MaxAmount)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Budgets::StartDate).date().not_null())
                    .col(ColumnDef::new(Budgets::EndDate).date().not_null())
                    .col(ColumnDef::new(Budgets::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Budgets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Budgets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-category_id")
                            .from(Budgets::Table, Budgets::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-user_id")
                            .from(Budgets::Table, Budgets::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-category-status")
                    .table(Budgets::Table)
                    .col(Budgets::CategoryId)
                    .col(Budgets::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BudgetRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BudgetRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BudgetRequests::UserId).uuid().not_null())
                    .col(ColumnDef::new(BudgetRequests::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(BudgetRequests::RequestedAmount)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BudgetRequests::Description).text().not_null())
                    .col(ColumnDef::new(BudgetRequests::RequestDate).date().not_null())
                    .col(
                        ColumnDef::new(BudgetRequests::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BudgetRequests::ReviewedBy).uuid())
                    .col(
                        ColumnDef::new(BudgetRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budget_requests-user_id")
                            .from(BudgetRequests::Table, BudgetRequests::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budget_requests-category_id")
                            .from(BudgetRequests::Table, BudgetRequests::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budget_requests-category-status")
                    .table(BudgetRequests::Table)
                    .col(BudgetRequests::CategoryId)
                    .col(BudgetRequests::Status)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Contacts
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Suppliers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Suppliers::Name).string().not_null())
                    .col(ColumnDef::new(Suppliers::Email).string())
                    .col(ColumnDef::new(Suppliers::Phone).string())
                    .col(ColumnDef::new(Suppliers::Address).string())
                    .col(
                        ColumnDef::new(Suppliers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Suppliers::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Suppliers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Suppliers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-suppliers-created_by")
                            .from(Suppliers::Table, Suppliers::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clients::Name).string().not_null())
                    .col(ColumnDef::new(Clients::Email).string())
                    .col(ColumnDef::new(Clients::Phone).string())
                    .col(ColumnDef::new(Clients::Address).string())
                    .col(
                        ColumnDef::new(Clients::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Clients::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-clients-created_by")
                            .from(Clients::Table, Clients::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Transactions and invoices
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Transactions::Amount)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::CategoryId).uuid())
                    .col(ColumnDef::new(Transactions::SupplierId).uuid())
                    .col(ColumnDef::new(Transactions::ClientId).uuid())
                    .col(
                        ColumnDef::new(Transactions::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::PaymentMethod).string())
                    .col(ColumnDef::new(Transactions::Reference).string())
                    .col(ColumnDef::new(Transactions::Notes).string())
                    .col(ColumnDef::new(Transactions::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Transactions::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-company_id")
                            .from(Transactions::Table, Transactions::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-category_id")
                            .from(Transactions::Table, Transactions::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-supplier_id")
                            .from(Transactions::Table, Transactions::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-client_id")
                            .from(Transactions::Table, Transactions::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-company-status")
                    .table(Transactions::Table)
                    .col(Transactions::CompanyId)
                    .col(Transactions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Invoices::TransactionId).uuid().not_null())
                    .col(ColumnDef::new(Invoices::FileUrl).string().not_null())
                    .col(ColumnDef::new(Invoices::InvoiceNumber).string())
                    .col(ColumnDef::new(Invoices::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Invoices::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Invoices::DueDate).date())
                    .col(ColumnDef::new(Invoices::Notes).string())
                    .col(ColumnDef::new(Invoices::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Invoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invoices-transaction_id")
                            .from(Invoices::Table, Invoices::TransactionId)
                            .to(Transactions::Table, Transactions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Requisitions
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(PurchaseRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::RequisitionUid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PurchaseRequests::Title).string().not_null())
                    .col(
                        ColumnDef::new(PurchaseRequests::TotalAmount)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::Justification)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::RequestDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::Priority)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseRequests::RejectionReason).string())
                    .col(ColumnDef::new(PurchaseRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(PurchaseRequests::DepartmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseRequests::SupplierId).uuid())
                    .col(ColumnDef::new(PurchaseRequests::ClientId).uuid())
                    .col(ColumnDef::new(PurchaseRequests::ReviewedBy).uuid())
                    .col(
                        ColumnDef::new(PurchaseRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_requests-user_id")
                            .from(PurchaseRequests::Table, PurchaseRequests::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_requests-department_id")
                            .from(PurchaseRequests::Table, PurchaseRequests::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_requests-supplier_id")
                            .from(PurchaseRequests::Table, PurchaseRequests::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_requests-client_id")
                            .from(PurchaseRequests::Table, PurchaseRequests::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseRequestItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseRequestItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestItems::PurchaseRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestItems::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestItems::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestItems::Quantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestItems::UnitPrice)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_request_items-purchase_request_id")
                            .from(
                                PurchaseRequestItems::Table,
                                PurchaseRequestItems::PurchaseRequestId,
                            )
                            .to(PurchaseRequests::Table, PurchaseRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseRequestAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseRequestAttachments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestAttachments::PurchaseRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestAttachments::FileUrl)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequestAttachments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_request_attachments-purchase_request_id")
                            .from(
                                PurchaseRequestAttachments::Table,
                                PurchaseRequestAttachments::PurchaseRequestId,
                            )
                            .to(PurchaseRequests::Table, PurchaseRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // UID counters. Rows are never deleted or decremented, which is
        // what guarantees sequence numbers are never reused.
        manager
            .create_table(
                Table::create()
                    .table(RequisitionSequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequisitionSequences::DepartmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequisitionSequences::Year)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RequisitionSequences::LastValue)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RequisitionSequences::DepartmentId)
                            .col(RequisitionSequences::Year),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-requisition_sequences-department_id")
                            .from(
                                RequisitionSequences::Table,
                                RequisitionSequences::DepartmentId,
                            )
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequisitionSequences::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(PurchaseRequestAttachments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseRequestItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BudgetRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;

        Ok(())
    }
}

// ============================================================
// Table identifiers
// ============================================================

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    ContactEmail,
    Phone,
    Size,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    CompanyId,
    Name,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    CompanyId,
    DepartmentId,
    Name,
    Kind,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    CompanyId,
    DepartmentId,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Role,
    IsActive,
    IsFirstUser,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    CategoryId,
    UserId,
    MaxAmount,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BudgetRequests {
    Table,
    Id,
    UserId,
    CategoryId,
    RequestedAmount,
    Description,
    RequestDate,
    Status,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    CompanyId,
    Kind,
    Amount,
    CategoryId,
    SupplierId,
    ClientId,
    TransactionDate,
    Status,
    PaymentMethod,
    Reference,
    Notes,
    CreatedBy,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Invoices {
    Table,
    Id,
    TransactionId,
    FileUrl,
    InvoiceNumber,
    Kind,
    Status,
    DueDate,
    Notes,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PurchaseRequests {
    Table,
    Id,
    RequisitionUid,
    Title,
    TotalAmount,
    Justification,
    RequestDate,
    Priority,
    Status,
    RejectionReason,
    UserId,
    DepartmentId,
    SupplierId,
    ClientId,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PurchaseRequestItems {
    Table,
    Id,
    PurchaseRequestId,
    Position,
    Description,
    Quantity,
    UnitPrice,
    CreatedAt,
}

#[derive(Iden)]
enum PurchaseRequestAttachments {
    Table,
    Id,
    PurchaseRequestId,
    FileUrl,
    CreatedAt,
}

#[derive(Iden)]
enum RequisitionSequences {
    Table,
    DepartmentId,
    Year,
    LastValue,
}
