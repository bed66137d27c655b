//! Active enums stored as short strings.
//!
//! String-backed so the schema stays portable between Postgres and the
//! SQLite databases used in tests.

use gasto_core::approval;
use gasto_core::policy;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role within a company.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Regular user.
    #[sea_orm(string_value = "user")]
    User,
}

impl From<UserRole> for policy::Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::User => Self::User,
        }
    }
}

impl From<policy::Role> for UserRole {
    fn from(role: policy::Role) -> Self {
        match role {
            policy::Role::Admin => Self::Admin,
            policy::Role::User => Self::User,
        }
    }
}

/// Company size bucket.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    /// Up to ~50 people.
    #[sea_orm(string_value = "small")]
    Small,
    /// Up to ~500 people.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// Everything larger.
    #[sea_orm(string_value = "large")]
    Large,
}

/// Category kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Operating expenses.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Capital investments.
    #[sea_orm(string_value = "investment")]
    Investment,
}

/// Budget allocation status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Counted towards availability.
    #[sea_orm(string_value = "active")]
    Active,
    /// Excluded from availability.
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Period elapsed; excluded from availability.
    #[sea_orm(string_value = "expired")]
    Expired,
}

/// Budget request / requisition lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting review.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved. Terminal.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected. Terminal.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<RequestStatus> for approval::RequestStatus {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => Self::Pending,
            RequestStatus::Approved => Self::Approved,
            RequestStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<approval::RequestStatus> for RequestStatus {
    fn from(status: approval::RequestStatus) -> Self {
        match status {
            approval::RequestStatus::Pending => Self::Pending,
            approval::RequestStatus::Approved => Self::Approved,
            approval::RequestStatus::Rejected => Self::Rejected,
        }
    }
}

/// Requisition priority.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RequisitionPriority {
    /// Can wait.
    #[sea_orm(string_value = "low")]
    Low,
    /// Normal processing.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// Should be handled soon.
    #[sea_orm(string_value = "high")]
    High,
    /// Blocks day-to-day operation.
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

impl From<approval::Priority> for RequisitionPriority {
    fn from(priority: approval::Priority) -> Self {
        match priority {
            approval::Priority::Low => Self::Low,
            approval::Priority::Medium => Self::Medium,
            approval::Priority::High => Self::High,
            approval::Priority::Urgent => Self::Urgent,
        }
    }
}

/// Transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Internal movement.
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

/// Transaction status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Recorded, not settled.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled; counted in expense totals.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Cancelled; excluded from totals.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Invoice document kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    /// Payment receipt.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Supplier invoice.
    #[sea_orm(string_value = "invoice")]
    Invoice,
    /// Purchase order.
    #[sea_orm(string_value = "purchase_order")]
    PurchaseOrder,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Invoice status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting payment.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Paid.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Past due date.
    #[sea_orm(string_value = "overdue")]
    Overdue,
    /// Not yet issued.
    #[sea_orm(string_value = "draft")]
    Draft,
}
