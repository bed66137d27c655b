//! `SeaORM` Entity for the purchase_requests table.
//!
//! Requisitions carry a human-readable UID allocated from
//! [`super::requisition_sequences`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{RequestStatus, RequisitionPriority};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub requisition_uid: String,
    pub title: String,
    pub total_amount: Decimal,
    pub justification: String,
    pub request_date: Date,
    pub priority: RequisitionPriority,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub user_id: Uuid,
    pub department_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Departments,
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(has_many = "super::purchase_request_items::Entity")]
    PurchaseRequestItems,
    #[sea_orm(has_many = "super::purchase_request_attachments::Entity")]
    PurchaseRequestAttachments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departments.def()
    }
}

impl Related<super::purchase_request_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseRequestItems.def()
    }
}

impl Related<super::purchase_request_attachments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseRequestAttachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
