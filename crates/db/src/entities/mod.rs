//! `SeaORM` entity definitions.

pub mod budget_requests;
pub mod budgets;
pub mod categories;
pub mod clients;
pub mod companies;
pub mod departments;
pub mod invoices;
pub mod purchase_request_attachments;
pub mod purchase_request_items;
pub mod purchase_requests;
pub mod requisition_sequences;
pub mod sea_orm_active_enums;
pub mod suppliers;
pub mod transactions;
pub mod users;
