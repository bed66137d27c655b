//! Invoice routes.
//!
//! Document binaries live in external storage; these routes track the
//! metadata and the opaque file reference. Creation emits
//! `invoice-created` on the `transactions` channel.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{error_response, internal_error};
use gasto_db::InvoiceRepository;
use gasto_db::entities::sea_orm_active_enums::{InvoiceKind, InvoiceStatus};
use gasto_db::repositories::invoice::{CreateInvoiceInput, InvoiceError, InvoiceFilter};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices/all", get(list_invoices))
        .route("/invoices/create", post(create_invoice))
        .route("/invoices/{id}", get(get_invoice))
        .route("/invoices/{id}", delete(delete_invoice))
}

/// Request body for creating an invoice.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceBody {
    /// Owning transaction.
    pub transaction_id: Uuid,
    /// Reference to the stored document.
    pub file_url: String,
    /// Optional invoice number.
    pub invoice_number: Option<String>,
    /// Kind: receipt, invoice, purchase_order, other.
    pub kind: String,
    /// Status: pending, paid, overdue, draft.
    pub status: Option<String>,
    /// Optional due date.
    pub due_date: Option<chrono::NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
}

/// Query parameters for listing invoices.
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    /// Filter by transaction.
    pub transaction_id: Option<Uuid>,
    /// Filter by kind.
    pub kind: Option<String>,
    /// Filter by status.
    pub status: Option<String>,
}

fn parse_kind(s: &str) -> Option<InvoiceKind> {
    match s.to_lowercase().as_str() {
        "receipt" => Some(InvoiceKind::Receipt),
        "invoice" => Some(InvoiceKind::Invoice),
        "purchase_order" => Some(InvoiceKind::PurchaseOrder),
        "other" => Some(InvoiceKind::Other),
        _ => None,
    }
}

fn parse_status(s: &str) -> Option<InvoiceStatus> {
    match s.to_lowercase().as_str() {
        "pending" => Some(InvoiceStatus::Pending),
        "paid" => Some(InvoiceStatus::Paid),
        "overdue" => Some(InvoiceStatus::Overdue),
        "draft" => Some(InvoiceStatus::Draft),
        _ => None,
    }
}

/// GET `/invoices/all` - List invoices with optional filters.
async fn list_invoices(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListInvoicesQuery>,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref() {
        Some(raw) => match parse_kind(raw) {
            Some(kind) => Some(kind),
            None => {
                return error_response(StatusCode::BAD_REQUEST, "invalid_kind", "Unknown kind");
            }
        },
        None => None,
    };
    let status = match query.status.as_deref() {
        Some(raw) => match parse_status(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(StatusCode::BAD_REQUEST, "invalid_status", "Unknown status");
            }
        },
        None => None,
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    let filter = InvoiceFilter {
        transaction_id: query.transaction_id,
        kind,
        status,
    };

    match repo.list(filter).await {
        Ok(invoices) => (StatusCode::OK, Json(json!({ "invoices": invoices }))).into_response(),
        Err(e) => map_invoice_error(&e),
    }
}

/// POST `/invoices/create` - Attach an invoice to a transaction.
async fn create_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateInvoiceBody>,
) -> impl IntoResponse {
    let Some(kind) = parse_kind(&payload.kind) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_kind",
            "Kind must be one of: receipt, invoice, purchase_order, other",
        );
    };

    let status = match payload.status.as_deref() {
        Some(raw) => match parse_status(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "Status must be one of: pending, paid, overdue, draft",
                );
            }
        },
        None => None,
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    let input = CreateInvoiceInput {
        transaction_id: payload.transaction_id,
        file_url: payload.file_url,
        invoice_number: payload.invoice_number,
        kind,
        status,
        due_date: payload.due_date,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(invoice) => {
            state
                .push
                .trigger("transactions", "invoice-created", json!({ "invoice": invoice }))
                .await;

            (StatusCode::CREATED, Json(json!({ "invoice": invoice }))).into_response()
        }
        Err(e) => map_invoice_error(&e),
    }
}

/// GET `/invoices/{id}` - Get a single invoice.
async fn get_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(invoice) => (StatusCode::OK, Json(json!({ "invoice": invoice }))).into_response(),
        Err(e) => map_invoice_error(&e),
    }
}

/// DELETE `/invoices/{id}` - Soft-delete an invoice.
async fn delete_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.soft_delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Invoice deleted successfully" })),
        )
            .into_response(),
        Err(e) => map_invoice_error(&e),
    }
}

/// Maps invoice errors to HTTP responses.
fn map_invoice_error(e: &InvoiceError) -> axum::response::Response {
    match e {
        InvoiceError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Invoice not found: {id}"),
        ),
        InvoiceError::TransactionNotFound(id) => error_response(
            StatusCode::BAD_REQUEST,
            "transaction_not_found",
            format!("Transaction not found: {id}"),
        ),
        InvoiceError::Database(e) => {
            error!(error = %e, "Invoice operation failed");
            internal_error()
        }
    }
}
