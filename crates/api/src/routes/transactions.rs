//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{error_response, internal_error};
use gasto_db::TransactionRepository;
use gasto_db::entities::sea_orm_active_enums::{TransactionKind, TransactionStatus};
use gasto_db::repositories::transaction::{
    CreateTransactionInput, TransactionError, UpdateTransactionInput,
};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions/all", get(list_transactions))
        .route("/transactions/create", post(create_transaction))
        .route("/transactions/totals/monthly", get(monthly_totals))
        .route("/transactions/totals/departments", get(department_totals))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", put(update_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionBody {
    /// Kind: income, expense, transfer.
    pub kind: String,
    /// Amount.
    pub amount: Decimal,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Optional supplier.
    pub supplier_id: Option<Uuid>,
    /// Optional client.
    pub client_id: Option<Uuid>,
    /// Transaction date.
    pub transaction_date: chrono::NaiveDate,
    /// Status: pending, completed, cancelled.
    pub status: Option<String>,
    /// Payment metadata.
    pub payment_method: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionBody {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New status.
    pub status: Option<String>,
    /// New payment metadata.
    pub payment_method: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by category.
    pub category_id: Option<Uuid>,
}

/// Query parameters for monthly totals.
#[derive(Debug, Deserialize)]
pub struct MonthlyTotalsQuery {
    /// Restrict to one transaction kind.
    pub kind: Option<String>,
}

fn parse_kind(s: &str) -> Option<TransactionKind> {
    match s.to_lowercase().as_str() {
        "income" => Some(TransactionKind::Income),
        "expense" => Some(TransactionKind::Expense),
        "transfer" => Some(TransactionKind::Transfer),
        _ => None,
    }
}

fn parse_status(s: &str) -> Option<TransactionStatus> {
    match s.to_lowercase().as_str() {
        "pending" => Some(TransactionStatus::Pending),
        "completed" => Some(TransactionStatus::Completed),
        "cancelled" => Some(TransactionStatus::Cancelled),
        _ => None,
    }
}

/// GET `/transactions/all` - Non-deleted transactions of the company.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list(auth.company_id(), query.category_id).await {
        Ok(transactions) => {
            (StatusCode::OK, Json(json!({ "transactions": transactions }))).into_response()
        }
        Err(e) => map_transaction_error(&e),
    }
}

/// POST `/transactions/create` - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionBody>,
) -> impl IntoResponse {
    let Some(kind) = parse_kind(&payload.kind) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_kind",
            "Kind must be one of: income, expense, transfer",
        );
    };

    let status = match payload.status.as_deref() {
        Some(raw) => match parse_status(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "Status must be one of: pending, completed, cancelled",
                );
            }
        },
        None => None,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        company_id: auth.company_id(),
        kind,
        amount: payload.amount,
        category_id: payload.category_id,
        supplier_id: payload.supplier_id,
        client_id: payload.client_id,
        transaction_date: payload.transaction_date,
        status,
        payment_method: payload.payment_method,
        reference: payload.reference,
        notes: payload.notes,
        created_by: auth.user_id(),
    };

    match repo.create(input).await {
        Ok(transaction) => {
            (StatusCode::CREATED, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => map_transaction_error(&e),
    }
}

/// GET `/transactions/totals/monthly` - Completed totals per month.
async fn monthly_totals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthlyTotalsQuery>,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref() {
        Some(raw) => match parse_kind(raw) {
            Some(kind) => Some(kind),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_kind",
                    "Kind must be one of: income, expense, transfer",
                );
            }
        },
        None => None,
    };

    let repo = TransactionRepository::new((*state.db).clone());

    match repo.monthly_totals(auth.company_id(), kind).await {
        Ok(totals) => {
            let body: Vec<serde_json::Value> = totals
                .into_iter()
                .map(|t| json!({ "year": t.year, "month": t.month, "total": t.total }))
                .collect();
            (StatusCode::OK, Json(json!({ "totals": body }))).into_response()
        }
        Err(e) => map_transaction_error(&e),
    }
}

/// GET `/transactions/totals/departments` - Expense totals per department.
async fn department_totals(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.department_totals(auth.company_id()).await {
        Ok(totals) => {
            let body: Vec<serde_json::Value> = totals
                .into_iter()
                .map(|t| {
                    json!({
                        "department_id": t.department_id,
                        "department_name": t.department_name,
                        "total": t.total,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "totals": body }))).into_response()
        }
        Err(e) => map_transaction_error(&e),
    }
}

/// GET `/transactions/{id}` - Get a single transaction.
async fn get_transaction(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(transaction) => {
            (StatusCode::OK, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => map_transaction_error(&e),
    }
}

/// PUT `/transactions/{id}` - Update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionBody>,
) -> impl IntoResponse {
    let status = match payload.status.as_deref() {
        Some(raw) => match parse_status(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "Status must be one of: pending, completed, cancelled",
                );
            }
        },
        None => None,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = UpdateTransactionInput {
        amount: payload.amount,
        status,
        category_id: None,
        payment_method: payload.payment_method.map(Some),
        notes: payload.notes.map(Some),
    };

    match repo.update(id, input).await {
        Ok(transaction) => {
            (StatusCode::OK, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => map_transaction_error(&e),
    }
}

/// DELETE `/transactions/{id}` - Soft-delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.soft_delete(id, &auth.actor()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Transaction deleted successfully" })),
        )
            .into_response(),
        Err(e) => map_transaction_error(&e),
    }
}

/// Maps transaction errors to HTTP responses.
fn map_transaction_error(e: &TransactionError) -> axum::response::Response {
    match e {
        TransactionError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Transaction not found: {id}"),
        ),
        TransactionError::NonPositiveAmount => error_response(
            StatusCode::BAD_REQUEST,
            "non_positive_amount",
            "Amount must be greater than zero",
        ),
        TransactionError::Forbidden(message) => {
            error_response(StatusCode::FORBIDDEN, "forbidden", message.clone())
        }
        TransactionError::Database(e) => {
            error!(error = %e, "Transaction operation failed");
            internal_error()
        }
    }
}
