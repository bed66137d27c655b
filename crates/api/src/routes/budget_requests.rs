//! Budget request routes, including the approval workflow.
//!
//! Every state change emits a best-effort event on the
//! `budget-requests` channel after the write has committed; a failed
//! push never affects the response.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{app_error_response, error_response};
use gasto_core::approval;
use gasto_db::BudgetRequestRepository;
use gasto_db::entities::sea_orm_active_enums::RequestStatus;
use gasto_db::repositories::budget_request::{
    CreateRequestInput, RequestError, UpdateRequestInput,
};
use gasto_shared::AppError;

/// Channel carrying budget request lifecycle events.
const CHANNEL: &str = "budget-requests";

/// Creates the budget request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget-requests/create", post(create_request))
        .route("/budget-requests/all", get(list_requests))
        .route("/budget-requests/pending", get(list_pending))
        .route("/budget-requests/{id}", get(get_request))
        .route("/budget-requests/{id}", put(update_request))
        .route("/budget-requests/{id}", delete(delete_request))
        .route("/budget-requests/{id}/approve", put(approve_request))
        .route("/budget-requests/{id}/reject", put(reject_request))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a budget request.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequestBody {
    /// Category to draw from.
    pub category_id: Uuid,
    /// Requested amount.
    pub requested_amount: Decimal,
    /// Justification text.
    pub description: String,
}

/// Request body for updating a budget request.
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequestBody {
    /// New category.
    pub category_id: Option<Uuid>,
    /// New amount.
    pub requested_amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New status (ignored unless the actor is an admin).
    pub status: Option<String>,
}

/// Request body for rejecting a budget request.
///
/// The reason is accepted for API symmetry with requisitions but not
/// persisted on budget requests.
#[derive(Debug, Default, Deserialize)]
pub struct RejectRequestBody {
    /// Optional rejection reason.
    pub rejection_reason: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/budget-requests/create` - Create a pending request.
async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetRequestBody>,
) -> impl IntoResponse {
    let repo = BudgetRequestRepository::new((*state.db).clone());
    let input = CreateRequestInput {
        user_id: auth.user_id(),
        category_id: payload.category_id,
        requested_amount: payload.requested_amount,
        description: payload.description,
    };

    match repo.create(input).await {
        Ok(request) => {
            state
                .push
                .trigger(CHANNEL, "new-request", json!({ "request": request }))
                .await;

            (StatusCode::CREATED, Json(json!({ "request": request }))).into_response()
        }
        Err(e) => map_request_error(e),
    }
}

/// GET `/budget-requests/all` - List the caller's requests.
async fn list_requests(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = BudgetRequestRepository::new((*state.db).clone());

    match repo.list_for_user(auth.user_id()).await {
        Ok(requests) => (StatusCode::OK, Json(json!({ "requests": requests }))).into_response(),
        Err(e) => map_request_error(e),
    }
}

/// GET `/budget-requests/pending` - Pending requests across the company.
async fn list_pending(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = BudgetRequestRepository::new((*state.db).clone());

    match repo.list_pending(auth.company_id()).await {
        Ok(requests) => (StatusCode::OK, Json(json!({ "requests": requests }))).into_response(),
        Err(e) => map_request_error(e),
    }
}

/// GET `/budget-requests/{id}` - Get a single request.
async fn get_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BudgetRequestRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(request) => (StatusCode::OK, Json(json!({ "request": request }))).into_response(),
        Err(e) => map_request_error(e),
    }
}

/// PUT `/budget-requests/{id}/approve` - Approve a pending request.
///
/// On success the response carries the updated request and the
/// before/after budget snapshots taken inside the approval transaction.
async fn approve_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BudgetRequestRepository::new((*state.db).clone());

    match repo.approve(id, &auth.actor()).await {
        Ok(approved) => {
            state
                .push
                .trigger(
                    CHANNEL,
                    "request-approved",
                    json!({ "request": approved.request }),
                )
                .await;

            let department_budget = approved.budget_info.department_budget.map(|d| {
                json!({
                    "name": d.name,
                    "before": d.before,
                    "after": d.after,
                })
            });

            (
                StatusCode::OK,
                Json(json!({
                    "message": "Budget request approved successfully",
                    "request": approved.request,
                    "budget_info": {
                        "requested_amount": approved.budget_info.requested_amount,
                        "total_budget": {
                            "before": approved.budget_info.total_budget.before,
                            "after": approved.budget_info.total_budget.after,
                        },
                        "department_budget": department_budget,
                    },
                })),
            )
                .into_response()
        }
        Err(e) => map_request_error(e),
    }
}

/// PUT `/budget-requests/{id}/reject` - Reject a pending request.
async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<RejectRequestBody>>,
) -> impl IntoResponse {
    // The body is optional; any reason supplied is intentionally not
    // stored for budget requests.
    let _reason = payload.and_then(|Json(body)| body.rejection_reason);

    let repo = BudgetRequestRepository::new((*state.db).clone());

    match repo.reject(id, &auth.actor()).await {
        Ok(request) => {
            state
                .push
                .trigger(CHANNEL, "request-rejected", json!({ "request": request }))
                .await;

            (
                StatusCode::OK,
                Json(json!({
                    "message": "Budget request rejected successfully",
                    "request": request,
                })),
            )
                .into_response()
        }
        Err(e) => map_request_error(e),
    }
}

/// PUT `/budget-requests/{id}` - Update a request.
async fn update_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBudgetRequestBody>,
) -> impl IntoResponse {
    let status = match payload.status.as_deref() {
        Some(raw) => match approval::RequestStatus::parse(raw) {
            Some(status) => Some(RequestStatus::from(status)),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "Status must be one of: pending, approved, rejected",
                );
            }
        },
        None => None,
    };

    let repo = BudgetRequestRepository::new((*state.db).clone());
    let patch = UpdateRequestInput {
        category_id: payload.category_id,
        requested_amount: payload.requested_amount,
        description: payload.description,
        status,
    };

    match repo.update(id, &auth.actor(), patch).await {
        Ok(request) => {
            state
                .push
                .trigger(CHANNEL, "request-updated", json!({ "request": request }))
                .await;

            (StatusCode::OK, Json(json!({ "request": request }))).into_response()
        }
        Err(e) => map_request_error(e),
    }
}

/// DELETE `/budget-requests/{id}` - Delete a request.
async fn delete_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BudgetRequestRepository::new((*state.db).clone());

    match repo.delete(id, &auth.actor()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Budget request deleted successfully" })),
        )
            .into_response(),
        Err(e) => map_request_error(e),
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps request errors to HTTP responses via the shared taxonomy.
fn map_request_error(e: RequestError) -> axum::response::Response {
    app_error_response(&AppError::from(e))
}
