//! Requisition routes.
//!
//! Lifecycle events go out on the `requisitions` channel, best-effort.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{app_error_response, error_response, internal_error};
use gasto_core::approval::{self, ApprovalError, Priority};
use gasto_db::entities::sea_orm_active_enums::{RequestStatus, RequisitionPriority};
use gasto_db::repositories::requisition::{
    CreateRequisitionInput, RequisitionError, RequisitionItemInput, RequisitionRepository,
    RequisitionWithDetails, UpdateRequisitionInput,
};
use gasto_db::{UserRepository, repositories::user::UserError};
use gasto_shared::AppError;

/// Channel carrying requisition lifecycle events.
const CHANNEL: &str = "requisitions";

/// Creates the requisition routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requisitions/all", get(list_requisitions))
        .route("/requisitions/create", post(create_requisition))
        .route("/requisitions/update/{id}", put(update_requisition))
        .route("/requisitions/approve/{id}", put(approve_requisition))
        .route("/requisitions/reject/{id}", put(reject_requisition))
        .route("/requisitions/{id}", get(get_requisition))
}

// ============================================================================
// Request Types
// ============================================================================

/// One line item in a requisition body.
#[derive(Debug, Deserialize)]
pub struct ItemBody {
    /// What is being purchased.
    pub description: String,
    /// How many units.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// Request body for creating a requisition.
#[derive(Debug, Deserialize)]
pub struct CreateRequisitionBody {
    /// Short title.
    pub title: String,
    /// Total amount.
    pub total_amount: Decimal,
    /// Justification text.
    pub justification: String,
    /// Priority: low, medium, high, urgent.
    pub priority: String,
    /// Optional supplier.
    pub supplier_id: Option<Uuid>,
    /// Optional client.
    pub client_id: Option<Uuid>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<ItemBody>,
    /// Attachment file references.
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Request body for updating a requisition.
#[derive(Debug, Deserialize)]
pub struct UpdateRequisitionBody {
    /// New title.
    pub title: Option<String>,
    /// New total amount.
    pub total_amount: Option<Decimal>,
    /// New justification.
    pub justification: Option<String>,
    /// New priority.
    pub priority: Option<String>,
    /// New status (ignored unless the actor is an admin).
    pub status: Option<String>,
}

/// Request body for rejecting a requisition.
#[derive(Debug, Default, Deserialize)]
pub struct RejectRequisitionBody {
    /// Rejection reason, stored on the requisition.
    pub rejection_reason: Option<String>,
}

fn details_json(details: &RequisitionWithDetails) -> serde_json::Value {
    json!({
        "requisition": details.requisition,
        "items": details.items,
        "attachments": details.attachments,
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/requisitions/all` - Requisitions visible to the caller.
async fn list_requisitions(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = RequisitionRepository::new((*state.db).clone());

    match repo.list_for(&auth.actor()).await {
        Ok(requisitions) => {
            (StatusCode::OK, Json(json!({ "requisitions": requisitions }))).into_response()
        }
        Err(e) => map_requisition_error(e),
    }
}

/// GET `/requisitions/{id}` - A requisition with items and attachments.
async fn get_requisition(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = RequisitionRepository::new((*state.db).clone());

    match repo.get_with_details(id).await {
        Ok(details) => (StatusCode::OK, Json(details_json(&details))).into_response(),
        Err(e) => map_requisition_error(e),
    }
}

/// POST `/requisitions/create` - Create a pending requisition.
async fn create_requisition(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequisitionBody>,
) -> impl IntoResponse {
    let Some(priority) = Priority::parse(&payload.priority) else {
        return map_requisition_error(ApprovalError::InvalidPriority(payload.priority).into());
    };

    // The requester row carries the department the UID is scoped to.
    let requester = match UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await
    {
        Ok(user) => user,
        Err(UserError::NotFound(_)) => {
            return error_response(StatusCode::UNAUTHORIZED, "unauthorized", "Unknown user");
        }
        Err(e) => {
            error!(error = %e, "Failed to load requester");
            return internal_error();
        }
    };

    let repo = RequisitionRepository::new((*state.db).clone());
    let input = CreateRequisitionInput {
        title: payload.title,
        total_amount: payload.total_amount,
        justification: payload.justification,
        priority: RequisitionPriority::from(priority),
        supplier_id: payload.supplier_id,
        client_id: payload.client_id,
        items: payload
            .items
            .into_iter()
            .map(|i| RequisitionItemInput {
                description: i.description,
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
            .collect(),
        attachments: payload.attachments,
    };

    match repo.create(&requester, input).await {
        Ok(details) => {
            state
                .push
                .trigger(
                    CHANNEL,
                    "new-request",
                    json!({ "requisition": details.requisition }),
                )
                .await;

            (StatusCode::CREATED, Json(details_json(&details))).into_response()
        }
        Err(e) => map_requisition_error(e),
    }
}

/// PUT `/requisitions/approve/{id}` - Approve a pending requisition.
async fn approve_requisition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = RequisitionRepository::new((*state.db).clone());

    match repo.approve(id, &auth.actor()).await {
        Ok(requisition) => {
            state
                .push
                .trigger(
                    CHANNEL,
                    "request-approved",
                    json!({ "requisition": requisition }),
                )
                .await;

            (
                StatusCode::OK,
                Json(json!({
                    "message": "Requisition approved successfully",
                    "requisition": requisition,
                })),
            )
                .into_response()
        }
        Err(e) => map_requisition_error(e),
    }
}

/// PUT `/requisitions/reject/{id}` - Reject a pending requisition.
async fn reject_requisition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<RejectRequisitionBody>>,
) -> impl IntoResponse {
    let reason = payload.and_then(|Json(body)| body.rejection_reason);

    let repo = RequisitionRepository::new((*state.db).clone());

    match repo.reject(id, &auth.actor(), reason).await {
        Ok(requisition) => {
            state
                .push
                .trigger(
                    CHANNEL,
                    "request-rejected",
                    json!({ "requisition": requisition }),
                )
                .await;

            (
                StatusCode::OK,
                Json(json!({
                    "message": "Requisition rejected successfully",
                    "requisition": requisition,
                })),
            )
                .into_response()
        }
        Err(e) => map_requisition_error(e),
    }
}

/// PUT `/requisitions/update/{id}` - Update a requisition.
async fn update_requisition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequisitionBody>,
) -> impl IntoResponse {
    let priority = match payload.priority.as_deref() {
        Some(raw) => match Priority::parse(raw) {
            Some(priority) => Some(RequisitionPriority::from(priority)),
            None => {
                return map_requisition_error(
                    ApprovalError::InvalidPriority(raw.to_string()).into(),
                );
            }
        },
        None => None,
    };

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

    let repo = RequisitionRepository::new((*state.db).clone());
    let patch = UpdateRequisitionInput {
        title: payload.title,
        total_amount: payload.total_amount,
        justification: payload.justification,
        priority,
        supplier_id: None,
        client_id: None,
        status,
    };

    match repo.update(id, &auth.actor(), patch).await {
        Ok(requisition) => {
            state
                .push
                .trigger(
                    CHANNEL,
                    "request-updated",
                    json!({ "requisition": requisition }),
                )
                .await;

            (StatusCode::OK, Json(json!({ "requisition": requisition }))).into_response()
        }
        Err(e) => map_requisition_error(e),
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps requisition errors to HTTP responses via the shared taxonomy.
fn map_requisition_error(e: RequisitionError) -> axum::response::Response {
    app_error_response(&AppError::from(e))
}
