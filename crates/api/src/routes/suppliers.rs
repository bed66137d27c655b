//! Supplier routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{error_response, internal_error};
use gasto_db::SupplierRepository;
use gasto_db::repositories::supplier::{
    CreateSupplierInput, SupplierError, UpdateSupplierInput,
};

/// Creates the supplier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers/create", post(create_supplier))
        .route("/suppliers/all", get(list_suppliers))
        .route("/suppliers/{id}", put(update_supplier))
        .route("/suppliers/{id}", delete(delete_supplier))
}

/// Request body for creating a supplier.
#[derive(Debug, Deserialize)]
pub struct CreateSupplierBody {
    /// Supplier name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Request body for updating a supplier.
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierBody {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// POST `/suppliers/create` - Create a supplier.
async fn create_supplier(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSupplierBody>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "invalid_name", "Name is required");
    }

    let repo = SupplierRepository::new((*state.db).clone());
    let input = CreateSupplierInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
    };

    match repo.create(&auth.actor(), input).await {
        Ok(supplier) => {
            (StatusCode::CREATED, Json(json!({ "supplier": supplier }))).into_response()
        }
        Err(e) => map_supplier_error(&e),
    }
}

/// GET `/suppliers/all` - Suppliers visible to the caller.
async fn list_suppliers(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());

    match repo.list_for(&auth.actor()).await {
        Ok(suppliers) => (StatusCode::OK, Json(json!({ "suppliers": suppliers }))).into_response(),
        Err(e) => map_supplier_error(&e),
    }
}

/// PUT `/suppliers/{id}` - Update a supplier.
async fn update_supplier(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierBody>,
) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());
    let input = UpdateSupplierInput {
        name: payload.name,
        email: payload.email.map(Some),
        phone: payload.phone.map(Some),
        address: payload.address.map(Some),
        is_active: payload.is_active,
    };

    match repo.update(id, &auth.actor(), input).await {
        Ok(supplier) => (StatusCode::OK, Json(json!({ "supplier": supplier }))).into_response(),
        Err(e) => map_supplier_error(&e),
    }
}

/// DELETE `/suppliers/{id}` - Delete a supplier.
async fn delete_supplier(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());

    match repo.delete(id, &auth.actor()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Supplier deleted successfully" })),
        )
            .into_response(),
        Err(e) => map_supplier_error(&e),
    }
}

/// Maps supplier errors to HTTP responses.
fn map_supplier_error(e: &SupplierError) -> axum::response::Response {
    match e {
        SupplierError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Supplier not found: {id}"),
        ),
        SupplierError::Forbidden(message) => {
            error_response(StatusCode::FORBIDDEN, "forbidden", message.clone())
        }
        SupplierError::Database(e) => {
            error!(error = %e, "Supplier operation failed");
            internal_error()
        }
    }
}
