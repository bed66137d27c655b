//! Client routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{error_response, internal_error};
use gasto_db::ClientRepository;
use gasto_db::repositories::client::{ClientError, CreateClientInput, UpdateClientInput};

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/create", post(create_client))
        .route("/clients/all", get(list_clients))
        .route("/clients/{id}", put(update_client))
}

/// Request body for creating a client.
#[derive(Debug, Deserialize)]
pub struct CreateClientBody {
    /// Client name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Request body for updating a client.
#[derive(Debug, Deserialize)]
pub struct UpdateClientBody {
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

/// POST `/clients/create` - Create a client.
async fn create_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateClientBody>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "invalid_name", "Name is required");
    }

    let repo = ClientRepository::new((*state.db).clone());
    let input = CreateClientInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
    };

    match repo.create(&auth.actor(), input).await {
        Ok(client) => (StatusCode::CREATED, Json(json!({ "client": client }))).into_response(),
        Err(e) => map_client_error(&e),
    }
}

/// GET `/clients/all` - Clients visible to the caller.
async fn list_clients(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.list_for(&auth.actor()).await {
        Ok(clients) => (StatusCode::OK, Json(json!({ "clients": clients }))).into_response(),
        Err(e) => map_client_error(&e),
    }
}

/// PUT `/clients/{id}` - Update a client.
async fn update_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientBody>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());
    let input = UpdateClientInput {
        name: payload.name,
        email: payload.email.map(Some),
        phone: payload.phone.map(Some),
        address: payload.address.map(Some),
        is_active: payload.is_active,
    };

    match repo.update(id, &auth.actor(), input).await {
        Ok(client) => (StatusCode::OK, Json(json!({ "client": client }))).into_response(),
        Err(e) => map_client_error(&e),
    }
}

/// Maps client errors to HTTP responses.
fn map_client_error(e: &ClientError) -> axum::response::Response {
    match e {
        ClientError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Client not found: {id}"),
        ),
        ClientError::Forbidden(message) => {
            error_response(StatusCode::FORBIDDEN, "forbidden", message.clone())
        }
        ClientError::Database(e) => {
            error!(error = %e, "Client operation failed");
            internal_error()
        }
    }
}
