//! Department routes (admin-gated mutations).

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
use gasto_core::policy::{self, Action};
use gasto_db::DepartmentRepository;
use gasto_db::repositories::department::{
    CreateDepartmentInput, DepartmentError, UpdateDepartmentInput,
};

/// Creates the department routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/departments/create", post(create_department))
        .route("/departments/all", get(list_departments))
        .route("/departments/update/{id}", put(update_department))
        .route("/departments/delete/{id}", delete(delete_department))
}

/// Request body for creating a department.
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentBody {
    /// Department name.
    pub department_name: String,
    /// Department description.
    pub department_description: Option<String>,
}

/// Request body for updating a department.
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentBody {
    /// New name.
    pub department_name: Option<String>,
    /// New description.
    pub department_description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// POST `/departments/create` - Create a department (admin only).
async fn create_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateDepartmentBody>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::CreateDepartment) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can create departments",
        );
    }

    let repo = DepartmentRepository::new((*state.db).clone());
    let input = CreateDepartmentInput {
        company_id: auth.company_id(),
        name: payload.department_name,
        description: payload.department_description,
    };

    match repo.create(input).await {
        Ok(department) => {
            (StatusCode::CREATED, Json(json!({ "department": department }))).into_response()
        }
        Err(e) => map_department_error(&e),
    }
}

/// GET `/departments/all` - Departments of the company, with user counts.
async fn list_departments(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = DepartmentRepository::new((*state.db).clone());

    match repo.list_with_user_counts(auth.company_id()).await {
        Ok(departments) => {
            let body: Vec<serde_json::Value> = departments
                .into_iter()
                .map(|d| {
                    json!({
                        "department": d.department,
                        "user_count": d.user_count,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "departments": body }))).into_response()
        }
        Err(e) => map_department_error(&e),
    }
}

/// PUT `/departments/update/{id}` - Update a department (admin only).
async fn update_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentBody>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::UpdateDepartment) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can update departments",
        );
    }

    let repo = DepartmentRepository::new((*state.db).clone());
    let input = UpdateDepartmentInput {
        name: payload.department_name,
        description: payload.department_description.map(Some),
        is_active: payload.is_active,
    };

    match repo.update(id, input).await {
        Ok(department) => {
            (StatusCode::OK, Json(json!({ "department": department }))).into_response()
        }
        Err(e) => map_department_error(&e),
    }
}

/// DELETE `/departments/delete/{id}` - Delete a department (admin only).
async fn delete_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::DeleteDepartment) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can delete departments",
        );
    }

    let repo = DepartmentRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Department deleted successfully" })),
        )
            .into_response(),
        Err(e) => map_department_error(&e),
    }
}

/// Maps department errors to HTTP responses.
fn map_department_error(e: &DepartmentError) -> axum::response::Response {
    match e {
        DepartmentError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Department not found: {id}"),
        ),
        DepartmentError::Database(e) => {
            error!(error = %e, "Department operation failed");
            internal_error()
        }
    }
}
