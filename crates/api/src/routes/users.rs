//! User management routes (admin-gated).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{error_response, internal_error};
use gasto_core::auth::{hash_password, validate_password_strength};
use gasto_core::policy::{self, Action};
use gasto_db::UserRepository;
use gasto_db::entities::sea_orm_active_enums::UserRole;
use gasto_db::repositories::user::{CreateUserInput, UpdateUserInput, UserError};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/create", post(create_user))
        .route("/users/all", get(list_users))
        .route("/users/update/{id}", put(update_user))
}

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Role: admin, user. Defaults to user.
    pub role: Option<String>,
    /// Department assignment.
    pub department_id: Option<Uuid>,
}

/// Request body for updating a user.
#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New department.
    pub department_id: Option<Uuid>,
    /// New role.
    pub role: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

fn parse_role(s: &str) -> Option<UserRole> {
    policy::Role::parse(s).map(UserRole::from)
}

/// POST `/users/create` - Create a user in the admin's company.
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserBody>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::CreateUser) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can create users",
        );
    }

    let role = match payload.role.as_deref() {
        Some(raw) => match parse_role(raw) {
            Some(role) => role,
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_role",
                    "Role must be one of: admin, user",
                );
            }
        },
        None => UserRole::User,
    };

    if let Err(e) = validate_password_strength(&payload.password) {
        return error_response(StatusCode::BAD_REQUEST, "weak_password", e.to_string());
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error();
        }
    };

    let repo = UserRepository::new((*state.db).clone());
    let input = CreateUserInput {
        company_id: auth.company_id(),
        department_id: payload.department_id,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        password_hash,
        role,
        created_by: auth.user_id(),
    };

    match repo.create_user(input).await {
        Ok(user) => {
            info!(user_id = %user.id, company_id = %user.company_id, "User created");
            (StatusCode::CREATED, Json(json!({ "user": user }))).into_response()
        }
        Err(e) => map_user_error(&e),
    }
}

/// GET `/users/all` - Users of the caller's company.
async fn list_users(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.list_by_company(auth.company_id()).await {
        Ok(users) => (StatusCode::OK, Json(json!({ "users": users }))).into_response(),
        Err(e) => map_user_error(&e),
    }
}

/// PUT `/users/update/{id}` - Update a user (admin only).
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserBody>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::UpdateUser) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can update users",
        );
    }

    let role = match payload.role.as_deref() {
        Some(raw) => match parse_role(raw) {
            Some(role) => Some(role),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_role",
                    "Role must be one of: admin, user",
                );
            }
        },
        None => None,
    };

    let repo = UserRepository::new((*state.db).clone());
    let input = UpdateUserInput {
        first_name: payload.first_name,
        last_name: payload.last_name,
        department_id: payload.department_id.map(Some),
        role,
        is_active: payload.is_active,
    };

    match repo.update_user(id, input).await {
        Ok(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        Err(e) => map_user_error(&e),
    }
}

/// Maps user errors to HTTP responses.
fn map_user_error(e: &UserError) -> axum::response::Response {
    match e {
        UserError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("User not found: {id}"),
        ),
        UserError::DuplicateEmail(email) => error_response(
            StatusCode::CONFLICT,
            "duplicate_email",
            format!("Email already registered: {email}"),
        ),
        UserError::Database(e) => {
            error!(error = %e, "User operation failed");
            internal_error()
        }
    }
}
