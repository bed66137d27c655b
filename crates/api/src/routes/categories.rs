//! Category routes.
//!
//! Listing is open to every authenticated company member; mutations are
//! admin-gated.

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
use gasto_db::CategoryRepository;
use gasto_db::entities::sea_orm_active_enums::CategoryKind;
use gasto_db::repositories::category::{CategoryError, CreateCategoryInput, UpdateCategoryInput};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories/create", post(create_category))
        .route("/categories/all", get(list_categories))
        .route("/categories/update/{id}", put(update_category))
        .route("/categories/delete/{id}", delete(delete_category))
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryBody {
    /// Category name.
    pub category_name: String,
    /// Category kind: expense, investment.
    pub category_type: String,
    /// Department the category belongs to.
    pub department_id: Option<Uuid>,
}

/// Request body for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryBody {
    /// New name.
    pub category_name: Option<String>,
    /// New kind.
    pub category_type: Option<String>,
    /// New department link.
    pub department_id: Option<Uuid>,
}

fn parse_kind(s: &str) -> Option<CategoryKind> {
    match s.to_lowercase().as_str() {
        "expense" => Some(CategoryKind::Expense),
        "investment" => Some(CategoryKind::Investment),
        _ => None,
    }
}

/// POST `/categories/create` - Create a category (admin only).
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryBody>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::CreateCategory) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can create categories",
        );
    }

    let Some(kind) = parse_kind(&payload.category_type) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_type",
            "Category type must be one of: expense, investment",
        );
    };

    let repo = CategoryRepository::new((*state.db).clone());
    let input = CreateCategoryInput {
        company_id: auth.company_id(),
        department_id: payload.department_id,
        name: payload.category_name,
        kind,
    };

    match repo.create(input).await {
        Ok(category) => {
            (StatusCode::CREATED, Json(json!({ "category": category }))).into_response()
        }
        Err(e) => map_category_error(&e),
    }
}

/// GET `/categories/all` - Categories of the caller's company.
async fn list_categories(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.list(auth.company_id()).await {
        Ok(categories) => {
            (StatusCode::OK, Json(json!({ "categories": categories }))).into_response()
        }
        Err(e) => map_category_error(&e),
    }
}

/// PUT `/categories/update/{id}` - Update a category (admin only).
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryBody>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::UpdateCategory) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can update categories",
        );
    }

    let kind = match payload.category_type.as_deref() {
        Some(raw) => match parse_kind(raw) {
            Some(kind) => Some(kind),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_type",
                    "Category type must be one of: expense, investment",
                );
            }
        },
        None => None,
    };

    let repo = CategoryRepository::new((*state.db).clone());
    let input = UpdateCategoryInput {
        name: payload.category_name,
        kind,
        department_id: payload.department_id.map(Some),
    };

    match repo.update(id, input).await {
        Ok(category) => (StatusCode::OK, Json(json!({ "category": category }))).into_response(),
        Err(e) => map_category_error(&e),
    }
}

/// DELETE `/categories/delete/{id}` - Delete a category (admin only).
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::DeleteCategory) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can delete categories",
        );
    }

    let repo = CategoryRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Category deleted successfully" })),
        )
            .into_response(),
        Err(e) => map_category_error(&e),
    }
}

/// Maps category errors to HTTP responses.
fn map_category_error(e: &CategoryError) -> axum::response::Response {
    match e {
        CategoryError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Category not found: {id}"),
        ),
        CategoryError::Database(e) => {
            error!(error = %e, "Category operation failed");
            internal_error()
        }
    }
}
