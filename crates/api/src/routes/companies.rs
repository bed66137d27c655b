//! Company routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{error_response, internal_error};
use gasto_core::policy::{self, Action};
use gasto_db::entities::sea_orm_active_enums::CompanySize;
use gasto_db::repositories::company::{CompanyError, CompanyRepository, UpdateCompanyInput};
use gasto_db::UserRepository;

/// Creates the company routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{id}", get(company_info))
        .route("/companies/{id}", put(update_company))
        .route("/companies/{id}/users", get(company_users))
}

/// Request body for updating a company.
#[derive(Debug, Deserialize)]
pub struct UpdateCompanyBody {
    /// New name.
    pub name: Option<String>,
    /// New contact email.
    pub contact_email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New size bucket.
    pub size: Option<String>,
}

fn parse_size(s: &str) -> Option<CompanySize> {
    match s.to_lowercase().as_str() {
        "small" => Some(CompanySize::Small),
        "medium" => Some(CompanySize::Medium),
        "large" => Some(CompanySize::Large),
        _ => None,
    }
}

/// Rejects access to companies other than the caller's own.
fn check_own_company(auth: &AuthUser, company_id: Uuid) -> Option<axum::response::Response> {
    if auth.company_id() == company_id {
        None
    } else {
        Some(error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Access is limited to your own company",
        ))
    }
}

/// GET `/companies/{id}` - Company details with user count.
async fn company_info(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Some(response) = check_own_company(&auth, id) {
        return response;
    }

    let repo = CompanyRepository::new((*state.db).clone());

    let company = match repo.find_by_id(id).await {
        Ok(company) => company,
        Err(e) => return map_company_error(&e),
    };
    let user_count = match repo.user_count(id).await {
        Ok(count) => count,
        Err(e) => return map_company_error(&e),
    };

    (
        StatusCode::OK,
        Json(json!({ "company": company, "user_count": user_count })),
    )
        .into_response()
}

/// GET `/companies/{id}/users` - Users of the company.
async fn company_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Some(response) = check_own_company(&auth, id) {
        return response;
    }

    let repo = UserRepository::new((*state.db).clone());

    match repo.list_by_company(id).await {
        Ok(users) => (StatusCode::OK, Json(json!({ "users": users }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list company users");
            internal_error()
        }
    }
}

/// PUT `/companies/{id}` - Update the company (admin only).
async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyBody>,
) -> impl IntoResponse {
    if let Some(response) = check_own_company(&auth, id) {
        return response;
    }
    if !policy::can(&auth.actor(), Action::UpdateCompany) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can update the company",
        );
    }

    let size = match payload.size.as_deref() {
        Some(raw) => match parse_size(raw) {
            Some(size) => Some(size),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_size",
                    "Company size must be one of: small, medium, large",
                );
            }
        },
        None => None,
    };

    let repo = CompanyRepository::new((*state.db).clone());
    let input = UpdateCompanyInput {
        name: payload.name,
        contact_email: payload.contact_email,
        phone: payload.phone.map(Some),
        size,
    };

    match repo.update(id, input).await {
        Ok(company) => (StatusCode::OK, Json(json!({ "company": company }))).into_response(),
        Err(e) => map_company_error(&e),
    }
}

/// Maps company errors to HTTP responses.
fn map_company_error(e: &CompanyError) -> axum::response::Response {
    match e {
        CompanyError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Company not found: {id}"),
        ),
        CompanyError::Database(e) => {
            error!(error = %e, "Company operation failed");
            internal_error()
        }
    }
}
